use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, FromRepr, IntoStaticStr};

/// Shape category of a movable block
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
pub enum GroupType {
    One = 0,
    Two = 1,
    Three = 2,
    L = 3,
    ReverseL = 4,
    ShortL = 5,
    Plus = 6,
    TwoSquare = 7,
    ShortT = 8,
    Z = 9,
    ReverseZ = 10,
    U = 11,
}

impl GroupType {
    pub const MAX: i32 = GroupType::U as i32;

    pub fn from_i32(value: i32) -> Option<Self> {
        u8::try_from(value).ok().and_then(Self::from_repr)
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// L and its mirror share the half-cell anchor offset
    pub fn is_l_shape(&self) -> bool {
        matches!(self, Self::L | Self::ReverseL)
    }
}

/// Axis a block is allowed to slide along
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MoveDirection {
    Horizontal,
    Vertical,
    #[default]
    Both,
}

impl MoveDirection {
    /// Derive the movement constraint from the two record flags and the
    /// quarter-turn rotation index (0..=3).
    ///
    /// Both flags: slide along the long axis. Only the first flag: slide
    /// across it. Anything else is unrestricted.
    pub fn from_flags(flag_a: bool, flag_b: bool, rotation: i32) -> Self {
        let upright = rotation.rem_euclid(2) == 0;
        match (flag_a, flag_b) {
            (true, true) if upright => Self::Vertical,
            (true, true) => Self::Horizontal,
            (true, false) if upright => Self::Horizontal,
            (true, false) => Self::Vertical,
            _ => Self::Both,
        }
    }
}

/// Grid boundary side a door is attached to
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub fn is_side(&self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Coarse difficulty tier
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    FromRepr,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
pub enum Hardness {
    #[default]
    Normal = 0,
    Hard = 1,
    VeryHard = 2,
}

impl Hardness {
    pub fn from_i32(value: i32) -> Option<Self> {
        u8::try_from(value).ok().and_then(Self::from_repr)
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}
