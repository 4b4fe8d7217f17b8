use serde::{Deserialize, Serialize};

use crate::blob::layout::header::{MAX_GRID, MIN_GRID};
use crate::error::Error;

use super::enums::{GroupType, MoveDirection};

/// World-space vector (engine units, one grid cell = 2.0)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Grid dimensions; `x` is the width, `y` the height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGridSize")]
pub struct GridSize {
    pub x: i32,
    pub y: i32,
}

#[derive(Deserialize)]
struct RawGridSize {
    x: i32,
    y: i32,
}

impl TryFrom<RawGridSize> for GridSize {
    type Error = Error;

    fn try_from(raw: RawGridSize) -> Result<Self, Self::Error> {
        GridSize::new(raw.x, raw.y)
    }
}

impl GridSize {
    pub fn new(width: i32, height: i32) -> Result<Self, Error> {
        let bounds = MIN_GRID..=MAX_GRID;
        if !bounds.contains(&width) || !bounds.contains(&height) {
            return Err(Error::InvalidGridSize { width, height });
        }
        Ok(Self {
            x: width,
            y: height,
        })
    }

    pub fn width(&self) -> i32 {
        self.x
    }

    pub fn height(&self) -> i32 {
        self.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Vec3,
    pub fov: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::default(),
            rotation: Vec3::default(),
            fov: 60.0,
        }
    }
}

/// Permanently masked cell in engine-native coordinates (y = 0 is the bottom row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HiddenCell {
    pub x: i32,
    pub y: i32,
}

/// Movable game block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    pub position: Vec3,
    pub rotation: Vec3,
    pub block_group_type: i32,
    pub block_type: i32,
    #[serde(default)]
    pub move_direction: MoveDirection,
    /// Color of the inner layer, -1 when the block has none
    #[serde(default = "no_inner_layer")]
    pub inner_block_type: i32,
}

fn no_inner_layer() -> i32 {
    -1
}

impl BlockRecord {
    pub fn group(&self) -> Option<GroupType> {
        GroupType::from_i32(self.block_group_type)
    }

    /// Quarter-turn index (0..=3) of the Z rotation
    pub fn rotation_index(&self) -> i32 {
        rotation_index(self.rotation.z)
    }
}

/// Round a Z angle in degrees to its quarter-turn index (0..=3)
pub fn rotation_index(degrees: f64) -> i32 {
    ((degrees / 90.0).round() as i32).rem_euclid(4)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorRecord {
    pub position: Vec3,
    pub rotation: Vec3,
    pub door_part_count: i32,
    pub block_type: i32,
}

/// Decorative border piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameElement {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub block_group_type: i32,
    pub block_type: i32,
}
