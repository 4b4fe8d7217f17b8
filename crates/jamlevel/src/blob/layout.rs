//! Byte layout constants for serialized level blobs
//!
//! This module centralizes every fixed offset and record stride used when
//! reading level data. Constants are organized by structure type.

/// Word size (4 bytes / 32-bit integer or float)
pub const WORD: usize = 4;

/// Level header
pub mod header {
    use super::WORD;

    /// Offset of the length-prefixed level name
    pub const NAME: usize = 0x1C;
    /// Offset of the declared door count (unreliable, logged only)
    pub const DOOR_COUNT: usize = 0x80;

    /// Maximum accepted string length for name/GUID fields
    pub const MAX_STRING_LEN: i32 = 500;

    /// Upper bound (exclusive) for the hidden-cell and grid-color list counts
    pub const MAX_LIST_COUNT: i32 = 50;
    /// Size of one hidden cell / grid color entry (two i32)
    pub const COORD_ENTRY: usize = WORD * 2;

    /// Camera block: position (vec3) + rotation (vec3) + fov (f32)
    pub const CAMERA_SIZE: usize = WORD * 7;
    pub const CAMERA_ROTATION: usize = WORD * 3;
    pub const CAMERA_FOV: usize = WORD * 6;

    /// Grid size bounds (inclusive)
    pub const MIN_GRID: i32 = 1;
    pub const MAX_GRID: i32 = 20;
}

/// Game block record (the movable pieces inside the field)
pub mod block {
    use super::WORD;

    /// Size of one game block record (0x9C = 156 bytes)
    pub const STRIDE: usize = 0x9C;

    pub const POSITION: usize = 0;
    pub const ROTATION: usize = WORD * 3;
    pub const GROUP_TYPE: usize = WORD * 6;
    pub const COLOR_TYPE: usize = WORD * 7;

    // Movement constraint flags (offsets 8 and 10)
    pub const MOVE_FLAG_A: usize = WORD * 8;
    pub const MOVE_FLAG_B: usize = WORD * 10;

    // Inner layer (offsets 12-13)
    pub const INNER_FLAG: usize = WORD * 12;
    pub const INNER_COLOR: usize = WORD * 13;

    /// Minimum bytes that must remain to decode the leading fields of a record
    pub const MIN_READABLE: usize = WORD * 8;
}

/// Frame element record (decorative border pieces)
pub mod frame {
    use super::WORD;

    /// Size of one frame element record (0x2C = 44 bytes)
    pub const STRIDE: usize = 0x2C;

    pub const POSITION: usize = 0;
    pub const ROTATION: usize = WORD * 3;
    pub const SCALE: usize = WORD * 6;
    pub const GROUP_TYPE: usize = WORD * 9;
    pub const COLOR_TYPE: usize = WORD * 10;
}

/// Door record
pub mod door {
    use super::WORD;

    /// Size of one door record (0x20 = 32 bytes)
    pub const STRIDE: usize = 0x20;

    pub const POSITION: usize = 0;
    pub const ROTATION: usize = WORD * 3;
    pub const PART_COUNT: usize = WORD * 6;
    pub const COLOR_TYPE: usize = WORD * 7;
}

/// Hardness record stored in front of the level GUID in the asset container
pub mod hardness {
    use super::WORD;

    /// `[duration f32][duration f32][hardness i32][string length i32]`
    pub const PREFIX_SIZE: usize = WORD * 4;
    pub const DURATION: usize = 0;
    pub const HARDNESS: usize = WORD * 2;
    pub const GUID_LENGTH: usize = WORD * 3;

    /// Length of a textual UUID
    pub const GUID_TEXT_LEN: i32 = 36;
}
