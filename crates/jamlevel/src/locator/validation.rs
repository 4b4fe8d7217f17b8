//! First-record and per-record validity predicates.

use crate::blob::BlobReader;
use crate::blob::layout::{WORD, block, door, frame};

use super::constants::*;

/// Validate the first game block of a candidate array.
///
/// Layout (see [`block`]):
/// - 0x00: position (3 x f32), must be inside the field
/// - 0x18: group type (i32, 0-11)
/// - 0x1C: color type (i32, 0-15)
pub fn validate_block_head(reader: &BlobReader, start: usize, _count: i32) -> bool {
    let px = reader.read_f32(start + block::POSITION);
    let py = reader.read_f32(start + block::POSITION + WORD);
    let pz = reader.read_f32(start + block::POSITION + WORD * 2);

    if px.abs() > BLOCK_FIRST_MAX_XY
        || py.abs() > BLOCK_FIRST_MAX_XY
        || pz.abs() > BLOCK_FIRST_MAX_Z
    {
        return false;
    }

    let group = reader.read_i32(start + block::GROUP_TYPE);
    let color = reader.read_i32(start + block::COLOR_TYPE);
    if !(0..=MAX_GROUP_TYPE).contains(&group) || !(0..=MAX_COLOR_TYPE).contains(&color) {
        return false;
    }

    // Padding arrays decode as an all-zero block at the origin
    px.abs() > BLOCK_PADDING_EPSILON
        || py.abs() > BLOCK_PADDING_EPSILON
        || group > 0
        || color > 0
}

/// Validate the first frame element of a candidate array.
///
/// When the array claims two or more elements, the second element's
/// position has to be plausible too.
pub fn validate_frame_head(reader: &BlobReader, start: usize, count: i32) -> bool {
    if start + WORD * 3 > reader.len() {
        return false;
    }

    let px = reader.read_f32(start + frame::POSITION);
    let py = reader.read_f32(start + frame::POSITION + WORD);
    let pz = reader.read_f32(start + frame::POSITION + WORD * 2);
    if !in_frame_bounds(px, py) || !(FRAME_MIN_Z < pz && pz < FRAME_MAX_Z) {
        return false;
    }

    let rx = reader.read_f32(start + frame::ROTATION);
    if !is_frame_rotation(rx) {
        return false;
    }

    if count == 1 {
        return true;
    }

    let second = start + frame::STRIDE;
    if second + WORD * 3 > reader.len() {
        return false;
    }
    let px2 = reader.read_f32(second + frame::POSITION);
    let py2 = reader.read_f32(second + frame::POSITION + WORD);
    in_frame_bounds(px2, py2)
}

fn in_frame_bounds(x: f64, y: f64) -> bool {
    -FRAME_MAX_XY < x && x < FRAME_MAX_XY && -FRAME_MAX_XY < y && y < FRAME_MAX_XY
}

/// Frame pieces are laid flat, flipped, or tilted by the border's 345° bevel
pub fn is_frame_rotation(rx: f64) -> bool {
    let abs = rx.abs();
    abs < 0.5 || (89.0 < abs && abs < 271.0) || (rx - 345.0).abs() < 1.0
}

/// Check if door record fields look valid
pub fn is_valid_door(x: f64, y: f64, parts: i32, color: i32) -> bool {
    if x.abs() < DOOR_ORIGIN_EPSILON && y.abs() < DOOR_ORIGIN_EPSILON {
        return false;
    }
    if x.abs() > DOOR_MAX_XY || y.abs() > DOOR_MAX_XY {
        return false;
    }
    (DOOR_MIN_PARTS..=DOOR_MAX_PARTS).contains(&parts) && (0..=MAX_COLOR_TYPE).contains(&color)
}

/// Read and validate the part count and color of a door candidate
pub fn door_fields_at(reader: &BlobReader, offset: usize, x: f64, y: f64) -> Option<(i32, i32)> {
    let parts = reader.read_i32(offset + door::PART_COUNT);
    let color = reader.read_i32(offset + door::COLOR_TYPE);
    is_valid_door(x, y, parts, color).then_some((parts, color))
}
