//! Record decoder for located arrays.
//!
//! Each record is validated on its own. A record that fails a range check
//! is dropped and decoding continues with the next one, so a noisy array
//! still yields its good records.

use tracing::debug;

use crate::blob::BlobReader;
use crate::blob::layout::{WORD, block, frame};
use crate::level::{BlockRecord, FrameElement, MoveDirection, rotation_index};
use crate::locator::{
    ArrayLocation, BLOCK_MAX_XY, MAX_COLOR_TYPE, MAX_GROUP_TYPE, MAX_INNER_COLOR_TYPE,
};

/// No inner layer
pub const NO_INNER_LAYER: i32 = -1;

/// Decode the game block array at `loc`
pub fn decode_game_blocks(reader: &BlobReader, loc: &ArrayLocation) -> Vec<BlockRecord> {
    let mut blocks = Vec::with_capacity(loc.count);

    for i in 0..loc.count {
        let offset = loc.start + i * block::STRIDE;
        if offset + block::MIN_READABLE > reader.len() {
            debug!("Block array truncated after {} of {} records", i, loc.count);
            break;
        }

        match decode_game_block(reader, offset) {
            Some(record) => blocks.push(record),
            None => debug!("Dropped invalid block record {} at 0x{:X}", i, offset),
        }
    }

    blocks
}

/// Decode one game block record, or `None` if a field is out of range
pub fn decode_game_block(reader: &BlobReader, offset: usize) -> Option<BlockRecord> {
    let px = reader.read_f32(offset + block::POSITION);
    let py = reader.read_f32(offset + block::POSITION + WORD);
    if px.abs() > BLOCK_MAX_XY || py.abs() > BLOCK_MAX_XY {
        return None;
    }

    let group = reader.read_i32(offset + block::GROUP_TYPE);
    let color = reader.read_i32(offset + block::COLOR_TYPE);
    if !(0..=MAX_GROUP_TYPE).contains(&group) || !(0..=MAX_COLOR_TYPE).contains(&color) {
        return None;
    }

    let rotation = reader.read_vec3(offset + block::ROTATION);
    let flag_a = reader.read_i32(offset + block::MOVE_FLAG_A) != 0;
    let flag_b = reader.read_i32(offset + block::MOVE_FLAG_B) != 0;
    let move_direction = MoveDirection::from_flags(flag_a, flag_b, rotation_index(rotation.z));

    Some(BlockRecord {
        position: reader.read_vec3(offset + block::POSITION),
        rotation,
        block_group_type: group,
        block_type: color,
        move_direction,
        inner_block_type: inner_color(reader, offset, color),
    })
}

/// Inner layer color, or [`NO_INNER_LAYER`] when the layer is absent,
/// out of range, or identical to the outer color.
fn inner_color(reader: &BlobReader, offset: usize, outer: i32) -> i32 {
    if reader.read_i32(offset + block::INNER_FLAG) == 0 {
        return NO_INNER_LAYER;
    }
    let inner = reader.read_i32(offset + block::INNER_COLOR);
    if (0..=MAX_INNER_COLOR_TYPE).contains(&inner) && inner != outer {
        inner
    } else {
        NO_INNER_LAYER
    }
}

/// Decode the frame element array at `loc`
pub fn decode_frame_elements(reader: &BlobReader, loc: &ArrayLocation) -> Vec<FrameElement> {
    (0..loc.count)
        .map(|i| loc.start + i * frame::STRIDE)
        .take_while(|&offset| offset + frame::STRIDE <= reader.len())
        .map(|offset| FrameElement {
            position: reader.read_vec3(offset + frame::POSITION),
            rotation: reader.read_vec3(offset + frame::ROTATION),
            scale: reader.read_vec3(offset + frame::SCALE),
            block_group_type: reader.read_i32(offset + frame::GROUP_TYPE),
            block_type: reader.read_i32(offset + frame::COLOR_TYPE),
        })
        .collect()
}
