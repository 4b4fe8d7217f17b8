//! Record locator for level blobs
//!
//! Count-prefixed arrays (game blocks, frame elements) share one greedy
//! scan driven by a per-kind [`RecordLayout`]. Doors use their own sliding
//! scan in [`doors`].

mod constants;
mod doors;
mod validation;

use tracing::debug;

use crate::blob::BlobReader;
use crate::blob::layout::{WORD, block, frame};

pub use constants::*;
pub use doors::{DoorThresholds, find_doors};
pub use validation::{is_frame_rotation, is_valid_door};

/// Kinds of count-prefixed record arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    GameBlock,
    FrameElement,
}

/// Strategy for locating one kind of count-prefixed array
#[derive(Debug, Clone, Copy)]
pub struct RecordLayout {
    pub kind: RecordKind,
    /// First offset probed for the count field
    pub search_start: usize,
    /// Upper bound of the search window
    pub search_end: usize,
    /// Bytes kept clear at the end of the blob
    pub tail_reserve: usize,
    pub min_count: i32,
    pub max_count: i32,
    /// Byte size of one record
    pub stride: usize,
    /// Checks the record right after a plausible count
    pub validate_head: fn(&BlobReader, usize, i32) -> bool,
}

pub const GAME_BLOCK_LAYOUT: RecordLayout = RecordLayout {
    kind: RecordKind::GameBlock,
    search_start: BLOCK_SEARCH_START,
    search_end: BLOCK_SEARCH_END,
    tail_reserve: BLOCK_SEARCH_TAIL,
    min_count: BLOCK_MIN_COUNT,
    max_count: BLOCK_MAX_COUNT,
    stride: block::STRIDE,
    validate_head: validation::validate_block_head,
};

pub const FRAME_ELEMENT_LAYOUT: RecordLayout = RecordLayout {
    kind: RecordKind::FrameElement,
    search_start: FRAME_SEARCH_START,
    search_end: FRAME_SEARCH_END,
    tail_reserve: FRAME_SEARCH_TAIL,
    min_count: FRAME_MIN_COUNT,
    max_count: FRAME_MAX_COUNT,
    stride: frame::STRIDE,
    validate_head: validation::validate_frame_head,
};

impl RecordKind {
    pub fn layout(&self) -> &'static RecordLayout {
        match self {
            Self::GameBlock => &GAME_BLOCK_LAYOUT,
            Self::FrameElement => &FRAME_ELEMENT_LAYOUT,
        }
    }
}

/// A confirmed array: `count` records starting at `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayLocation {
    /// Offset of the count field
    pub count_offset: usize,
    /// Offset of the first record
    pub start: usize,
    pub count: usize,
}

impl RecordLayout {
    /// Exclusive end of the count-field scan for a blob of `len` bytes
    pub fn window_end(&self, len: usize) -> usize {
        len.saturating_sub(self.tail_reserve).min(self.search_end)
    }

    /// Scan every 4-byte-aligned offset of the window and return the first
    /// one holding a plausible count followed by a valid first record.
    pub fn locate(&self, reader: &BlobReader) -> Option<ArrayLocation> {
        let end = self.window_end(reader.len());

        let found = (self.search_start..end).step_by(WORD).find_map(|offset| {
            let count = reader.read_i32(offset);
            if !(self.min_count..=self.max_count).contains(&count) {
                return None;
            }
            let start = offset + WORD;
            (self.validate_head)(reader, start, count).then_some(ArrayLocation {
                count_offset: offset,
                start,
                count: count as usize,
            })
        });

        match found {
            Some(loc) => debug!(
                "{:?} array: count={} at 0x{:X}",
                self.kind, loc.count, loc.count_offset
            ),
            None => debug!(
                "{:?} array not found in 0x{:X}..0x{:X}",
                self.kind, self.search_start, end
            ),
        }
        found
    }
}

/// Locate an array of the given kind
pub fn locate(reader: &BlobReader, kind: RecordKind) -> Option<ArrayLocation> {
    kind.layout().locate(reader)
}
