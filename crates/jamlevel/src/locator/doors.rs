//! Sliding-window door scan.
//!
//! The declared door count is unreliable, so the whole door region is
//! walked in 4-byte steps. A position on (or just outside) a grid edge
//! followed by a valid part count and color is accepted as a door.

use tracing::debug;

use crate::blob::BlobReader;
use crate::blob::layout::{WORD, door};
use crate::level::{DoorRecord, Edge, HiddenCell, column_mostly_hidden};

use super::constants::*;
use super::validation::door_fields_at;

/// Edge-distance thresholds derived from the grid size.
///
/// Door geometry shifts outward with the grid size and inward when an edge
/// column is masked, so fixed constants misclassify large or masked grids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorThresholds {
    /// Minimum |x| of a door on the left edge
    pub left: f64,
    /// Minimum |x| of a door on the right edge
    pub right: f64,
    /// Maximum |x| of any side door
    pub side_max: f64,
    /// Minimum |y| of a top/bottom door
    pub top_bottom: f64,
}

impl DoorThresholds {
    pub fn new(width: i32, height: i32, left_hidden: bool, right_hidden: bool) -> Self {
        let width = width as f64;
        let side = SIDE_EDGE_MIN_THRESHOLD.max(width + SIDE_EDGE_MARGIN);
        let inset = width - HIDDEN_EDGE_INSET;

        let margin = if height >= TALL_GRID_HEIGHT {
            TALL_GRID_MARGIN
        } else {
            TOP_BOTTOM_MARGIN
        };

        Self {
            left: if left_hidden { inset } else { side },
            right: if right_hidden { inset } else { side },
            side_max: width + SIDE_EDGE_MAX_MARGIN,
            top_bottom: TOP_BOTTOM_MIN_THRESHOLD.max(height as f64 - margin),
        }
    }

    /// Thresholds for a grid, checking its edge columns against the hidden cells
    pub fn for_grid(width: i32, height: i32, hidden: &[HiddenCell]) -> Self {
        Self::new(
            width,
            height,
            column_mostly_hidden(hidden, 0, height),
            column_mostly_hidden(hidden, width - 1, height),
        )
    }

    /// Side threshold that applies on the side of `x`
    pub fn side(&self, x: f64) -> f64 {
        if x < 0.0 { self.left } else { self.right }
    }

    pub fn is_side_candidate(&self, x: f64) -> bool {
        (self.side(x)..=self.side_max).contains(&x.abs())
    }

    pub fn is_top_bottom_candidate(&self, x: f64, y: f64) -> bool {
        y.abs() >= self.top_bottom && x.abs() < self.side(x)
    }

    /// Which edge a door at world `(x, y)` is attached to
    pub fn edge(&self, x: f64, y: f64) -> Edge {
        if x.abs() >= self.side(x) {
            if x < 0.0 { Edge::Left } else { Edge::Right }
        } else if y > 0.0 {
            Edge::Top
        } else {
            Edge::Bottom
        }
    }
}

/// Exclusive end of the door scan for a blob of `len` bytes
pub fn door_search_end(len: usize) -> usize {
    let region_end = len.min(DOOR_REGION_END);
    len.saturating_sub(door::STRIDE)
        .min(region_end.max(DOOR_SEARCH_MIN_END))
}

/// Scan the door region and collect every distinct door.
pub fn find_doors(reader: &BlobReader, thresholds: &DoorThresholds) -> Vec<DoorRecord> {
    let search_end = door_search_end(reader.len());
    let mut doors: Vec<DoorRecord> = Vec::new();
    let mut first_seen = false;

    let mut offset = DOOR_SEARCH_START;
    while offset + door::STRIDE <= search_end {
        let x = reader.read_f32(offset + door::POSITION);
        let y = reader.read_f32(offset + door::POSITION + WORD);
        let z = reader.read_f32(offset + door::POSITION + WORD * 2);

        let on_edge =
            thresholds.is_side_candidate(x) || thresholds.is_top_bottom_candidate(x, y);
        let in_range = x.abs() < DOOR_CANDIDATE_MAX_XY
            && y.abs() < DOOR_CANDIDATE_MAX_XY
            && z.abs() < DOOR_CANDIDATE_MAX_Z;

        let fields = if on_edge && in_range {
            door_fields_at(reader, offset, x, y)
        } else {
            None
        };

        let Some((parts, color)) = fields else {
            offset += WORD;
            continue;
        };

        let record = DoorRecord {
            position: reader.read_vec3(offset + door::POSITION),
            rotation: reader.read_vec3(offset + door::ROTATION),
            door_part_count: parts,
            block_type: color,
        };

        if !first_seen {
            first_seen = true;
            if is_tilted(&record) {
                debug!(
                    "Dropping tilted first door candidate at 0x{:X} (rot {:?})",
                    offset, record.rotation
                );
                offset += door::STRIDE;
                continue;
            }
        }

        let duplicate = doors.iter().any(|d| {
            (d.position.x - record.position.x).abs() < DOOR_DEDUP_DISTANCE
                && (d.position.y - record.position.y).abs() < DOOR_DEDUP_DISTANCE
        });
        if duplicate {
            debug!(
                "Skipping duplicate door at 0x{:X} ({}, {})",
                offset, record.position.x, record.position.y
            );
        } else {
            doors.push(record);
        }

        offset += door::STRIDE;
    }

    debug!("Found {} door(s)", doors.len());
    doors
}

/// Doors rotate around Z only; an X/Y tilt means the bytes belong to some
/// other transform.
fn is_tilted(record: &DoorRecord) -> bool {
    record.rotation.x.abs() >= DOOR_MAX_TILT || record.rotation.y.abs() >= DOOR_MAX_TILT
}
