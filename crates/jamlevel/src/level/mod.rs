//! Raw level records as extracted from the serialized blobs.

mod enums;
mod name;
mod types;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use enums::*;
pub use name::{is_level_name, level_number};
pub use types::*;

/// One parsed level, still in engine world coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub name: String,
    pub guid: String,
    /// Playable grid size; the height excludes trimmed top rows
    pub grid_size: GridSize,
    #[serde(default)]
    pub camera: Camera,
    #[serde(default)]
    pub hidden_coords: Vec<HiddenCell>,
    #[serde(default)]
    pub doors: Vec<DoorRecord>,
    #[serde(default)]
    pub game_blocks: Vec<BlockRecord>,
    #[serde(default)]
    pub frame_elements: Vec<FrameElement>,
    /// Height as declared in the blob, before trimming
    pub original_grid_height: i32,
    #[serde(default)]
    pub removed_top_rows: i32,
}

impl Level {
    pub fn width(&self) -> i32 {
        self.grid_size.x
    }

    pub fn height(&self) -> i32 {
        self.grid_size.y
    }

    /// Numeric suffix of the level name, e.g. 36 for "Derin Level 36"
    pub fn number(&self) -> Option<u32> {
        level_number(&self.name)
    }

    pub fn has_hidden_cells(&self) -> bool {
        !self.hidden_coords.is_empty()
    }

    /// Whether more than half of the given column is hidden, measured
    /// against the declared grid (trimmed rows were fully hidden).
    pub fn column_mostly_hidden(&self, col: i32) -> bool {
        let rows: HashSet<i32> = self
            .hidden_coords
            .iter()
            .filter(|c| c.x == col && (0..self.height()).contains(&c.y))
            .map(|c| c.y)
            .collect();
        (rows.len() as i32 + self.removed_top_rows) * 2 > self.original_grid_height
    }

    /// Remove fully hidden rows from the top of the grid.
    ///
    /// Counts consecutive rows, starting at the topmost engine row
    /// (`y = height - 1`), in which every column is hidden. The grid height,
    /// hidden cell list and `removed_top_rows` change together; world
    /// positions are untouched. At least one row is always kept.
    /// Returns the number of rows removed by this call.
    pub fn trim_hidden_top_rows(&mut self) -> i32 {
        let hidden: HashSet<(i32, i32)> =
            self.hidden_coords.iter().map(|c| (c.x, c.y)).collect();
        let width = self.width();
        let height = self.height();

        let mut removed = 0;
        for y in (1..height).rev() {
            if (0..width).all(|x| hidden.contains(&(x, y))) {
                removed += 1;
            } else {
                break;
            }
        }

        if removed == 0 {
            return 0;
        }

        let new_height = height - removed;
        self.grid_size.y = new_height;
        self.removed_top_rows += removed;
        self.hidden_coords.retain(|c| c.y < new_height);
        debug!(
            "{}: trimmed {} hidden top row(s), height {} -> {}",
            self.name, removed, height, new_height
        );
        removed
    }
}

/// Whether more than half of `col`'s cells within `height` rows are hidden
pub fn column_mostly_hidden(hidden: &[HiddenCell], col: i32, height: i32) -> bool {
    let rows: HashSet<i32> = hidden
        .iter()
        .filter(|c| c.x == col && (0..height).contains(&c.y))
        .map(|c| c.y)
        .collect();
    rows.len() as i32 * 2 > height
}
