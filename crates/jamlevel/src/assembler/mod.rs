//! Level assembler: header parsing and orchestration of the locators.
//!
//! A blob that fails a structural check (bad grid size, no name) yields
//! `None`; the rest of the batch is unaffected.

pub mod container;

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::blob::layout::{WORD, header};
use crate::blob::{BlobReader, round2};
use crate::decoder::{decode_frame_elements, decode_game_blocks};
use crate::level::{Camera, GridSize, HiddenCell, Level, is_level_name, level_number};
use crate::locator::{DoorThresholds, RecordKind, find_doors, locate};

pub use container::{BlobSource, read_blob_dir, scan_container};

/// Shortest and longest name a level blob can carry ("Level 1" .. prefixed names)
pub const MIN_NAME_LEN: i32 = 5;
pub const MAX_NAME_LEN: i32 = 30;

/// Header fields read before the record scans
#[derive(Debug, Clone, PartialEq)]
struct Header {
    name: String,
    guid: String,
    grid_size: GridSize,
    hidden: Vec<HiddenCell>,
    camera: Camera,
}

fn read_header(reader: &BlobReader) -> Option<Header> {
    let (name, offset) = reader.read_string(header::NAME);
    let (guid, mut offset) = reader.read_string(offset);

    let width = reader.read_i32(offset);
    let height = reader.read_i32(offset + WORD);
    offset += WORD * 2;
    let grid_size = match GridSize::new(width, height) {
        Ok(size) => size,
        Err(e) => {
            debug!("Rejecting blob {:?}: {}", name, e);
            return None;
        }
    };

    let hidden_count = reader.read_i32(offset);
    offset += WORD;
    let mut hidden = Vec::new();
    if (0..header::MAX_LIST_COUNT).contains(&hidden_count) {
        hidden = (0..hidden_count as usize)
            .map(|i| {
                let entry = offset + i * header::COORD_ENTRY;
                HiddenCell {
                    x: reader.read_i32(entry),
                    y: reader.read_i32(entry + WORD),
                }
            })
            .filter(|cell| {
                let inside = (0..width).contains(&cell.x) && (0..height).contains(&cell.y);
                if !inside {
                    debug!("{}: dropping hidden cell outside the grid: {:?}", name, cell);
                }
                inside
            })
            .collect();
        offset += hidden_count as usize * header::COORD_ENTRY;
    }

    // Per-cell grid colors are not used downstream
    let color_count = reader.read_i32(offset);
    offset += WORD;
    if (0..header::MAX_LIST_COUNT).contains(&color_count) {
        offset += color_count as usize * header::COORD_ENTRY;
    }

    let camera = if offset + header::CAMERA_SIZE <= reader.len() {
        Camera {
            position: reader.read_vec3(offset),
            rotation: reader.read_vec3(offset + header::CAMERA_ROTATION),
            fov: round2(reader.read_f32(offset + header::CAMERA_FOV)),
        }
    } else {
        Camera::default()
    };

    Some(Header {
        name,
        guid,
        grid_size,
        hidden,
        camera,
    })
}

/// Parse one level blob.
///
/// Returns `None` when the header is structurally invalid. Missing arrays
/// are not an error: the level comes back with empty lists.
pub fn parse_level(data: &[u8]) -> Option<Level> {
    let reader = BlobReader::new(data);
    let Header {
        name,
        guid,
        grid_size,
        hidden,
        camera,
    } = read_header(&reader)?;

    debug!(
        "{}: grid {}x{}, {} hidden cell(s), declared doors={}",
        name,
        grid_size.width(),
        grid_size.height(),
        hidden.len(),
        reader.read_i32(header::DOOR_COUNT)
    );

    let thresholds = DoorThresholds::for_grid(grid_size.width(), grid_size.height(), &hidden);
    let doors = find_doors(&reader, &thresholds);

    let game_blocks = locate(&reader, RecordKind::GameBlock)
        .map(|loc| decode_game_blocks(&reader, &loc))
        .unwrap_or_default();
    let frame_elements = locate(&reader, RecordKind::FrameElement)
        .map(|loc| decode_frame_elements(&reader, &loc))
        .unwrap_or_default();

    let mut level = Level {
        name,
        guid,
        grid_size,
        camera,
        hidden_coords: hidden,
        doors,
        game_blocks,
        frame_elements,
        original_grid_height: grid_size.height(),
        removed_top_rows: 0,
    };
    level.trim_hidden_top_rows();
    Some(level)
}

/// Name stored at the blob's name field, if its length is plausible
pub fn peek_name(data: &[u8]) -> Option<String> {
    let reader = BlobReader::new(data);
    let length = reader.read_i32(header::NAME);
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&length) {
        return None;
    }
    let (name, _) = reader.read_string(header::NAME);
    Some(name)
}

#[derive(Default)]
struct Batch {
    levels: Vec<Level>,
    seen: HashSet<String>,
}

impl Batch {
    fn push(mut self, level: Level) -> Self {
        // Levels without a GUID are keyed by name instead
        let key = if level.guid.is_empty() {
            level.name.clone()
        } else {
            level.guid.clone()
        };
        if self.seen.insert(key) {
            self.levels.push(level);
        } else {
            debug!("Skipping duplicate level {} ({})", level.name, level.guid);
        }
        self
    }
}

/// Parse a batch of blobs into levels ordered by level number.
///
/// Blobs whose name does not end in `"Level <n>"` are skipped. When two
/// blobs share a GUID the first one wins. Levels without a number sort last.
pub fn parse_levels<'a, I>(blobs: I) -> Vec<Level>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut rejected = 0usize;
    let batch = blobs
        .into_iter()
        .filter(|data| peek_name(data).is_some_and(|name| is_level_name(&name)))
        .filter_map(|data| {
            let level = parse_level(data);
            if level.is_none() {
                rejected += 1;
            }
            level
        })
        .fold(Batch::default(), Batch::push);

    let mut levels = batch.levels;
    levels.sort_by_key(|level| level_number(&level.name).unwrap_or(u32::MAX));

    if rejected > 0 {
        warn!("{} level blob(s) rejected by header checks", rejected);
    }
    info!("Parsed {} level(s)", levels.len());
    levels
}
