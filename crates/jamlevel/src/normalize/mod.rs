//! Grid normalizer: world-space levels to the grid-space output format.
//!
//! The transform itself is [`world_to_grid`]. On top of it sit a handful of
//! correction rules learned from the shipped levels:
//! - L shapes rotated 270° anchor half a cell higher on tall grids
//! - ShortL pieces rotated 180° below the center need a row offset when the
//!   level has hidden cells
//! - side doors snap one column inward when their edge column is masked
//! - a short table of per-level door row overrides

mod overrides;
mod rounding;

use serde::{Deserialize, Serialize};

use crate::level::{BlockRecord, DoorRecord, Edge, GroupType, Level, MoveDirection};
use crate::locator::DoorThresholds;
use crate::metadata::{HardnessTable, LevelMeta};

pub use overrides::{DOOR_ROW_OVERRIDES, DoorRowOverride, door_row_delta};
pub use rounding::{is_half_cell, raw_col, raw_row, round_half_up, world_to_grid};

/// |coordinate| below which a door counts as centered on its edge
const CENTERED_DOOR_EPSILON: f64 = 0.5;
/// Side doors below this world y anchor on their lower half
const LOW_DOOR_Y: f64 = -2.0;

const L_ANCHOR_ROTATION: i32 = 3;
const L_ANCHOR_MIN_HEIGHT: i32 = 12;

const SHORT_L_OFFSET_ROTATION: i32 = 2;
const SHORT_L_OFFSET_MAX_Y: f64 = -2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedBlock {
    pub block_type: i32,
    pub block_group_type: i32,
    pub grid_row: i32,
    pub grid_col: i32,
    /// Quarter turns, 0..=3
    pub rotation_z: i32,
    pub needs_row_offset: bool,
    pub move_direction: MoveDirection,
    pub inner_block_type: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedDoor {
    pub block_type: i32,
    pub part_count: i32,
    pub edge: Edge,
    /// -1 for top doors, `gridHeight` for bottom doors
    pub start_row: i32,
    pub start_col: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedHiddenCell {
    pub row: i32,
    pub col: i32,
}

/// Level in grid coordinates, row 0 at the top
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedLevel {
    pub id: u32,
    pub name: String,
    pub grid_width: i32,
    pub grid_height: i32,
    pub blocks: Vec<NormalizedBlock>,
    pub doors: Vec<NormalizedDoor>,
    pub hidden_cells: Vec<NormalizedHiddenCell>,
    /// Time limit in seconds
    pub duration: i32,
    pub hardness: i32,
}

/// Normalize a level, taking duration and hardness from the table
pub fn normalize(level: &Level, id: u32, hardness: &HardnessTable) -> NormalizedLevel {
    normalize_with(level, id, hardness.meta_for(&level.guid))
}

/// Normalize a level with explicit metadata
pub fn normalize_with(level: &Level, id: u32, meta: LevelMeta) -> NormalizedLevel {
    let width = level.width();
    let thresholds = DoorThresholds::new(
        width,
        level.original_grid_height,
        level.column_mostly_hidden(0),
        level.column_mostly_hidden(width - 1),
    );

    NormalizedLevel {
        id,
        name: level.name.clone(),
        grid_width: width,
        grid_height: level.height(),
        blocks: level
            .game_blocks
            .iter()
            .map(|b| normalize_block(level, b))
            .collect(),
        doors: level
            .doors
            .iter()
            .map(|d| normalize_door(level, &thresholds, d))
            .collect(),
        hidden_cells: level
            .hidden_coords
            .iter()
            .filter(|c| (0..level.width()).contains(&c.x) && (0..level.height()).contains(&c.y))
            .map(|c| NormalizedHiddenCell {
                row: level.height() - 1 - c.y,
                col: c.x,
            })
            .collect(),
        duration: meta.duration,
        hardness: meta.hardness as i32,
    }
}

fn normalize_block(level: &Level, block: &BlockRecord) -> NormalizedBlock {
    let height = level.original_grid_height;
    let rotation_z = block.rotation_index();
    let group = block.group();
    let y = block.position.y;

    let raw = raw_row(y, height);
    let l_anchor = group.is_some_and(|g| g.is_l_shape())
        && rotation_z == L_ANCHOR_ROTATION
        && height >= L_ANCHOR_MIN_HEIGHT
        && is_half_cell(raw);
    let row = if l_anchor {
        raw.floor() as i32
    } else {
        round_half_up(raw)
    };

    let needs_row_offset = group == Some(GroupType::ShortL)
        && rotation_z == SHORT_L_OFFSET_ROTATION
        && level.has_hidden_cells()
        && y < SHORT_L_OFFSET_MAX_Y;

    NormalizedBlock {
        block_type: block.block_type,
        block_group_type: block.block_group_type,
        grid_row: row - level.removed_top_rows,
        grid_col: round_half_up(raw_col(block.position.x, level.width())),
        rotation_z,
        needs_row_offset,
        move_direction: block.move_direction,
        inner_block_type: block.inner_block_type,
    }
}

fn normalize_door(level: &Level, thresholds: &DoorThresholds, door: &DoorRecord) -> NormalizedDoor {
    let (x, y) = (door.position.x, door.position.y);
    let parts = door.door_part_count;
    let width = level.width();
    let edge = thresholds.edge(x, y);

    let (start_row, start_col) = match edge {
        Edge::Left | Edge::Right => {
            let row = side_door_row(y, parts, level.original_grid_height) - level.removed_top_rows
                + door_row_delta(&level.name, edge, door.block_type);
            (row, side_door_col(level, edge))
        }
        Edge::Top => (-1, top_bottom_door_col(x, parts, width)),
        Edge::Bottom => (level.height(), top_bottom_door_col(x, parts, width)),
    };

    NormalizedDoor {
        block_type: door.block_type,
        part_count: parts,
        edge,
        start_row,
        start_col,
    }
}

/// First row covered by a side door, on the untrimmed grid
fn side_door_row(y: f64, parts: i32, height: i32) -> i32 {
    let row = if y.abs() < CENTERED_DOOR_EPSILON {
        (height - parts).div_euclid(2)
    } else {
        let center = round_half_up(raw_row(y, height));
        if y < LOW_DOOR_Y {
            center - (parts - 1).div_euclid(2)
        } else {
            center - parts.div_euclid(2)
        }
    };
    row.min(height - parts).max(0)
}

fn side_door_col(level: &Level, edge: Edge) -> i32 {
    let width = level.width();
    match edge {
        Edge::Left if level.column_mostly_hidden(0) => 1,
        Edge::Left => 0,
        _ if level.column_mostly_hidden(width - 1) => width - 2,
        _ => width - 1,
    }
}

fn top_bottom_door_col(x: f64, parts: i32, width: i32) -> i32 {
    let col = if x.abs() < CENTERED_DOOR_EPSILON {
        (width - parts).div_euclid(2)
    } else {
        round_half_up(raw_col(x, width)) - parts.div_euclid(2)
    };
    col.min(width - parts).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::parse_level;
    use crate::blob::mock::{DEFAULT_GUID, MockBlobBuilder, MockBlock, MockDoor};
    use crate::level::{Camera, GridSize, Hardness, HiddenCell, Vec3};
    use crate::metadata::{DEFAULT_DURATION_SECS, HardnessEntry};

    fn level(width: i32, height: i32) -> Level {
        Level {
            name: "Level 7".to_string(),
            guid: "guid-7".to_string(),
            grid_size: GridSize::new(width, height).unwrap(),
            camera: Camera::default(),
            hidden_coords: Vec::new(),
            doors: Vec::new(),
            game_blocks: Vec::new(),
            frame_elements: Vec::new(),
            original_grid_height: height,
            removed_top_rows: 0,
        }
    }

    fn block(x: f64, y: f64, rot_z: f64, group: i32) -> BlockRecord {
        BlockRecord {
            position: Vec3::new(x, y, 0.0),
            rotation: Vec3::new(0.0, 0.0, rot_z),
            block_group_type: group,
            block_type: 1,
            move_direction: MoveDirection::Both,
            inner_block_type: -1,
        }
    }

    fn door(x: f64, y: f64, parts: i32, color: i32) -> DoorRecord {
        DoorRecord {
            position: Vec3::new(x, y, 0.0),
            rotation: Vec3::default(),
            door_part_count: parts,
            block_type: color,
        }
    }

    fn normalized(level: &Level) -> NormalizedLevel {
        normalize_with(level, 1, LevelMeta::default())
    }

    #[test]
    fn test_end_to_end_from_blob() {
        let blob = MockBlobBuilder::new("Level 1", 5, 6)
            .block(MockBlock {
                x: 0.0,
                y: 0.0,
                group: 0,
                color: 2,
                ..Default::default()
            })
            .door(MockDoor {
                x: 6.0,
                y: 0.0,
                parts: 2,
                color: 2,
                ..Default::default()
            })
            .build();
        let level = parse_level(&blob).unwrap();
        let out = normalized(&level);

        assert_eq!((out.grid_width, out.grid_height), (5, 6));
        assert_eq!(out.blocks.len(), 1);
        // Row 2.5 is a tie and rounds up
        assert_eq!(out.blocks[0].grid_row, 3);
        assert_eq!(out.blocks[0].grid_col, 2);
        assert_eq!(out.blocks[0].rotation_z, 0);

        assert_eq!(out.doors.len(), 1);
        let d = &out.doors[0];
        assert_eq!(d.edge, Edge::Right);
        assert_eq!(d.start_col, 4);
        assert_eq!(d.start_row, 2);
        assert_eq!(d.part_count, 2);
    }

    #[test]
    fn test_trimmed_level_shifts_rows() {
        let mut lvl = level(5, 6);
        lvl.hidden_coords = (0..5).map(|x| HiddenCell { x, y: 5 }).collect();
        lvl.hidden_coords.push(HiddenCell { x: 1, y: 0 });
        lvl.game_blocks.push(block(0.0, -1.0, 0.0, 0));
        lvl.doors.push(door(-6.0, 0.0, 2, 4));
        lvl.trim_hidden_top_rows();

        let out = normalized(&lvl);
        assert_eq!(out.grid_height, 5);
        assert_eq!(out.blocks[0].grid_row, 2);
        assert_eq!(out.hidden_cells, vec![NormalizedHiddenCell { row: 4, col: 1 }]);
        // Centered on the untrimmed grid, then shifted up by the trimmed row
        assert_eq!(out.doors[0].start_row, 1);
        assert_eq!(out.doors[0].start_col, 0);
    }

    #[test]
    fn test_hidden_cells_outside_grid_are_skipped() {
        let mut lvl = level(5, 6);
        lvl.hidden_coords = vec![
            HiddenCell { x: 0, y: i32::MIN },
            HiddenCell { x: i32::MAX, y: 0 },
            HiddenCell { x: 2, y: 0 },
        ];

        let out = normalized(&lvl);
        assert_eq!(out.hidden_cells, vec![NormalizedHiddenCell { row: 5, col: 2 }]);
    }

    #[test]
    fn test_l_shape_anchor_on_tall_grid() {
        let mut tall = level(7, 12);
        tall.game_blocks.push(block(0.0, 0.0, 270.0, GroupType::L as i32));
        tall.game_blocks.push(block(0.0, 0.0, 270.0, GroupType::ReverseL as i32));
        tall.game_blocks.push(block(0.0, 0.0, 0.0, GroupType::L as i32));
        tall.game_blocks.push(block(0.0, 0.0, 270.0, GroupType::Two as i32));
        let rows: Vec<i32> = normalized(&tall).blocks.iter().map(|b| b.grid_row).collect();
        assert_eq!(rows, vec![5, 5, 6, 6]);

        let mut short = level(7, 10);
        short.game_blocks.push(block(0.0, 0.0, 270.0, GroupType::L as i32));
        assert_eq!(normalized(&short).blocks[0].grid_row, 5);
    }

    #[test]
    fn test_short_l_row_offset() {
        let mut lvl = level(5, 8);
        lvl.hidden_coords.push(HiddenCell { x: 0, y: 0 });
        lvl.game_blocks.push(block(0.0, -3.0, 180.0, GroupType::ShortL as i32));
        lvl.game_blocks.push(block(0.0, -1.0, 180.0, GroupType::ShortL as i32));
        lvl.game_blocks.push(block(0.0, -3.0, 0.0, GroupType::ShortL as i32));
        let flags: Vec<bool> = normalized(&lvl).blocks.iter().map(|b| b.needs_row_offset).collect();
        assert_eq!(flags, vec![true, false, false]);

        lvl.hidden_coords.clear();
        assert!(!normalized(&lvl).blocks[0].needs_row_offset);
    }

    #[test]
    fn test_side_door_rows() {
        assert_eq!(side_door_row(0.0, 2, 6), 2);
        assert_eq!(side_door_row(0.2, 3, 6), 1);
        // Below -2 the door anchors on its lower half
        assert_eq!(side_door_row(-3.0, 2, 6), 4);
        assert_eq!(side_door_row(-1.0, 1, 6), 3);
        assert_eq!(side_door_row(3.0, 3, 6), 0);
        // Clamped to the grid
        assert_eq!(side_door_row(-5.0, 3, 6), 3);
        assert_eq!(side_door_row(9.0, 2, 6), 0);
        assert_eq!(side_door_row(0.0, 4, 3), 0);
    }

    #[test]
    fn test_top_and_bottom_doors() {
        let mut lvl = level(5, 6);
        lvl.doors.push(door(1.0, 7.0, 1, 3));
        lvl.doors.push(door(0.0, -7.0, 3, 2));
        lvl.doors.push(door(4.5, 7.0, 3, 1));
        let out = normalized(&lvl);

        assert_eq!(out.doors[0].edge, Edge::Top);
        assert_eq!((out.doors[0].start_row, out.doors[0].start_col), (-1, 3));
        assert_eq!(out.doors[1].edge, Edge::Bottom);
        assert_eq!((out.doors[1].start_row, out.doors[1].start_col), (6, 1));
        assert_eq!(out.doors[2].start_col, 2);
    }

    #[test]
    fn test_side_door_column_moves_inward_for_hidden_edge() {
        let mut lvl = level(5, 6);
        lvl.hidden_coords = (0..4).map(|y| HiddenCell { x: 4, y }).collect();
        lvl.doors.push(door(4.9, 0.0, 1, 3));
        lvl.doors.push(door(-6.0, 0.0, 1, 3));
        let out = normalized(&lvl);

        assert_eq!(out.doors[0].edge, Edge::Right);
        assert_eq!(out.doors[0].start_col, 3);
        assert_eq!(out.doors[1].edge, Edge::Left);
        assert_eq!(out.doors[1].start_col, 0);
    }

    #[test]
    fn test_door_row_override_applied() {
        let mut lvl = level(5, 6);
        lvl.name = "Level 25".to_string();
        lvl.doors.push(door(6.0, 0.0, 2, 0));
        lvl.doors.push(door(6.0, 4.0, 2, 1));
        lvl.doors.push(door(-6.0, 0.0, 2, 0));
        let out = normalized(&lvl);

        assert_eq!(out.doors[0].start_row, 1);
        assert_eq!(out.doors[1].start_row, 0);
        assert_eq!(out.doors[2].start_row, 2);
    }

    #[test]
    fn test_hardness_merge_and_defaults() {
        let mut table = HardnessTable::default();
        table.insert("guid-7", HardnessEntry::new(150, Hardness::VeryHard));

        let known = normalize(&level(5, 6), 3, &table);
        assert_eq!(known.id, 3);
        assert_eq!(known.duration, 150);
        assert_eq!(known.hardness, 2);

        let mut other = level(5, 6);
        other.guid = DEFAULT_GUID.to_string();
        let unknown = normalize(&other, 4, &table);
        assert_eq!(unknown.duration, DEFAULT_DURATION_SECS);
        assert_eq!(unknown.hardness, 0);
    }

    #[test]
    fn test_output_json_field_names() {
        let mut lvl = level(5, 6);
        lvl.game_blocks.push(block(0.0, 0.0, 90.0, 1));
        lvl.doors.push(door(6.0, 0.0, 2, 3));
        lvl.hidden_coords.push(HiddenCell { x: 0, y: 0 });
        let value = serde_json::to_value(normalized(&lvl)).unwrap();

        assert_eq!(value["gridWidth"], 5);
        assert_eq!(value["gridHeight"], 6);
        assert_eq!(value["blocks"][0]["gridRow"], 3);
        assert_eq!(value["blocks"][0]["rotationZ"], 1);
        assert_eq!(value["blocks"][0]["needsRowOffset"], false);
        assert_eq!(value["blocks"][0]["moveDirection"], "both");
        assert_eq!(value["blocks"][0]["innerBlockType"], -1);
        assert_eq!(value["doors"][0]["edge"], "right");
        assert_eq!(value["doors"][0]["startRow"], 2);
        assert_eq!(value["doors"][0]["partCount"], 2);
        assert_eq!(value["hiddenCells"][0]["row"], 5);
        assert_eq!(value["duration"], 120);
        assert_eq!(value["hardness"], 0);
    }
}
