//! Per-level door row corrections.
//!
//! A few levels place a side door half a cell off from where the generic
//! row rule puts it. Each entry matches one door exactly.

use crate::level::Edge;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorRowOverride {
    pub level: &'static str,
    pub edge: Edge,
    /// Door color
    pub color: i32,
    pub row_delta: i32,
}

pub const DOOR_ROW_OVERRIDES: &[DoorRowOverride] = &[
    DoorRowOverride {
        level: "Level 25",
        edge: Edge::Right,
        color: 0,
        row_delta: -1,
    },
    DoorRowOverride {
        level: "Level 36",
        edge: Edge::Left,
        color: 7,
        row_delta: -1,
    },
];

impl DoorRowOverride {
    pub fn matches(&self, level: &str, edge: Edge, color: i32) -> bool {
        self.level == level && self.edge == edge && self.color == color
    }
}

/// Row delta for a door, 0 when no override matches
pub fn door_row_delta(level: &str, edge: Edge, color: i32) -> i32 {
    DOOR_ROW_OVERRIDES
        .iter()
        .filter(|o| o.matches(level, edge, color))
        .map(|o| o.row_delta)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_door_row_delta_exact_match_only() {
        assert_eq!(door_row_delta("Level 25", Edge::Right, 0), -1);
        assert_eq!(door_row_delta("Level 36", Edge::Left, 7), -1);

        assert_eq!(door_row_delta("Level 25", Edge::Left, 0), 0);
        assert_eq!(door_row_delta("Level 25", Edge::Right, 1), 0);
        assert_eq!(door_row_delta("Level 250", Edge::Right, 0), 0);
        assert_eq!(door_row_delta("Derin Level 36", Edge::Left, 7), 0);
    }
}
