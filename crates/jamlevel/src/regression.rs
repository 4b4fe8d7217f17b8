//! Regression guard for the export.
//!
//! A snapshot holds the hand-verified output of the first levels, keyed by
//! level id. Comparing a fresh export against it catches heuristic drift:
//! any change to a verified level is reported field by field.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::normalize::{NormalizedBlock, NormalizedDoor, NormalizedLevel};

/// Verified levels keyed by id (`"1"`, `"2"`, ...)
pub type Snapshot = BTreeMap<String, NormalizedLevel>;

/// Which side of the comparison lacks a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Reference,
    Current,
}

/// Part of a level a difference was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Level,
    /// 1-based block index
    Block(usize),
    /// 1-based door index
    Door(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: &'static str,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.field, self.expected, self.actual)
    }
}

/// One difference between the snapshot and the current export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diff {
    Missing {
        id: u32,
        side: Side,
    },
    Changed {
        id: u32,
        subject: Subject,
        changes: Vec<FieldChange>,
    },
}

impl Diff {
    pub fn level_id(&self) -> u32 {
        match self {
            Diff::Missing { id, .. } | Diff::Changed { id, .. } => *id,
        }
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diff::Missing { id, side } => {
                let where_ = match side {
                    Side::Reference => "snapshot",
                    Side::Current => "current export",
                };
                write!(f, "Level {}: missing in {}", id, where_)
            }
            Diff::Changed {
                id,
                subject,
                changes,
            } => {
                match subject {
                    Subject::Level => write!(f, "Level {}: ", id)?,
                    Subject::Block(i) => write!(f, "Level {}, Block {}: ", id, i)?,
                    Subject::Door(i) => write!(f, "Level {}, Door {}: ", id, i)?,
                }
                let parts: Vec<String> = changes.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

#[derive(Default)]
struct Changes(Vec<FieldChange>);

impl Changes {
    fn check<T: PartialEq + fmt::Display>(
        &mut self,
        field: &'static str,
        expected: &T,
        actual: &T,
    ) {
        if expected != actual {
            self.0.push(FieldChange {
                field,
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
    }
}

fn compare_block(expected: &NormalizedBlock, actual: &NormalizedBlock) -> Vec<FieldChange> {
    let mut c = Changes::default();
    c.check("blockType", &expected.block_type, &actual.block_type);
    c.check("gridRow", &expected.grid_row, &actual.grid_row);
    c.check("gridCol", &expected.grid_col, &actual.grid_col);
    c.check("rotationZ", &expected.rotation_z, &actual.rotation_z);
    c.0
}

fn compare_door(expected: &NormalizedDoor, actual: &NormalizedDoor) -> Vec<FieldChange> {
    let mut c = Changes::default();
    c.check("blockType", &expected.block_type, &actual.block_type);
    c.check("partCount", &expected.part_count, &actual.part_count);
    c.check("edge", &expected.edge, &actual.edge);
    c.check("startRow", &expected.start_row, &actual.start_row);
    c.check("startCol", &expected.start_col, &actual.start_col);
    c.0
}

/// Compare one level; element fields are only compared when counts match
pub fn compare_level(expected: &NormalizedLevel, actual: &NormalizedLevel) -> Vec<Diff> {
    let id = expected.id;
    let mut diffs = Vec::new();

    let level_fields = [
        ("gridWidth", expected.grid_width.to_string(), actual.grid_width.to_string()),
        ("gridHeight", expected.grid_height.to_string(), actual.grid_height.to_string()),
        ("name", expected.name.clone(), actual.name.clone()),
        ("blocks count", expected.blocks.len().to_string(), actual.blocks.len().to_string()),
        ("doors count", expected.doors.len().to_string(), actual.doors.len().to_string()),
    ];
    for (field, exp, act) in level_fields {
        let mut c = Changes::default();
        c.check(field, &exp, &act);
        if !c.0.is_empty() {
            diffs.push(Diff::Changed {
                id,
                subject: Subject::Level,
                changes: c.0,
            });
        }
    }

    if expected.blocks.len() == actual.blocks.len() {
        for (i, (e, a)) in expected.blocks.iter().zip(&actual.blocks).enumerate() {
            let changes = compare_block(e, a);
            if !changes.is_empty() {
                diffs.push(Diff::Changed {
                    id,
                    subject: Subject::Block(i + 1),
                    changes,
                });
            }
        }
    }

    if expected.doors.len() == actual.doors.len() {
        for (i, (e, a)) in expected.doors.iter().zip(&actual.doors).enumerate() {
            let changes = compare_door(e, a);
            if !changes.is_empty() {
                diffs.push(Diff::Changed {
                    id,
                    subject: Subject::Door(i + 1),
                    changes,
                });
            }
        }
    }

    diffs
}

/// Compare levels `1..=verified` of the current export against the snapshot
pub fn compare(reference: &Snapshot, current: &[NormalizedLevel], verified: u32) -> Vec<Diff> {
    let current_by_id: HashMap<u32, &NormalizedLevel> =
        current.iter().map(|l| (l.id, l)).collect();

    let diffs: Vec<Diff> = (1..=verified)
        .flat_map(|id| match (reference.get(&id.to_string()), current_by_id.get(&id)) {
            (Some(expected), Some(actual)) => compare_level(expected, actual),
            (Some(_), None) => vec![Diff::Missing {
                id,
                side: Side::Current,
            }],
            (None, Some(_)) => vec![Diff::Missing {
                id,
                side: Side::Reference,
            }],
            (None, None) => Vec::new(),
        })
        .collect();

    debug!("Compared {} level(s): {} difference(s)", verified, diffs.len());
    diffs
}

/// Snapshot of the verified levels of an export
pub fn snapshot_from(levels: &[NormalizedLevel], verified: u32) -> Snapshot {
    levels
        .iter()
        .filter(|l| (1..=verified).contains(&l.id))
        .map(|l| (l.id.to_string(), l.clone()))
        .collect()
}

pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::SnapshotNotFound(path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    let snapshot: Snapshot = serde_json::from_str(&content)?;
    debug!("Loaded snapshot with {} level(s)", snapshot.len());
    Ok(snapshot)
}

pub fn save_snapshot<P: AsRef<Path>>(path: P, snapshot: &Snapshot) -> Result<()> {
    let content = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, content)?;
    info!(
        "Saved snapshot of {} level(s) to {}",
        snapshot.len(),
        path.as_ref().display()
    );
    Ok(())
}
