//! Level metadata: the GUID play order and per-level hardness/duration.
//!
//! The level list asset stores, for each level, a small settings record
//! followed by the level's GUID string. The record sits in front of the
//! *next* level's GUID, so entry `n` is read before `GUID[n + 1]`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use memchr::memmem;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::blob::BlobReader;
use crate::blob::layout::hardness;
use crate::error::{Error, Result};
use crate::level::Hardness;

/// Time limit used when a level has no hardness entry
pub const DEFAULT_DURATION_SECS: i32 = 120;

/// Occurrence of the GUID string that is preceded by the settings record
const SETTINGS_OCCURRENCE: usize = 1;

/// Duration and hardness of one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelMeta {
    pub duration: i32,
    pub hardness: Hardness,
}

impl Default for LevelMeta {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION_SECS,
            hardness: Hardness::Normal,
        }
    }
}

/// Level GUIDs in play order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidOrder {
    pub level_guids: Vec<String>,
}

impl GuidOrder {
    pub fn new(level_guids: Vec<String>) -> Self {
        Self { level_guids }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let order: GuidOrder = serde_json::from_str(&content)?;
        debug!("Loaded {} GUID(s) from {}", order.len(), path.display());
        Ok(order)
    }

    pub fn len(&self) -> usize {
        self.level_guids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.level_guids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.level_guids.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardnessEntry {
    /// Seconds
    pub duration: i32,
    pub hardness: i32,
    pub hardness_type: String,
}

impl HardnessEntry {
    pub fn new(duration: i32, hardness: Hardness) -> Self {
        Self {
            duration,
            hardness: hardness as i32,
            hardness_type: hardness.name().to_string(),
        }
    }

    pub fn level_hardness(&self) -> Result<Hardness> {
        Hardness::from_i32(self.hardness).ok_or(Error::UnknownHardness(self.hardness))
    }
}

/// Hardness entries keyed by level GUID
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HardnessTable {
    entries: BTreeMap<String, HardnessEntry>,
}

impl HardnessTable {
    pub fn insert(&mut self, guid: impl Into<String>, entry: HardnessEntry) {
        self.entries.insert(guid.into(), entry);
    }

    pub fn get(&self, guid: &str) -> Option<&HardnessEntry> {
        self.entries.get(guid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &HardnessEntry)> {
        self.entries.iter()
    }

    /// Metadata for a level, with the default duration when absent
    pub fn meta_for(&self, guid: &str) -> LevelMeta {
        self.meta_for_or(guid, DEFAULT_DURATION_SECS)
    }

    /// Metadata for a level, falling back to `default_duration` seconds
    pub fn meta_for_or(&self, guid: &str, default_duration: i32) -> LevelMeta {
        let Some(entry) = self.get(guid) else {
            return LevelMeta {
                duration: default_duration,
                hardness: Hardness::Normal,
            };
        };

        let hardness = entry.level_hardness().unwrap_or_else(|e| {
            warn!("{}: {}, using Normal", guid, e);
            Hardness::Normal
        });
        LevelMeta {
            duration: entry.duration,
            hardness,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let table: HardnessTable = serde_json::from_str(&content)?;
        debug!("Loaded {} hardness entries from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!(
            "Saved {} hardness entries to {}",
            self.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}

/// Settings record in front of the second occurrence of `guid`
fn settings_before(data: &[u8], guid: &str) -> Option<LevelMeta> {
    let pos = memmem::find_iter(data, guid.as_bytes()).nth(SETTINGS_OCCURRENCE)?;
    let start = pos.checked_sub(hardness::PREFIX_SIZE)?;
    let reader = BlobReader::new(&data[start..pos]);

    if reader.read_i32(hardness::GUID_LENGTH) != hardness::GUID_TEXT_LEN {
        return None;
    }
    let hardness = Hardness::from_i32(reader.read_i32(hardness::HARDNESS))?;
    Some(LevelMeta {
        duration: reader.read_f32(hardness::DURATION) as i32,
        hardness,
    })
}

/// Extract the hardness table from the level list asset.
///
/// The last level in the order has no following GUID and gets no entry.
pub fn extract_hardness(container: &[u8], order: &GuidOrder) -> HardnessTable {
    let mut table = HardnessTable::default();

    for pair in order.level_guids.windows(2) {
        let (guid, next) = (&pair[0], &pair[1]);
        match settings_before(container, next) {
            Some(meta) => {
                table.insert(guid.clone(), HardnessEntry::new(meta.duration, meta.hardness))
            }
            None => debug!("No settings record for {}", guid),
        }
    }

    let hard = table.iter().filter(|(_, e)| e.hardness > 0).count();
    info!(
        "Extracted hardness for {} of {} level(s) ({} hard or very hard)",
        table.len(),
        order.len(),
        hard
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::mock::{put_f32, put_i32};

    const GUIDS: [&str; 3] = [
        "11111111-1111-1111-1111-111111111111",
        "22222222-2222-2222-2222-222222222222",
        "33333333-3333-3333-3333-333333333333",
    ];

    /// First occurrence bare, second preceded by a settings record
    fn push_guid(buf: &mut Vec<u8>, guid: &str, duration: f32, level_hardness: i32) {
        buf.extend_from_slice(&[0u8; 8]);
        buf.extend_from_slice(guid.as_bytes());

        let start = buf.len();
        buf.extend_from_slice(&[0u8; 16]);
        put_f32(buf, start, duration);
        put_f32(buf, start + 4, duration);
        put_i32(buf, start + 8, level_hardness);
        put_i32(buf, start + 12, 36);
        buf.extend_from_slice(guid.as_bytes());
    }

    fn order() -> GuidOrder {
        GuidOrder::new(GUIDS.iter().map(|g| g.to_string()).collect())
    }

    #[test]
    fn test_extract_uses_next_guid_record() {
        let mut container = Vec::new();
        push_guid(&mut container, GUIDS[0], 999.0, 2);
        push_guid(&mut container, GUIDS[1], 90.0, 0);
        push_guid(&mut container, GUIDS[2], 150.5, 1);

        let table = extract_hardness(&container, &order());
        assert_eq!(table.len(), 2);

        let first = table.get(GUIDS[0]).unwrap();
        assert_eq!(first.duration, 90);
        assert_eq!(first.hardness, 0);
        assert_eq!(first.hardness_type, "Normal");

        let second = table.get(GUIDS[1]).unwrap();
        assert_eq!(second.duration, 150);
        assert_eq!(second.hardness, 1);
        assert_eq!(second.hardness_type, "Hard");

        assert!(table.get(GUIDS[2]).is_none());
    }

    #[test]
    fn test_extract_rejects_bad_records() {
        let mut container = Vec::new();
        push_guid(&mut container, GUIDS[0], 120.0, 0);
        push_guid(&mut container, GUIDS[1], 120.0, 7);
        // Only one occurrence of the third GUID
        container.extend_from_slice(GUIDS[2].as_bytes());

        let table = extract_hardness(&container, &order());
        assert!(table.is_empty());
    }

    #[test]
    fn test_meta_for_defaults() {
        let mut table = HardnessTable::default();
        table.insert(GUIDS[0], HardnessEntry::new(200, Hardness::VeryHard));
        table.insert(
            GUIDS[1],
            HardnessEntry {
                duration: 60,
                hardness: 9,
                hardness_type: "Unknown".to_string(),
            },
        );

        assert_eq!(
            table.meta_for(GUIDS[0]),
            LevelMeta {
                duration: 200,
                hardness: Hardness::VeryHard
            }
        );
        assert_eq!(table.meta_for(GUIDS[1]).hardness, Hardness::Normal);
        assert_eq!(table.meta_for(GUIDS[2]), LevelMeta::default());
        assert_eq!(table.meta_for_or(GUIDS[2], 90).duration, 90);
    }

    #[test]
    fn test_hardness_table_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level_hardness.json");

        let mut table = HardnessTable::default();
        table.insert(GUIDS[1], HardnessEntry::new(90, Hardness::Hard));
        table.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"hardnessType\": \"Hard\""));

        let loaded = HardnessTable::load(&path).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_guid_order_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guids.json");
        fs::write(&path, r#"{"level_guids": ["a", "b"]}"#).unwrap();

        let order = GuidOrder::load(&path).unwrap();
        assert_eq!(order.iter().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(GuidOrder::load(dir.path().join("missing.json")).unwrap_err().is_not_found());
    }
}
