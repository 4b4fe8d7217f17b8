//! Export of normalized levels.
//!
//! Levels are numbered by their position in the GUID order, not by the
//! number in their name: the play order and the editor names diverge.
//!
//! ## Example
//!
//! ```ignore
//! use jamlevel::export::{ExportConfig, build_levels, LevelsDocument};
//!
//! let config = ExportConfig::builder()
//!     .export_count(40)
//!     .build();
//! let levels = build_levels(&parsed, &order, &hardness, &config);
//! LevelsDocument::new(levels).save("levels.json")?;
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::level::Level;
use crate::metadata::{DEFAULT_DURATION_SECS, GuidOrder, HardnessTable};
use crate::normalize::{NormalizedLevel, normalize_with};

/// Number of leading levels whose output has been checked by hand
pub const DEFAULT_VERIFIED_LEVELS: u32 = 27;

/// Export settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Levels `1..=verified_levels` are covered by the regression snapshot
    pub verified_levels: u32,
    /// Export at most this many levels from the front of the GUID order
    pub export_count: Option<usize>,
    /// Duration for levels without a hardness entry
    pub default_duration: i32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            verified_levels: DEFAULT_VERIFIED_LEVELS,
            export_count: None,
            default_duration: DEFAULT_DURATION_SECS,
        }
    }
}

impl ExportConfig {
    pub fn builder() -> ExportConfigBuilder {
        ExportConfigBuilder::default()
    }
}

/// Builder for ExportConfig
#[derive(Debug, Clone, Default)]
pub struct ExportConfigBuilder {
    verified_levels: Option<u32>,
    export_count: Option<usize>,
    default_duration: Option<i32>,
}

impl ExportConfigBuilder {
    pub fn verified_levels(mut self, count: u32) -> Self {
        self.verified_levels = Some(count);
        self
    }

    /// Limit the export to the first `count` levels
    pub fn export_count(mut self, count: usize) -> Self {
        self.export_count = Some(count);
        self
    }

    pub fn default_duration(mut self, seconds: i32) -> Self {
        self.default_duration = Some(seconds);
        self
    }

    pub fn build(self) -> ExportConfig {
        let default = ExportConfig::default();
        ExportConfig {
            verified_levels: self.verified_levels.unwrap_or(default.verified_levels),
            export_count: self.export_count.or(default.export_count),
            default_duration: self.default_duration.unwrap_or(default.default_duration),
        }
    }
}

/// Join parsed levels with the GUID order and hardness table.
///
/// The level at position `i` of the order gets id `i + 1`. GUIDs with no
/// parsed level are skipped; their id is not reused.
pub fn build_levels(
    levels: &[Level],
    order: &GuidOrder,
    hardness: &HardnessTable,
    config: &ExportConfig,
) -> Vec<NormalizedLevel> {
    let by_guid: HashMap<&str, &Level> = levels.iter().map(|l| (l.guid.as_str(), l)).collect();
    let limit = config.export_count.unwrap_or(order.len());

    let mut missing = 0usize;
    let exported: Vec<NormalizedLevel> = order
        .iter()
        .take(limit)
        .enumerate()
        .filter_map(|(i, guid)| {
            let id = i as u32 + 1;
            let Some(level) = by_guid.get(guid) else {
                debug!("Level {}: GUID {} not found in parsed levels", id, guid);
                missing += 1;
                return None;
            };
            let meta = hardness.meta_for_or(guid, config.default_duration);
            Some(normalize_with(level, id, meta))
        })
        .collect();

    if missing > 0 {
        warn!("{} GUID(s) in the order have no parsed level", missing);
    }
    info!("Exported {} level(s)", exported.len());
    exported
}

/// The `{"levels": [...]}` output document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelsDocument {
    pub levels: Vec<NormalizedLevel>,
}

impl LevelsDocument {
    pub fn new(levels: Vec<NormalizedLevel>) -> Self {
        Self { levels }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!(
            "Wrote {} level(s) to {}",
            self.levels.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}

/// Load the parsed-levels JSON (an array of raw levels)
pub fn load_parsed_levels<P: AsRef<Path>>(path: P) -> Result<Vec<Level>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_parsed_levels<P: AsRef<Path>>(path: P, levels: &[Level]) -> Result<()> {
    let content = serde_json::to_string_pretty(levels)?;
    fs::write(&path, content)?;
    info!(
        "Saved {} parsed level(s) to {}",
        levels.len(),
        path.as_ref().display()
    );
    Ok(())
}
