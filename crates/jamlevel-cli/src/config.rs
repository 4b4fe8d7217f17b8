//! CLI configuration file (`jamlevel.toml`).
//!
//! ```toml
//! [paths]
//! container = "Data/sharedassets2.assets"
//! guids = "level_data/AllLevels_guids.json"
//!
//! [export]
//! verified_levels = 27
//! export_count = 40
//! ```
//!
//! Every key is optional. Command-line flags take precedence.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jamlevel::export::{DEFAULT_VERIFIED_LEVELS, ExportConfig};
use jamlevel::metadata::DEFAULT_DURATION_SECS;
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Paths {
    /// Asset container, or a directory of raw blob dumps
    pub container: PathBuf,
    pub guids: PathBuf,
    pub hardness: PathBuf,
    pub parsed: PathBuf,
    pub output: PathBuf,
    pub snapshot: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            container: PathBuf::from("Data/sharedassets2.assets"),
            guids: PathBuf::from("level_data/AllLevels_guids.json"),
            hardness: PathBuf::from("level_data/level_hardness.json"),
            parsed: PathBuf::from("level_data/parsed_levels.json"),
            output: PathBuf::from("levels.json"),
            snapshot: PathBuf::from("level_data/verified_snapshot.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    pub verified_levels: u32,
    pub export_count: Option<usize>,
    pub default_duration: i32,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            verified_levels: DEFAULT_VERIFIED_LEVELS,
            export_count: None,
            default_duration: DEFAULT_DURATION_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub paths: Paths,
    pub export: ExportSection,
}

impl CliConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load the config file, falling back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Export settings, with `count` overriding the file's `export_count`
    pub fn export_config(&self, count: Option<usize>) -> ExportConfig {
        let mut builder = ExportConfig::builder()
            .verified_levels(self.export.verified_levels)
            .default_duration(self.export.default_duration);
        if let Some(count) = count.or(self.export.export_count) {
            builder = builder.export_count(count);
        }
        builder.build()
    }

    /// Number of snapshot-verified levels, with `flag` overriding the file
    pub fn verified_levels(&self, flag: Option<u32>) -> u32 {
        flag.unwrap_or(self.export_config(None).verified_levels)
    }
}
