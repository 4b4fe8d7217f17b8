//! Export command: parsed levels to the game's levels JSON.

use std::path::Path;

use anyhow::{Context, Result};
use jamlevel::export::{ExportConfig, LevelsDocument, build_levels, load_parsed_levels};
use jamlevel::metadata::{GuidOrder, HardnessTable};
use owo_colors::OwoColorize;
use tracing::warn;

pub struct ExportPaths<'a> {
    pub parsed: &'a Path,
    pub guids: &'a Path,
    pub hardness: &'a Path,
    pub output: &'a Path,
}

pub fn run(paths: &ExportPaths, config: &ExportConfig) -> Result<()> {
    let parsed = load_parsed_levels(paths.parsed)
        .with_context(|| format!("Failed to load parsed levels from {}", paths.parsed.display()))?;
    let order = GuidOrder::load(paths.guids)
        .with_context(|| format!("Failed to load GUID order from {}", paths.guids.display()))?;

    let hardness = match HardnessTable::load(paths.hardness) {
        Ok(table) => table,
        Err(e) if e.is_not_found() => {
            warn!(
                "No hardness table at {}, using defaults",
                paths.hardness.display()
            );
            HardnessTable::default()
        }
        Err(e) => return Err(e).context("Failed to load hardness table"),
    };

    let levels = build_levels(&parsed, &order, &hardness, config);
    let document = LevelsDocument::new(levels);
    document.save(paths.output)?;

    eprintln!(
        "{} {} level(s) -> {}",
        "Exported".green().bold(),
        document.levels.len(),
        paths.output.display()
    );
    Ok(())
}
