//! Verify command: regression check against the verified snapshot.

use std::path::Path;

use anyhow::{Context, Result, bail};
use jamlevel::export::LevelsDocument;
use jamlevel::regression::{compare, load_snapshot, save_snapshot, snapshot_from};
use owo_colors::OwoColorize;

/// Returns `true` when the export matches the snapshot
pub fn run(levels: &Path, snapshot: &Path, verified: u32, save: bool) -> Result<bool> {
    let document = LevelsDocument::load(levels)
        .with_context(|| format!("Failed to load {}", levels.display()))?;

    if save {
        let snap = snapshot_from(&document.levels, verified);
        save_snapshot(snapshot, &snap)?;
        eprintln!(
            "{} snapshot of {} level(s) -> {}",
            "Saved".green().bold(),
            snap.len(),
            snapshot.display()
        );
        return Ok(true);
    }

    let reference = match load_snapshot(snapshot) {
        Ok(s) => s,
        Err(e) if e.is_not_found() => {
            bail!("{} (run `jamlevel verify --save` to create it)", e)
        }
        Err(e) => return Err(e).context("Failed to load snapshot"),
    };

    let diffs = compare(&reference, &document.levels, verified);
    if diffs.is_empty() {
        eprintln!(
            "{} levels 1-{} match the snapshot",
            "OK".green().bold(),
            verified
        );
        return Ok(true);
    }

    for diff in &diffs {
        eprintln!("  {} {}", "-".red(), diff);
    }
    let mut affected: Vec<u32> = diffs.iter().map(|d| d.level_id()).collect();
    affected.dedup();
    eprintln!(
        "{} {} difference(s) in {} level(s)",
        "FAILED".red().bold(),
        diffs.len(),
        affected.len()
    );
    Ok(false)
}
