//! Parse command: blobs to the raw levels JSON.

use std::path::Path;

use anyhow::{Context, Result, bail};
use jamlevel::assembler::{BlobSource, parse_levels};
use jamlevel::export::save_parsed_levels;
use owo_colors::OwoColorize;

pub fn run(input: &Path, output: &Path) -> Result<()> {
    let source = BlobSource::from_path(input);
    let blobs = source
        .load()
        .with_context(|| format!("Failed to read blobs from {}", input.display()))?;
    if blobs.is_empty() {
        bail!("No level blobs found in {}", input.display());
    }

    let levels = parse_levels(blobs.iter().map(Vec::as_slice));
    save_parsed_levels(output, &levels)?;

    let trimmed = levels.iter().filter(|l| l.removed_top_rows > 0).count();
    let without_blocks = levels.iter().filter(|l| l.game_blocks.is_empty()).count();

    eprintln!(
        "{} {} level(s) from {} blob(s) -> {}",
        "Parsed".green().bold(),
        levels.len(),
        blobs.len(),
        output.display()
    );
    if trimmed > 0 {
        eprintln!("  {} level(s) with hidden top rows trimmed", trimmed);
    }
    if without_blocks > 0 {
        eprintln!(
            "  {} {} level(s) without game blocks",
            "warning:".yellow().bold(),
            without_blocks
        );
    }
    Ok(())
}
