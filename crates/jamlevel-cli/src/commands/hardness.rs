//! Hardness command: duration and hardness from the level list asset.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use jamlevel::metadata::{GuidOrder, extract_hardness};
use owo_colors::OwoColorize;

pub fn run(container: &Path, guids: &Path, output: &Path) -> Result<()> {
    let order = GuidOrder::load(guids)
        .with_context(|| format!("Failed to load GUID order from {}", guids.display()))?;
    let data = fs::read(container)
        .with_context(|| format!("Failed to read {}", container.display()))?;

    let table = extract_hardness(&data, &order);
    table.save(output)?;

    let hard = table.iter().filter(|(_, e)| e.hardness == 1).count();
    let very_hard = table.iter().filter(|(_, e)| e.hardness == 2).count();
    eprintln!(
        "{} {} of {} level(s) -> {}",
        "Extracted".green().bold(),
        table.len(),
        order.len(),
        output.display()
    );
    eprintln!("  Hard: {}, VeryHard: {}", hard, very_hard);
    Ok(())
}
