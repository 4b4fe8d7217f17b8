//! Inspect command: header summary, located arrays and a hexdump of one blob.
//!
//! Meant for checking the locator heuristics against a blob by eye.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use jamlevel::assembler::{parse_level, peek_name, scan_container};
use jamlevel::blob::BlobReader;
use jamlevel::blob::layout::header;
use jamlevel::locator::{RecordKind, locate};
use jamlevel::metadata::LevelMeta;
use jamlevel::normalize::normalize_with;
use owo_colors::OwoColorize;

use super::hex_utils::format_hex_offset;
use super::hexdump::format_hexdump;

pub fn run(path: &Path, name: Option<&str>, at: usize, len: usize) -> Result<()> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let blob: &[u8] = match name {
        Some(name) => scan_container(&data)
            .into_iter()
            .find(|b| peek_name(b).as_deref() == Some(name))
            .with_context(|| format!("No blob named {:?} in {}", name, path.display()))?,
        None => &data,
    };
    let reader = BlobReader::new(blob);

    println!("{} ({} bytes)", path.display().bold(), blob.len());
    println!(
        "Declared door count at {}: {}",
        format_hex_offset(header::DOOR_COUNT),
        reader.read_i32(header::DOOR_COUNT)
    );
    for kind in [RecordKind::GameBlock, RecordKind::FrameElement] {
        match locate(&reader, kind) {
            Some(loc) => println!(
                "{:?} array: {} record(s), count at {}",
                kind,
                loc.count,
                format_hex_offset(loc.count_offset)
            ),
            None => println!("{:?} array: {}", kind, "not found".yellow()),
        }
    }

    match parse_level(blob) {
        Some(level) => {
            println!();
            println!("{} {}", level.name.green().bold(), level.guid.dimmed());
            println!(
                "Grid: {}x{} (declared height {}, {} top row(s) trimmed)",
                level.width(),
                level.height(),
                level.original_grid_height,
                level.removed_top_rows
            );
            println!(
                "Hidden cells: {}, frame elements: {}",
                level.hidden_coords.len(),
                level.frame_elements.len()
            );

            let grid = normalize_with(&level, 0, LevelMeta::default());
            println!("Blocks: {}", grid.blocks.len());
            for (i, b) in grid.blocks.iter().enumerate() {
                println!(
                    "  {:>2}. group {:>2} color {:>2} at ({}, {}) rot {} {}",
                    i + 1,
                    b.block_group_type,
                    b.block_type,
                    b.grid_row,
                    b.grid_col,
                    b.rotation_z,
                    b.move_direction
                );
            }
            println!("Doors: {}", grid.doors.len());
            for (i, d) in grid.doors.iter().enumerate() {
                println!(
                    "  {:>2}. {:<6} color {:>2} parts {} at ({}, {})",
                    i + 1,
                    d.edge.to_string(),
                    d.block_type,
                    d.part_count,
                    d.start_row,
                    d.start_col
                );
            }
        }
        None => println!("{}", "Header rejected (grid size out of range)".red()),
    }

    if len > 0 {
        let start = at.min(blob.len());
        let end = at.saturating_add(len).min(blob.len());
        println!();
        println!("Hexdump at {} ({} bytes):", format_hex_offset(start), end - start);
        for line in format_hexdump(&blob[start..end], start) {
            println!("{}", line);
        }
    }

    Ok(())
}
