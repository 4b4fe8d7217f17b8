use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::hex_utils::parse_hex_offset;

#[derive(Parser)]
#[command(name = "jamlevel")]
#[command(version, about = "Color Block Jam level extractor")]
pub struct Cli {
    /// Config file (missing file = built-in defaults)
    #[arg(short, long, default_value = "jamlevel.toml", global = true)]
    pub config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse level blobs (container file or dump directory) into raw levels JSON
    Parse {
        /// Container file or directory of blobs
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Parsed levels output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract duration and hardness from the level list asset
    Hardness {
        /// Asset container holding the level list
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// GUID order JSON
        #[arg(short, long)]
        guids: Option<PathBuf>,
        /// Hardness table output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Normalize parsed levels into the game's levels JSON
    Export {
        /// Parsed levels JSON
        #[arg(short, long)]
        parsed: Option<PathBuf>,
        /// GUID order JSON
        #[arg(short, long)]
        guids: Option<PathBuf>,
        /// Hardness table JSON
        #[arg(long)]
        hardness: Option<PathBuf>,
        /// Output levels JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Export only the first N levels
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Compare exported levels against the verified snapshot
    Verify {
        /// Exported levels JSON
        #[arg(short, long)]
        levels: Option<PathBuf>,
        /// Snapshot JSON
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
        /// Number of leading levels to check
        #[arg(long)]
        verified: Option<u32>,
        /// Re-baseline the snapshot from the current export
        #[arg(long)]
        save: bool,
    },

    /// Show the header, located arrays and a hexdump of one blob
    Inspect {
        /// Blob file, or a container when --name is given
        blob: PathBuf,
        /// Pick the blob with this level name out of a container
        #[arg(long)]
        name: Option<String>,
        /// Hexdump start offset (hex)
        #[arg(long, value_parser = parse_hex_offset, default_value = "0")]
        at: usize,
        /// Hexdump length in bytes (0 = no dump)
        #[arg(long, default_value_t = 0x100)]
        len: usize,
    },
}
