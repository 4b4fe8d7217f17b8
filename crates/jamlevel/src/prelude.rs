//! Prelude module for convenient imports
//!
//! ```ignore
//! use jamlevel::prelude::*;
//! ```
//!
//! This brings the following into scope:
//!
//! - Parsing: `BlobSource`, `parse_level`, `parse_levels`
//! - Raw levels: `Level`, `BlockRecord`, `DoorRecord`, `GroupType`, `Edge`
//! - Output: `NormalizedLevel`, `LevelsDocument`, `ExportConfig`
//! - Metadata: `GuidOrder`, `HardnessTable`
//! - Error handling: `Error`, `Result`

// Parsing
pub use crate::assembler::{BlobSource, parse_level, parse_levels};

// Raw level types
pub use crate::level::{BlockRecord, DoorRecord, Edge, GroupType, Hardness, Level, MoveDirection};

// Normalized output and export
pub use crate::export::{ExportConfig, ExportConfigBuilder, LevelsDocument, build_levels};
pub use crate::normalize::{NormalizedLevel, normalize};

// Metadata
pub use crate::metadata::{GuidOrder, HardnessTable, extract_hardness};

// Regression guard
pub use crate::regression::{Diff, Snapshot, compare};

// Error handling
pub use crate::error::{Error, Result};
