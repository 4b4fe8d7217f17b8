//! Level extraction for Color Block Jam asset blobs.
//!
//! The game ships its levels as serialized engine objects with no schema.
//! This crate locates the records inside each blob by heuristic scans,
//! decodes them into [`level::Level`] values in world coordinates, and
//! normalizes those into the grid-space format of [`normalize`].
//!
//! Pipeline: [`assembler::BlobSource`] → [`assembler::parse_levels`] →
//! [`export::build_levels`] → [`regression::compare`].

pub mod assembler;
pub mod blob;
pub mod decoder;
pub mod error;
pub mod export;
pub mod level;
pub mod locator;
pub mod metadata;
pub mod normalize;
pub mod prelude;
pub mod regression;

pub use error::{Error, Result};
