//! CLI command implementations.

pub mod export;
pub mod hardness;
pub mod hex_utils;
pub mod hexdump;
pub mod inspect;
pub mod parse;
pub mod verify;
