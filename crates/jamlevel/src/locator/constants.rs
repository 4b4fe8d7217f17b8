//! Search-related constants for record location
//!
//! # Search Strategy
//!
//! Level blobs carry no type tags. Arrays are found by scanning for an i32
//! that looks like an element count and checking that the bytes after it
//! decode to a plausible first record. Doors have no usable count and are
//! found record by record.
//!
//! ```text
//!                        Level blob (approximate)
//! ┌─────────────────────────────────────────────────────────┐
//! │ 0x1C  name, GUID, grid size, hidden cells, camera       │
//! │ 0x80  declared door count (unreliable)                   │
//! │ 0x84  door records (32 bytes each) ......... up to 0x900 │
//! │ 0x150 frame element array (44 bytes each) .. up to 0x800│
//! │ 0x150 game block array (156 bytes each) .... up to 0x1000│
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The windows overlap; each kind has its own first-record predicate.

// ============================================================================
// Shared value bounds
// ============================================================================

/// Highest color channel value accepted on any record
pub const MAX_COLOR_TYPE: i32 = 15;

/// Highest inner layer color; anything above reads as "no inner layer"
pub const MAX_INNER_COLOR_TYPE: i32 = 11;

/// Highest group type accepted on a game block
pub const MAX_GROUP_TYPE: i32 = 11;

// ============================================================================
// Game blocks
// ============================================================================

pub const BLOCK_SEARCH_START: usize = 0x150;
pub const BLOCK_SEARCH_END: usize = 0x1000;
/// Bytes kept clear at the tail of the blob when bounding the search window
pub const BLOCK_SEARCH_TAIL: usize = 200;
pub const BLOCK_MIN_COUNT: i32 = 1;
pub const BLOCK_MAX_COUNT: i32 = 30;

/// The first block must sit inside the field
pub const BLOCK_FIRST_MAX_XY: f64 = 8.0;
pub const BLOCK_FIRST_MAX_Z: f64 = 3.0;

/// A first record with every field near zero is padding, not a block
pub const BLOCK_PADDING_EPSILON: f64 = 0.5;

/// Decoded blocks further out than this are dropped
pub const BLOCK_MAX_XY: f64 = 10.0;

// ============================================================================
// Frame elements
// ============================================================================

pub const FRAME_SEARCH_START: usize = 0x150;
pub const FRAME_SEARCH_END: usize = 0x800;
pub const FRAME_SEARCH_TAIL: usize = 100;
pub const FRAME_MIN_COUNT: i32 = 1;
pub const FRAME_MAX_COUNT: i32 = 100;

/// Exclusive position bounds for frame elements
pub const FRAME_MAX_XY: f64 = 15.0;
pub const FRAME_MIN_Z: f64 = -5.0;
pub const FRAME_MAX_Z: f64 = 10.0;

// ============================================================================
// Doors
// ============================================================================

pub const DOOR_SEARCH_START: usize = 0x84;
/// Nominal end of the door region
pub const DOOR_REGION_END: usize = 0x600;
/// Some levels store doors as late as 0x870, so the scan always reaches here
pub const DOOR_SEARCH_MIN_END: usize = 0x900;

pub const DOOR_MIN_PARTS: i32 = 1;
/// Real doors have 1-4 parts; 5+ is a misread
pub const DOOR_MAX_PARTS: i32 = 4;

/// Candidate positions beyond these are noise
pub const DOOR_CANDIDATE_MAX_XY: f64 = 20.0;
pub const DOOR_CANDIDATE_MAX_Z: f64 = 5.0;
pub const DOOR_MAX_XY: f64 = 30.0;
/// A door never sits at the origin
pub const DOOR_ORIGIN_EPSILON: f64 = 0.1;

/// Doors closer than this on both axes are the same door
pub const DOOR_DEDUP_DISTANCE: f64 = 0.5;

/// Doors only rotate around Z; larger X/Y angles mark a misread transform
pub const DOOR_MAX_TILT: f64 = 0.5;

// Adaptive edge thresholds (world units)
pub const SIDE_EDGE_MIN_THRESHOLD: f64 = 3.5;
pub const SIDE_EDGE_MARGIN: f64 = 0.5;
pub const SIDE_EDGE_MAX_MARGIN: f64 = 2.0;
/// Inward shift when an edge column is mostly hidden
pub const HIDDEN_EDGE_INSET: f64 = 1.1;

pub const TOP_BOTTOM_MIN_THRESHOLD: f64 = 5.5;
pub const TOP_BOTTOM_MARGIN: f64 = 0.5;
pub const TALL_GRID_MARGIN: f64 = 1.1;
/// Grids at least this tall use the wider top/bottom margin
pub const TALL_GRID_HEIGHT: i32 = 9;
