use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Grid size out of range: {width}x{height} (expected 1..=20 on both axes)")]
    InvalidGridSize { width: i32, height: i32 },

    #[error("Unknown hardness value: {0}")]
    UnknownHardness(i32),

    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            Error::SnapshotNotFound(_) => true,
            _ => false,
        }
    }
}
