use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Generic I/O error (reading or rewriting a store file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be serialized or parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Registration attempted with a username that is already taken.
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
