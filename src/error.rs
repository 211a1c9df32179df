//! Error types for cloudstore.

use thiserror::Error;

/// Common error type for cloudstore.
#[derive(Error, Debug)]
pub enum CloudStoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored file does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// A stored file with the target name already exists.
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// Client-supplied name sanitizes to nothing usable.
    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    /// Extension is not in the allow-list.
    #[error("extension not allowed: {0}")]
    DisallowedExtension(String),

    /// There is nothing in the storage root to archive.
    #[error("storage is empty")]
    EmptyStore,

    /// Archive building error.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for cloudstore operations.
pub type Result<T> = std::result::Result<T, CloudStoreError>;
