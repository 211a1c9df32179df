//! API handlers for the HTTP surface.

pub mod file;
pub mod page;

pub use file::*;
pub use page::*;

use crate::config::FilesConfig;
use crate::file::{FileService, FileStorage};

/// Application state shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Storage root handle.
    pub storage: FileStorage,
    /// Extensions accepted for uploads and rename targets.
    pub allowed_extensions: Vec<String>,
    /// Maximum request body size in megabytes.
    pub max_upload_size_mb: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(storage: FileStorage, files: &FilesConfig) -> Self {
        Self {
            storage,
            allowed_extensions: files.allowed_extensions.clone(),
            max_upload_size_mb: files.max_upload_size_mb,
        }
    }

    /// Maximum request body size in bytes.
    pub fn max_upload_size_bytes(&self) -> usize {
        (self.max_upload_size_mb as usize).saturating_mul(1024 * 1024)
    }

    /// File service over this state's storage root and allow-list.
    pub fn service(&self) -> FileService<'_> {
        FileService::new(&self.storage, &self.allowed_extensions)
    }
}
