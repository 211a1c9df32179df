//! Response DTOs for the HTTP API.

use serde::Serialize;
use utoipa::ToSchema;

/// Successful upload.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Confirmation message.
    pub message: String,
    /// Stored (sanitized) file name.
    pub filename: String,
}

/// Names of every stored file.
#[derive(Debug, Serialize, ToSchema)]
pub struct FileListResponse {
    /// Stored file names, in directory order.
    pub files: Vec<String>,
}

/// Plain confirmation.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Confirmation message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new confirmation.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
