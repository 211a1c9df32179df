//! Request DTOs for the HTTP API.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Rename request.
///
/// Both fields are optional at the serde level so a missing field is
/// reported as a 400 by the handler rather than a deserialization error.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RenameRequest {
    /// Current stored name.
    #[serde(default)]
    pub old_name: Option<String>,
    /// Desired name.
    #[serde(default)]
    pub new_name: Option<String>,
}

/// Query parameters for single-file download.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DownloadQuery {
    /// Name of the file to download.
    #[serde(default)]
    pub filename: Option<String>,
}
