//! cloudstore - a minimal HTTP file-storage service.
//!
//! Upload, download, list, delete, rename and bulk-zip-download of files in
//! a single flat directory.

pub mod config;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use config::Config;
pub use error::{CloudStoreError, Result};
pub use file::{is_allowed_extension, sanitize, FileService, FileStorage};
pub use web::WebServer;
