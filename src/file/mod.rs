//! File management module for cloudstore.
//!
//! This module provides the storage side of the service:
//! - Name sanitization and the extension allow-list
//! - A flat storage root on local disk
//! - In-memory zip archives of the whole store

mod archive;
mod name;
mod service;
mod storage;

pub use archive::{build_archive, ARCHIVE_NAME};
pub use name::{extension, is_allowed_extension, sanitize};
pub use service::FileService;
pub use storage::FileStorage;
