//! File service for cloudstore.
//!
//! This module applies the file-management contract on top of
//! [`FileStorage`]:
//! - Every client-supplied name is sanitized
//! - Upload and rename targets must carry an allowed extension
//! - Rename never overwrites; upload always does

use super::archive::build_archive;
use super::name::{is_allowed_extension, sanitize};
use super::storage::FileStorage;
use crate::{CloudStoreError, Result};

/// File service for a storage root and an extension allow-list.
pub struct FileService<'a> {
    storage: &'a FileStorage,
    allowed_extensions: &'a [String],
}

impl<'a> FileService<'a> {
    /// Create a new FileService.
    pub fn new(storage: &'a FileStorage, allowed_extensions: &'a [String]) -> Self {
        Self {
            storage,
            allowed_extensions,
        }
    }

    /// Store `content` under the sanitized form of `filename`.
    ///
    /// # Returns
    /// The stored name.
    pub fn upload(&self, filename: &str, content: &[u8]) -> Result<String> {
        if filename.is_empty() {
            return Err(CloudStoreError::Validation("no selected file".to_string()));
        }

        let name = sanitize(filename)?;
        self.check_extension(&name)?;

        self.storage.save(&name, content)?;
        tracing::info!(filename = %name, size = content.len(), "File uploaded");

        Ok(name)
    }

    /// Load a stored file.
    ///
    /// # Returns
    /// The stored name and its content.
    pub fn download(&self, filename: &str) -> Result<(String, Vec<u8>)> {
        let name = Self::existing_name(filename)?;
        let content = self.storage.load(&name)?;
        Ok((name, content))
    }

    /// Names of all stored files.
    pub fn list(&self) -> Result<Vec<String>> {
        self.storage.list()
    }

    /// Delete a stored file.
    ///
    /// # Returns
    /// The stored name that was removed.
    pub fn delete(&self, filename: &str) -> Result<String> {
        let name = Self::existing_name(filename)?;
        self.storage.delete(&name)?;
        tracing::info!(filename = %name, "File deleted");
        Ok(name)
    }

    /// Rename a stored file.
    ///
    /// Checks run in order: both names present, both sanitize, new extension
    /// allowed, source exists, target absent.
    ///
    /// # Returns
    /// The sanitized `(old, new)` names.
    pub fn rename(&self, old_name: &str, new_name: &str) -> Result<(String, String)> {
        if old_name.is_empty() || new_name.is_empty() {
            return Err(CloudStoreError::Validation(
                "both old_name and new_name are required".to_string(),
            ));
        }

        let old_name = sanitize(old_name)?;
        let new_name = sanitize(new_name)?;
        self.check_extension(&new_name)?;

        self.storage.rename(&old_name, &new_name)?;
        tracing::info!(from = %old_name, to = %new_name, "File renamed");

        Ok((old_name, new_name))
    }

    /// Zip every stored file into one archive.
    pub fn download_all(&self) -> Result<Vec<u8>> {
        build_archive(self.storage)
    }

    fn check_extension(&self, name: &str) -> Result<()> {
        if is_allowed_extension(name, self.allowed_extensions) {
            Ok(())
        } else {
            Err(CloudStoreError::DisallowedExtension(name.to_string()))
        }
    }

    /// Sanitize a name that must refer to an existing file.
    ///
    /// A name that sanitizes to nothing cannot exist, so it is reported as
    /// not found.
    fn existing_name(filename: &str) -> Result<String> {
        sanitize(filename).map_err(|_| CloudStoreError::NotFound(filename.to_string()))
    }
}
