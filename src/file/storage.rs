//! File storage for cloudstore.
//!
//! This module owns the storage root: a single flat directory whose regular
//! files are the stored files. Names handed to [`FileStorage`] are expected
//! to be sanitized already (see [`super::sanitize`]).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::{CloudStoreError, Result};

/// Prefix of in-progress upload files. Sanitized names never start with a dot.
const TEMP_PREFIX: &str = ".upload-";

/// Handle to the storage root.
///
/// ```text
/// {root}/
/// ├── notes.txt
/// ├── report.pdf
/// └── photo.jpg
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a new FileStorage rooted at the given directory.
    ///
    /// The directory will be created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        Ok(Self { root })
    }

    /// Get the storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a stored name.
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Write content under `name`, replacing any existing file.
    ///
    /// Content lands in a temporary file first and is renamed into place, so
    /// a concurrent reader sees either the old or the new content.
    pub fn save(&self, name: &str, content: &[u8]) -> Result<()> {
        let temp_path = self.root.join(format!("{TEMP_PREFIX}{}", Uuid::new_v4()));

        if let Err(e) = fs::write(&temp_path, content) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, self.file_path(name)) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        Ok(())
    }

    /// Load the content of a stored file.
    pub fn load(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.file_path(name);
        if path.is_dir() {
            return Err(CloudStoreError::NotFound(name.to_string()));
        }

        match fs::read(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(CloudStoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a stored file exists.
    pub fn exists(&self, name: &str) -> bool {
        self.file_path(name).is_file()
    }

    /// Names of all stored files, in directory order.
    ///
    /// Subdirectories, dot-files and names that are not valid UTF-8 are not
    /// stored files and are skipped.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }

            let file_type = match entry.file_type() {
                Ok(t) => t,
                // Removed between read_dir and stat.
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            if file_type.is_file() {
                files.push(name);
            }
        }

        Ok(files)
    }

    /// Delete a stored file.
    pub fn delete(&self, name: &str) -> Result<()> {
        if !self.exists(name) {
            return Err(CloudStoreError::NotFound(name.to_string()));
        }

        match fs::remove_file(self.file_path(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(CloudStoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Rename a stored file. An existing target is never overwritten.
    pub fn rename(&self, old_name: &str, new_name: &str) -> Result<()> {
        if !self.exists(old_name) {
            return Err(CloudStoreError::NotFound(old_name.to_string()));
        }

        let new_path = self.file_path(new_name);
        if new_path.exists() {
            return Err(CloudStoreError::AlreadyExists(new_name.to_string()));
        }

        match fs::rename(self.file_path(old_name), new_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(CloudStoreError::NotFound(old_name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove upload temp files left behind by an interrupted process.
    pub fn cleanup_temp_files(&self) -> Result<usize> {
        let mut removed = 0;

        for entry in fs::read_dir(&self.root)?.flatten() {
            let is_temp = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(TEMP_PREFIX));
            if is_temp && fs::remove_file(entry.path()).is_ok() {
                removed += 1;
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_storage() -> (TempDir, FileStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_new_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("cloud_storage");

        assert!(!root.exists());

        let storage = FileStorage::new(&root).unwrap();

        assert!(root.is_dir());
        assert_eq!(storage.root(), root);
    }

    #[test]
    fn test_save_and_load() {
        let (_temp_dir, storage) = setup_storage();

        storage.save("hello.txt", b"Hello, World!").unwrap();

        assert_eq!(storage.load("hello.txt").unwrap(), b"Hello, World!");
        assert!(storage.root().join("hello.txt").is_file());
    }

    #[test]
    fn test_save_overwrites() {
        let (_temp_dir, storage) = setup_storage();

        storage.save("doc.txt", b"first").unwrap();
        storage.save("doc.txt", b"second").unwrap();

        assert_eq!(storage.load("doc.txt").unwrap(), b"second");
        assert_eq!(storage.list().unwrap(), vec!["doc.txt"]);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let (_temp_dir, storage) = setup_storage();

        storage.save("a.txt", b"data").unwrap();

        let entries: Vec<_> = fs::read_dir(storage.root()).unwrap().flatten().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_load_not_found() {
        let (_temp_dir, storage) = setup_storage();

        let result = storage.load("missing.txt");
        assert!(matches!(result, Err(CloudStoreError::NotFound(_))));
    }

    #[test]
    fn test_load_directory_is_not_found() {
        let (_temp_dir, storage) = setup_storage();
        fs::create_dir(storage.root().join("subdir")).unwrap();

        let result = storage.load("subdir");
        assert!(matches!(result, Err(CloudStoreError::NotFound(_))));
    }

    #[test]
    fn test_list_skips_directories_and_dotfiles() {
        let (_temp_dir, storage) = setup_storage();
        storage.save("b.txt", b"bb").unwrap();
        storage.save("a.pdf", b"a").unwrap();
        fs::create_dir(storage.root().join("nested")).unwrap();
        fs::write(storage.root().join(".upload-stale"), b"partial").unwrap();

        let mut names = storage.list().unwrap();
        names.sort();
        assert_eq!(names, vec!["a.pdf", "b.txt"]);
    }

    #[test]
    fn test_list_empty() {
        let (_temp_dir, storage) = setup_storage();
        assert!(storage.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = setup_storage();
        storage.save("gone.txt", b"bye").unwrap();

        storage.delete("gone.txt").unwrap();

        assert!(!storage.exists("gone.txt"));
        assert!(matches!(
            storage.delete("gone.txt"),
            Err(CloudStoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_rename() {
        let (_temp_dir, storage) = setup_storage();
        storage.save("old.txt", b"content").unwrap();

        storage.rename("old.txt", "new.txt").unwrap();

        assert!(!storage.exists("old.txt"));
        assert_eq!(storage.load("new.txt").unwrap(), b"content");
    }

    #[test]
    fn test_rename_missing_source() {
        let (_temp_dir, storage) = setup_storage();

        let result = storage.rename("absent.txt", "new.txt");
        assert!(matches!(result, Err(CloudStoreError::NotFound(name)) if name == "absent.txt"));
    }

    #[test]
    fn test_rename_rejects_existing_target() {
        let (_temp_dir, storage) = setup_storage();
        storage.save("a.txt", b"alpha").unwrap();
        storage.save("b.txt", b"beta").unwrap();

        let result = storage.rename("a.txt", "b.txt");

        assert!(matches!(result, Err(CloudStoreError::AlreadyExists(name)) if name == "b.txt"));
        assert_eq!(storage.load("a.txt").unwrap(), b"alpha");
        assert_eq!(storage.load("b.txt").unwrap(), b"beta");
    }

    #[test]
    fn test_binary_content() {
        let (_temp_dir, storage) = setup_storage();
        let content: Vec<u8> = (0..=255).collect();

        storage.save("binary.zip", &content).unwrap();

        assert_eq!(storage.load("binary.zip").unwrap(), content);
    }

    #[test]
    fn test_cleanup_temp_files() {
        let (_temp_dir, storage) = setup_storage();
        fs::write(storage.root().join(".upload-1234"), b"partial").unwrap();
        storage.save("keep.txt", b"keep").unwrap();

        let removed = storage.cleanup_temp_files().unwrap();

        assert_eq!(removed, 1);
        assert_eq!(storage.list().unwrap(), vec!["keep.txt"]);
    }
}
