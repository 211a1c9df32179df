//! In-memory zip archives of the storage root.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::storage::FileStorage;
use crate::{CloudStoreError, Result};

/// File name under which the bulk archive is served.
pub const ARCHIVE_NAME: &str = "all_files.zip";

/// Build a zip archive holding every stored file under its stored name.
///
/// Returns [`CloudStoreError::EmptyStore`] when there is nothing to archive.
/// A file removed between listing and reading is left out of the archive.
pub fn build_archive(storage: &FileStorage) -> Result<Vec<u8>> {
    let names = storage.list()?;
    if names.is_empty() {
        return Err(CloudStoreError::EmptyStore);
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut written = 0usize;

    for name in &names {
        let content = match storage.load(name) {
            Ok(content) => content,
            Err(CloudStoreError::NotFound(_)) => {
                tracing::debug!("Skipping {} removed during archiving", name);
                continue;
            }
            Err(e) => return Err(e),
        };

        writer.start_file(name.as_str(), options)?;
        writer.write_all(&content)?;
        written += 1;
    }

    if written == 0 {
        return Err(CloudStoreError::EmptyStore);
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}
