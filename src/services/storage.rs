//! Document persistence.
//!
//! [`DocumentStore`] is the seam between the patcher and the file system.
//! [`FsDocumentStore`] reads strict UTF-8 and writes through a temporary file
//! in the target's directory, so a failed write never leaves a partially
//! written document behind. Symlinked documents are written through the link.
//! Documents with several hard links are rewritten in place.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors reading or writing a single document
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Error reading {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading {path}: not valid UTF-8 (invalid byte at offset {offset})")]
    Decode { path: Utf8PathBuf, offset: usize },

    #[error("Error writing {path}: {source}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::Read { path, .. } | Self::Decode { path, .. } | Self::Write { path, .. } => path,
        }
    }

    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Decode { .. })
    }
}

/// Reads and writes whole documents.
pub trait DocumentStore: Send + Sync {
    fn read(&self, path: &Utf8Path) -> Result<String, StorageError>;

    /// Replace the document's content. Either the new content is fully
    /// persisted or the document is left as it was.
    fn write(&self, path: &Utf8Path, content: &str) -> Result<(), StorageError>;
}

/// [`DocumentStore`] backed by the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDocumentStore;

impl FsDocumentStore {
    pub fn new() -> Self {
        Self
    }

    fn write_atomic(path: &Utf8Path, content: &str) -> io::Result<()> {
        // Symlinks are resolved so the link survives and its target is patched
        let target = fs::canonicalize(path)?;
        let metadata = fs::metadata(&target)?;

        let permissions = metadata.permissions();
        if permissions.readonly() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "document is read-only",
            ));
        }

        // A rename would split a hard link from its siblings
        if has_other_links(&metadata) {
            return fs::write(&target, content);
        }

        let dir = target.parent().unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.as_file().set_permissions(permissions)?;
        tmp.persist(&target).map_err(|e| e.error)?;

        Ok(())
    }
}

#[cfg(unix)]
fn has_other_links(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    metadata.nlink() > 1
}

#[cfg(not(unix))]
fn has_other_links(_metadata: &fs::Metadata) -> bool {
    false
}

impl DocumentStore for FsDocumentStore {
    fn read(&self, path: &Utf8Path) -> Result<String, StorageError> {
        let bytes = fs::read(path).map_err(|source| StorageError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        String::from_utf8(bytes).map_err(|e| StorageError::Decode {
            path: path.to_path_buf(),
            offset: e.utf8_error().valid_up_to(),
        })
    }

    fn write(&self, path: &Utf8Path, content: &str) -> Result<(), StorageError> {
        Self::write_atomic(path, content).map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Wrote {} bytes to {}", content.len(), path);
        Ok(())
    }
}
