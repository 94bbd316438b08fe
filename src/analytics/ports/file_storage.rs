//! File-storage port resolving file-valued options.

use crate::analytics::domain::FileReference;
use std::sync::Arc;
use thiserror::Error;

/// Result type for file-storage operations.
pub type FileStorageResult<T> = Result<T, FileStorageError>;

/// Storage for uploaded option files such as private keys.
pub trait FileStorage: Send + Sync {
    /// Reads the bytes behind a file reference.
    ///
    /// # Errors
    ///
    /// Returns [`FileStorageError::NotFound`] when nothing is stored at the
    /// referenced path, or [`FileStorageError::Io`] on storage failure.
    fn read(&self, file: &FileReference) -> FileStorageResult<Vec<u8>>;

    /// Stores uploaded bytes and returns a proxy reference to them.
    ///
    /// # Errors
    ///
    /// Returns [`FileStorageError::Io`] on storage failure.
    fn store(&self, client_name: &str, contents: &[u8]) -> FileStorageResult<FileReference>;
}

/// Errors returned by file-storage adapters.
#[derive(Debug, Clone, Error)]
pub enum FileStorageError {
    /// Nothing is stored at the path.
    #[error("stored file not found: {0}")]
    NotFound(String),

    /// Storage failure.
    #[error("file storage error: {0}")]
    Io(Arc<dyn std::error::Error + Send + Sync>),
}

impl FileStorageError {
    /// Wraps a storage error.
    pub fn io(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io(Arc::new(err))
    }
}
