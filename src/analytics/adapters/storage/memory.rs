//! In-memory file storage adapter.

use super::content_address;
use crate::analytics::{
    domain::FileReference,
    ports::{FileStorage, FileStorageError, FileStorageResult},
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory file storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFileStorage {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryFileStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FileStorage for InMemoryFileStorage {
    fn read(&self, file: &FileReference) -> FileStorageResult<Vec<u8>> {
        let files = self
            .files
            .read()
            .map_err(|err| FileStorageError::io(std::io::Error::other(err.to_string())))?;
        files
            .get(file.path())
            .cloned()
            .ok_or_else(|| FileStorageError::NotFound(file.path().to_owned()))
    }

    fn store(&self, client_name: &str, contents: &[u8]) -> FileStorageResult<FileReference> {
        let path = content_address(client_name, contents);
        let mut files = self
            .files
            .write()
            .map_err(|err| FileStorageError::io(std::io::Error::other(err.to_string())))?;
        files.insert(path.clone(), contents.to_vec());
        Ok(FileReference::proxy(path, client_name))
    }
}
