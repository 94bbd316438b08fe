//! Filesystem storage confined to one directory capability.

use super::content_address;
use crate::analytics::{
    domain::FileReference,
    ports::{FileStorage, FileStorageError, FileStorageResult},
};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;

/// File storage rooted at a directory opened once at construction.
///
/// All reads and writes resolve relative to that directory; references
/// cannot escape it.
#[derive(Debug)]
pub struct CapStdFileStorage {
    root: Dir,
}

impl CapStdFileStorage {
    /// Opens `path` as the storage root.
    ///
    /// # Errors
    ///
    /// Returns [`FileStorageError::Io`] when the directory cannot be opened.
    pub fn open(path: &Utf8Path) -> FileStorageResult<Self> {
        let root = Dir::open_ambient_dir(path, ambient_authority()).map_err(FileStorageError::io)?;
        Ok(Self { root })
    }

    /// Wraps an already opened directory.
    #[must_use]
    pub const fn from_dir(root: Dir) -> Self {
        Self { root }
    }
}

impl FileStorage for CapStdFileStorage {
    fn read(&self, file: &FileReference) -> FileStorageResult<Vec<u8>> {
        match self.root.read(file.path()) {
            Ok(contents) => Ok(contents),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(FileStorageError::NotFound(file.path().to_owned()))
            }
            Err(err) => Err(FileStorageError::io(err)),
        }
    }

    fn store(&self, client_name: &str, contents: &[u8]) -> FileStorageResult<FileReference> {
        let path = content_address(client_name, contents);
        self.root
            .write(&path, contents)
            .map_err(FileStorageError::io)?;
        Ok(FileReference::proxy(path, client_name))
    }
}
