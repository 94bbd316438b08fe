//! File-storage adapters for uploaded option files.

mod filesystem;
mod memory;

pub use filesystem::CapStdFileStorage;
pub use memory::InMemoryFileStorage;

use camino::Utf8Path;
use sha2::{Digest, Sha256};

/// Derives the storage path for uploaded bytes.
///
/// Paths are the SHA-256 of the contents, keeping the client file
/// extension, so re-uploading the same file reuses one entry.
fn content_address(client_name: &str, contents: &[u8]) -> String {
    let digest = Sha256::digest(contents);
    match Utf8Path::new(client_name).extension() {
        Some(extension) => format!("{digest:x}.{extension}"),
        None => format!("{digest:x}"),
    }
}
