// src/readme/document.rs
// =============================================================================
// Reading and writing the README file.
//
// A missing README is the one fatal condition of a run, so reading returns a
// dedicated error variant that main() can turn into exit code 1.
// =============================================================================

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn read_document(path: &Path) -> Result<String, ReadError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ReadError::NotFound(path.to_path_buf()),
        _ => ReadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

// Overwrites the README in place
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))
}
