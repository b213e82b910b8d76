//! Disk I/O for documents
//!
//! Thin wrappers over std::fs that attach the offending path to failures,
//! so errors surfaced to the user name the file involved.

use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Read a document from disk.
pub fn read_file(path: &Path) -> Result<String> {
    debug!("Reading file: {}", path.display());
    fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a document to disk.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    debug!("Writing file: {} ({} bytes)", path.display(), content.len());
    fs::write(path, content).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
