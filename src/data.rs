//! Data structures shared between the measurement core and its callers.

use std::path::PathBuf;

/// A single file found directly inside a directory.
///
/// # Fields
/// * `path` - The full path to the file
/// * `size` - Size in bytes, as reported by the directory handle
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// The immediate contents of one directory.
#[derive(Debug)]
pub struct Listing<D> {
    pub files: Vec<FileEntry>,
    pub subdirectories: Vec<D>,
}

impl<D> Default for Listing<D> {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            subdirectories: Vec::new(),
        }
    }
}

/// A single record of output (used for CSV and JSON serialization).
///
/// # Fields
/// * `path` - The top-level path that was measured
/// * `size_bytes` - Total size in bytes, absent on failure
/// * `size_human` - Human-readable size (e.g., "1.2 MB"), absent on failure
/// * `error_kind` - Failure category, absent on success
/// * `error` - Failure message, absent on success
/// * `elapsed_ms` - Wall-clock time spent measuring this path
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ReportRecord {
    pub path: String,
    pub size_bytes: Option<u64>,
    pub size_human: Option<String>,
    pub error_kind: Option<&'static str>,
    pub error: Option<String>,
    pub elapsed_ms: u64,
}
