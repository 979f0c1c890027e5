//! Failure taxonomy for directory measurement.
//!
//! Every failure carries the path it happened at. Errors are never recovered
//! locally: a failure anywhere in a subtree propagates unchanged to the caller
//! of the top-level measurement.

use std::io;
use std::path::{Path, PathBuf};

/// Windows reports over-long paths with this system error code.
#[cfg(windows)]
const ERROR_FILENAME_EXCED_RANGE: i32 = 206;

/// Errors produced while measuring a directory tree.
#[derive(Debug, thiserror::Error)]
pub enum MeasureError {
    /// The starting path does not resolve to an existing directory.
    #[error("directory not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// A path exceeds what the filesystem can represent.
    #[error("path too long: {}", .path.display())]
    PathTooLong { path: PathBuf },

    /// Listing a directory or reading an entry's size failed.
    #[error("failed to access {}: {source}", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The accumulated size no longer fits in a `u64`.
    #[error("size overflow while summing {}", .path.display())]
    Overflow { path: PathBuf },

    /// A subtree task was cancelled before it produced a result.
    #[error("measurement cancelled at {}", .path.display())]
    Cancelled { path: PathBuf },
}

/// Coarse category of a [`MeasureError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    PathTooLong,
    Access,
    Overflow,
    Cancelled,
}

impl ErrorKind {
    /// Returns a stable string for machine-readable output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::PathTooLong => "path_too_long",
            ErrorKind::Access => "access",
            ErrorKind::Overflow => "overflow",
            ErrorKind::Cancelled => "cancelled",
        }
    }
}

impl MeasureError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MeasureError::NotFound { .. } => ErrorKind::NotFound,
            MeasureError::PathTooLong { .. } => ErrorKind::PathTooLong,
            MeasureError::Access { .. } => ErrorKind::Access,
            MeasureError::Overflow { .. } => ErrorKind::Overflow,
            MeasureError::Cancelled { .. } => ErrorKind::Cancelled,
        }
    }

    /// The path the failure was observed at.
    pub fn path(&self) -> &Path {
        match self {
            MeasureError::NotFound { path }
            | MeasureError::PathTooLong { path }
            | MeasureError::Access { path, .. }
            | MeasureError::Overflow { path }
            | MeasureError::Cancelled { path } => path,
        }
    }

    /// Classifies an io error raised while listing inside the tree.
    ///
    /// Anything other than a name-length failure is an access failure here,
    /// including entries that disappeared after the parent was listed.
    pub fn from_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        if is_name_too_long(&err) {
            MeasureError::PathTooLong { path }
        } else {
            MeasureError::Access { path, source: err }
        }
    }

    /// Classifies an io error raised while resolving the starting path.
    pub fn from_start_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        if err.kind() == io::ErrorKind::NotFound || is_not_a_directory(&err) {
            MeasureError::NotFound { path }
        } else {
            MeasureError::from_io(path, err)
        }
    }
}

fn is_name_too_long(err: &io::Error) -> bool {
    #[cfg(unix)]
    {
        err.raw_os_error() == Some(libc::ENAMETOOLONG)
    }
    #[cfg(windows)]
    {
        err.raw_os_error() == Some(ERROR_FILENAME_EXCED_RANGE)
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = err;
        false
    }
}

fn is_not_a_directory(err: &io::Error) -> bool {
    #[cfg(unix)]
    {
        err.raw_os_error() == Some(libc::ENOTDIR)
    }
    #[cfg(not(unix))]
    {
        let _ = err;
        false
    }
}
