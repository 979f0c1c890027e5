//! Host filesystem implementation of [`DirectoryHandle`].
//!
//! Each listing reads its directory in one blocking call on tokio's blocking
//! pool and closes the directory before handing results back. Open directory
//! descriptors are therefore bounded by the blocking pool size, not by the
//! number of measurement tasks waiting on the runtime. Entry types are taken
//! without following symbolic links: only real directories are descended into,
//! and everything else (regular files, symlinks, sockets, ...) is counted as a
//! file using its own metadata.

use crate::data::{FileEntry, Listing};
use crate::error::MeasureError;
use crate::handle::DirectoryHandle;
use async_trait::async_trait;
use clap::ValueEnum;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// How the size of a single file is counted.
///
/// # Variants
/// * `Apparent` - The file's length in bytes
/// * `Disk` - Space allocated on disk (512-byte blocks), like `du`
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
pub enum SizeMode {
    #[default]
    Apparent,
    Disk,
}

/// A directory on the host filesystem.
#[derive(Debug, Clone)]
pub struct FsDirectory {
    path: PathBuf,
    mode: SizeMode,
}

impl FsDirectory {
    /// Resolves `path` as the starting directory of a measurement.
    ///
    /// # Errors
    /// * [`MeasureError::NotFound`] if the path does not exist or is not a directory
    /// * [`MeasureError::PathTooLong`] if the filesystem rejects the path length
    /// * [`MeasureError::Access`] for any other failure to stat the path
    pub async fn open(path: impl Into<PathBuf>, mode: SizeMode) -> Result<Self, MeasureError> {
        let path = path.into();
        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(err) => return Err(MeasureError::from_start_io(path, err)),
        };
        if !metadata.is_dir() {
            return Err(MeasureError::NotFound { path });
        }
        Ok(Self { path, mode })
    }

    pub fn size_mode(&self) -> SizeMode {
        self.mode
    }
}

#[async_trait]
impl DirectoryHandle for FsDirectory {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn files(&self) -> Result<Vec<FileEntry>, MeasureError> {
        Ok(self.listing().await?.files)
    }

    async fn subdirectories(&self) -> Result<Vec<Self>, MeasureError> {
        Ok(self.listing().await?.subdirectories)
    }

    async fn listing(&self) -> Result<Listing<Self>, MeasureError> {
        let path = self.path.clone();
        let mode = self.mode;
        match tokio::task::spawn_blocking(move || read_listing(&path, mode)).await {
            Ok(listing) => listing,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => Err(MeasureError::Cancelled {
                path: self.path.clone(),
            }),
        }
    }
}

/// Reads one directory to completion. The `ReadDir` handle is dropped before
/// this returns.
fn read_listing(dir: &Path, mode: SizeMode) -> Result<Listing<FsDirectory>, MeasureError> {
    let read_dir = std::fs::read_dir(dir).map_err(|err| MeasureError::from_io(dir, err))?;

    let mut listing = Listing::default();
    for entry in read_dir {
        let entry = entry.map_err(|err| MeasureError::from_io(dir, err))?;
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(err) => return Err(MeasureError::from_io(path, err)),
        };

        if file_type.is_dir() {
            listing.subdirectories.push(FsDirectory { path, mode });
        } else {
            // does not traverse symlinks
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) => return Err(MeasureError::from_io(path, err)),
            };
            let size = entry_size(&metadata, mode);
            listing.files.push(FileEntry::new(path, size));
        }
    }

    Ok(listing)
}

/// Returns the size of an entry according to `mode`.
pub fn entry_size(metadata: &Metadata, mode: SizeMode) -> u64 {
    match mode {
        SizeMode::Apparent => metadata.len(),
        SizeMode::Disk => disk_usage(metadata),
    }
}

/// Allocated size, counted the way `du` does: `st_blocks` units of 512 bytes.
#[cfg(unix)]
fn disk_usage(metadata: &Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.blocks().saturating_mul(512)
}

#[cfg(not(unix))]
fn disk_usage(metadata: &Metadata) -> u64 {
    metadata.len()
}
