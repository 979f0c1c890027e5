//! The directory abstraction consumed by the measurement core.
//!
//! A [`DirectoryHandle`] is a read-only view of one directory: it can list the
//! files directly inside it and hand out handles for its immediate
//! subdirectories. Sibling order is unspecified. Real filesystems are served by
//! [`crate::fs::FsDirectory`]; [`crate::synthetic::SyntheticDir`] builds trees
//! in memory.

use crate::data::{FileEntry, Listing};
use crate::error::MeasureError;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait DirectoryHandle: Send + Sync + Sized + 'static {
    /// Location of this directory, used when reporting failures.
    fn path(&self) -> &Path;

    /// Files directly inside this directory.
    async fn files(&self) -> Result<Vec<FileEntry>, MeasureError>;

    /// Handles for the directories directly inside this directory.
    async fn subdirectories(&self) -> Result<Vec<Self>, MeasureError>;

    /// Both immediate queries at once.
    ///
    /// Implementations backed by a single listing call should override this
    /// so the directory is only read once.
    async fn listing(&self) -> Result<Listing<Self>, MeasureError> {
        let subdirectories = self.subdirectories().await?;
        let files = self.files().await?;
        Ok(Listing {
            files,
            subdirectories,
        })
    }
}
