//! Recursive concurrent size measurement.
//!
//! The size of a directory is the sum of the files directly inside it plus the
//! sizes of its subdirectories. Every subdirectory is measured by its own task
//! on the tokio runtime, at every level of the tree, so listings of sibling
//! subtrees overlap. A parent only finishes once all of its children have
//! reported, and the first failing child fails the parent.
//!
//! When a child fails, the parent returns immediately and its remaining
//! sibling tasks are aborted. Aborting a task drops its own set of children,
//! so cancellation reaches the whole unfinished part of the tree.
//!
//! Fan-out is unbounded by default. [`Measurer::with_max_in_flight`] caps how
//! many directory listings may run at the same time.

use crate::data::{FileEntry, Listing};
use crate::error::MeasureError;
use crate::handle::DirectoryHandle;
use futures::future::{BoxFuture, FutureExt};
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Measures directory trees. Cloning is cheap and clones share the same
/// listing limit.
#[derive(Debug, Clone, Default)]
pub struct Measurer {
    limit: Option<NonZeroUsize>,
    permits: Option<Arc<Semaphore>>,
}

impl Measurer {
    /// A measurer with unbounded fan-out.
    pub fn new() -> Self {
        Self::default()
    }

    /// A measurer that runs at most `limit` directory listings at once.
    ///
    /// A permit is only held while a directory is being listed, never while
    /// waiting for children, so any limit makes progress.
    pub fn with_max_in_flight(limit: NonZeroUsize) -> Self {
        Self {
            limit: Some(limit),
            permits: Some(Arc::new(Semaphore::new(limit.get()))),
        }
    }

    pub fn max_in_flight(&self) -> Option<NonZeroUsize> {
        self.limit
    }

    /// Returns the total size in bytes of every file beneath `dir`.
    ///
    /// Must be polled from within a tokio runtime; subdirectories are spawned
    /// onto it.
    ///
    /// # Errors
    /// Returns the first failure observed anywhere in the tree. Listing errors
    /// are reported exactly as the handle produced them.
    pub fn measure<D: DirectoryHandle>(&self, dir: D) -> BoxFuture<'static, Result<u64, MeasureError>> {
        let measurer = self.clone();
        async move {
            let listing = measurer.list(&dir).await?;

            let mut subtrees = JoinSet::new();
            for child in listing.subdirectories {
                subtrees.spawn(measurer.measure(child));
            }

            let mut total = sum_files(dir.path(), &listing.files)?;

            // Returning early drops `subtrees`, which aborts unfinished siblings.
            while let Some(joined) = subtrees.join_next().await {
                let size = match joined {
                    Ok(result) => result?,
                    Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                    Err(_) => {
                        return Err(MeasureError::Cancelled {
                            path: dir.path().to_path_buf(),
                        });
                    }
                };
                total = total.checked_add(size).ok_or_else(|| MeasureError::Overflow {
                    path: dir.path().to_path_buf(),
                })?;
            }

            Ok(total)
        }
        .boxed()
    }

    async fn list<D: DirectoryHandle>(&self, dir: &D) -> Result<Listing<D>, MeasureError> {
        let _permit = match &self.permits {
            Some(permits) => Some(permits.acquire().await.map_err(|_| {
                MeasureError::Cancelled {
                    path: dir.path().to_path_buf(),
                }
            })?),
            None => None,
        };
        dir.listing().await
    }
}

/// Measures `dir` with unbounded fan-out.
///
/// # Examples
/// ```rust
/// use dirsize::measure::measure_directory;
/// use dirsize::synthetic::SyntheticDir;
///
/// # #[tokio::main]
/// # async fn main() {
/// let tree = SyntheticDir::new("/a")
///     .file("x", 10)
///     .file("y", 20)
///     .dir(SyntheticDir::new("b").file("z", 5));
/// assert_eq!(measure_directory(tree).await.unwrap(), 35);
/// # }
/// ```
pub async fn measure_directory<D: DirectoryHandle>(dir: D) -> Result<u64, MeasureError> {
    Measurer::new().measure(dir).await
}

fn sum_files(dir: &Path, files: &[FileEntry]) -> Result<u64, MeasureError> {
    files
        .iter()
        .try_fold(0u64, |acc, file| acc.checked_add(file.size))
        .ok_or_else(|| MeasureError::Overflow {
            path: dir.to_path_buf(),
        })
}
