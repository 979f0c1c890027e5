//! In-memory directory trees.
//!
//! [`SyntheticDir`] implements [`DirectoryHandle`] without touching the host
//! filesystem. Trees are assembled with a small builder API, and individual
//! directories can be made to fail when listed. Listings can be slowed down,
//! reversed, and observed through a [`ListingTracker`], which makes the type
//! useful for exercising the concurrency of the measurement core.
//!
//! ```rust
//! use dirsize::synthetic::SyntheticDir;
//!
//! let tree = SyntheticDir::new("/a")
//!     .file("x", 10)
//!     .file("y", 20)
//!     .dir(SyntheticDir::new("b").file("z", 5));
//! ```

use crate::data::{FileEntry, Listing};
use crate::error::MeasureError;
use crate::handle::DirectoryHandle;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
enum Failure {
    Kind(io::ErrorKind),
    Os(i32),
}

impl Failure {
    fn to_io(self) -> io::Error {
        match self {
            Failure::Kind(kind) => io::Error::from(kind),
            Failure::Os(code) => io::Error::from_raw_os_error(code),
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    name: PathBuf,
    files: Vec<(String, u64)>,
    dirs: Vec<Arc<Node>>,
    failure: Option<Failure>,
}

/// A directory tree held entirely in memory.
#[derive(Debug, Clone)]
pub struct SyntheticDir {
    path: PathBuf,
    node: Arc<Node>,
    reversed: bool,
    latency: Option<Duration>,
    tracker: Option<ListingTracker>,
}

impl SyntheticDir {
    /// Creates an empty directory. When used as a child, `name` is joined
    /// onto the parent's path.
    pub fn new(name: impl Into<PathBuf>) -> Self {
        let name = name.into();
        Self {
            path: name.clone(),
            node: Arc::new(Node {
                name,
                files: Vec::new(),
                dirs: Vec::new(),
                failure: None,
            }),
            reversed: false,
            latency: None,
            tracker: None,
        }
    }

    /// Adds a file of `size` bytes.
    pub fn file(mut self, name: impl Into<String>, size: u64) -> Self {
        Arc::make_mut(&mut self.node).files.push((name.into(), size));
        self
    }

    /// Adds a subdirectory.
    pub fn dir(mut self, child: SyntheticDir) -> Self {
        Arc::make_mut(&mut self.node).dirs.push(child.node);
        self
    }

    /// Makes listing this directory fail with a permission error.
    pub fn deny_access(self) -> Self {
        self.fail_with_kind(io::ErrorKind::PermissionDenied)
    }

    /// Makes listing this directory fail with an error of the given kind.
    pub fn fail_with_kind(mut self, kind: io::ErrorKind) -> Self {
        Arc::make_mut(&mut self.node).failure = Some(Failure::Kind(kind));
        self
    }

    /// Makes listing this directory fail with a raw OS error code.
    pub fn fail_with_os_error(mut self, code: i32) -> Self {
        Arc::make_mut(&mut self.node).failure = Some(Failure::Os(code));
        self
    }

    /// Lists entries in reverse insertion order, for this directory and every
    /// handle derived from it.
    pub fn with_reversed_order(mut self) -> Self {
        self.reversed = true;
        self
    }

    /// Delays every listing in this tree by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Records listing activity for this tree in `tracker`.
    pub fn with_tracker(mut self, tracker: ListingTracker) -> Self {
        self.tracker = Some(tracker);
        self
    }

    fn child(&self, node: &Arc<Node>) -> SyntheticDir {
        SyntheticDir {
            path: self.path.join(&node.name),
            node: Arc::clone(node),
            reversed: self.reversed,
            latency: self.latency,
            tracker: self.tracker.clone(),
        }
    }
}

#[async_trait]
impl DirectoryHandle for SyntheticDir {
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
        let _guard = self.tracker.as_ref().map(ListingTracker::enter);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(failure) = self.node.failure {
            return Err(MeasureError::from_io(&self.path, failure.to_io()));
        }

        let mut files: Vec<FileEntry> = self
            .node
            .files
            .iter()
            .map(|(name, size)| FileEntry::new(self.path.join(name), *size))
            .collect();
        let mut subdirectories: Vec<SyntheticDir> =
            self.node.dirs.iter().map(|node| self.child(node)).collect();

        if self.reversed {
            files.reverse();
            subdirectories.reverse();
        }

        Ok(Listing {
            files,
            subdirectories,
        })
    }
}

#[derive(Debug, Default)]
struct TrackerState {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    listings: AtomicUsize,
}

/// Shared counters describing listing activity across a tree.
#[derive(Debug, Clone, Default)]
pub struct ListingTracker {
    state: Arc<TrackerState>,
}

impl ListingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listings currently in progress.
    pub fn in_flight(&self) -> usize {
        self.state.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of listings ever in progress at once.
    pub fn peak(&self) -> usize {
        self.state.peak.load(Ordering::SeqCst)
    }

    /// Listings started so far.
    pub fn listings(&self) -> usize {
        self.state.listings.load(Ordering::SeqCst)
    }

    fn enter(&self) -> TrackerGuard {
        self.state.listings.fetch_add(1, Ordering::SeqCst);
        let now = self.state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.peak.fetch_max(now, Ordering::SeqCst);
        TrackerGuard {
            state: Arc::clone(&self.state),
        }
    }
}

// Decrements on drop so aborted listings are accounted for too.
struct TrackerGuard {
    state: Arc<TrackerState>,
}

impl Drop for TrackerGuard {
    fn drop(&mut self) {
        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
