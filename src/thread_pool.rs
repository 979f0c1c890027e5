//! Runtime configuration strategies.
//!
//! Measurement tasks run on a multi-threaded tokio runtime. This module picks
//! the number of worker threads for it.
//!
//! # Strategies
//! - `Default`: One worker per CPU
//! - `Fixed`: Uses a fixed number of threads
//! - `NumCpusMinus1`: Uses number of CPUs minus 1 (leaves one CPU free)
//! - `IOHeavy`: Optimized for I/O-heavy workloads (2x CPU count)

use anyhow::{Context, Result};
use clap::ValueEnum;
use tokio::runtime::Runtime;

/// Upper bound on blocking-pool threads. Each directory listing holds one
/// descriptor on a blocking thread, so this also bounds open directories.
pub const MAX_BLOCKING_THREADS: usize = 128;

/// Thread pool configuration strategies.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum ThreadPoolStrategy {
    /// One worker per CPU
    Default,
    /// Use a fixed number of threads
    Fixed,
    /// Use number of CPUs minus 1 (leaves one CPU free)
    NumCpusMinus1,
    /// Optimized for I/O-heavy workloads (2x CPU count)
    IOHeavy,
}

impl ThreadPoolStrategy {
    /// Returns a string representation of the strategy for display purposes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreadPoolStrategy::Default => "Default",
            ThreadPoolStrategy::Fixed => "Fixed",
            ThreadPoolStrategy::NumCpusMinus1 => "NumCpusMinus1",
            ThreadPoolStrategy::IOHeavy => "IOHeavy",
        }
    }
}

/// Works out the worker thread count for a strategy.
///
/// # Arguments
/// * `strategy` - The thread pool strategy to use
/// * `n_threads` - Number of threads (used for Fixed strategy, ignored for others)
pub fn worker_threads(strategy: ThreadPoolStrategy, n_threads: usize) -> Result<usize> {
    let cpus = num_cpus::get();
    let threads = match strategy {
        ThreadPoolStrategy::Default => cpus,
        ThreadPoolStrategy::Fixed => {
            if n_threads == 0 {
                anyhow::bail!("Fixed strategy requires n_threads > 0");
            }
            n_threads
        }
        ThreadPoolStrategy::NumCpusMinus1 => std::cmp::max(1, cpus.saturating_sub(1)),
        ThreadPoolStrategy::IOHeavy => cpus * 2,
    };
    Ok(threads)
}

/// Builds the multi-threaded runtime used for measurement.
///
/// An explicit `threads` count always wins and implies the `Fixed` strategy.
///
/// # Examples
/// ```rust
/// use dirsize::thread_pool::{build_runtime, ThreadPoolStrategy};
///
/// let runtime = build_runtime(ThreadPoolStrategy::Fixed, Some(2)).unwrap();
/// assert_eq!(runtime.block_on(async { 1 + 1 }), 2);
/// ```
pub fn build_runtime(strategy: ThreadPoolStrategy, threads: Option<usize>) -> Result<Runtime> {
    let (strategy, requested) = match threads {
        Some(n) => (ThreadPoolStrategy::Fixed, n),
        None => (strategy, 0),
    };
    let actual_threads = worker_threads(strategy, requested)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(actual_threads)
        .max_blocking_threads(MAX_BLOCKING_THREADS)
        .enable_all()
        .build()
        .context("Failed to configure runtime")?;

    tracing::info!(
        "Using {} strategy with {} threads",
        strategy.as_str(),
        actual_threads
    );
    Ok(runtime)
}
