//! CLI interface definitions for the `dirsize` application.
//!
//! This module defines command-line arguments using [`clap`] and exposes:
//!
//! - [`Args`]: the main struct parsed from CLI inputs
//! - [`OutputFormat`]: how results are rendered
//! - [`SizeMode`]: re-exported from [`crate::fs`] for the `--size-mode` flag
//!
//! # Example
//!
//! ```bash
//! dirsize ~/src ~/Downloads --max-in-flight 64 --format csv --output sizes.csv
//! ```

pub use crate::fs::SizeMode;
use crate::thread_pool::ThreadPoolStrategy;
use clap::{Parser, ValueEnum};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Command-line arguments for the `dirsize` calculator.
///
/// Each path is measured independently and concurrently; the total is the sum
/// of the per-path results.
#[derive(Parser, Debug, Clone)]
#[command(name = "dirsize", version, about)]
pub struct Args {
    /// Directories to measure (defaults to current directory)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<String>,

    /// Count byte lengths or allocated disk space
    #[arg(long, value_enum, default_value_t = SizeMode::Apparent)]
    pub size_mode: SizeMode,

    /// Limit how many directories are listed at the same time (default: unbounded)
    #[arg(long, value_name = "N")]
    pub max_in_flight: Option<NonZeroUsize>,

    /// Limit the number of runtime worker threads (default: use all available)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Runtime thread strategy (hidden experimental flag)
    #[arg(long = "threads-strategy", value_enum, default_value_t = ThreadPoolStrategy::Default, hide = true)]
    pub threads_strategy: ThreadPoolStrategy,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Show how long each path took to measure
    #[arg(long, default_value_t = false)]
    pub profile: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// How results are rendered.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum OutputFormat {
    Terminal,
    Csv,
    Json,
}
