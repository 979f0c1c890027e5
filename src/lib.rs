//! Library crate for dirsize
//!
//! Measures the total size of directory trees by summing every file beneath a
//! starting directory. Sibling subdirectories are measured concurrently as
//! tokio tasks at every level of the tree.
//!
//! # Modules
//!
//! - [`measure`]: The recursive concurrent measurement core
//! - [`handle`]: The [`DirectoryHandle`] abstraction the core consumes
//! - [`fs`]: Host filesystem handles
//! - [`synthetic`]: In-memory handles for tests and benchmarks
//! - [`error`]: Failure taxonomy
//! - [`report`]: Measuring several top-level paths and summing them
//! - [`cli`]: Command-line interface definitions
//! - [`output`]: Terminal, CSV and JSON renderers
//! - [`thread_pool`]: Runtime worker configuration
//! - [`data`]: Shared data structures

pub mod cli;
pub mod data;
pub mod error;
pub mod fs;
pub mod handle;
pub mod measure;
pub mod output;
pub mod report;
pub mod synthetic;
pub mod thread_pool;

pub use cli::Args;
pub use data::FileEntry;
pub use error::{ErrorKind, MeasureError};
pub use handle::DirectoryHandle;
pub use measure::{Measurer, measure_directory};
