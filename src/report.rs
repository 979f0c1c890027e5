//! Measuring several top-level paths at once.
//!
//! Every path is its own measurement: it is opened, measured and reported
//! independently of the others, and the grand total is summed here, outside
//! the measurement core.

use crate::data::ReportRecord;
use crate::error::MeasureError;
use crate::fs::{FsDirectory, SizeMode};
use crate::measure::Measurer;
use futures::future::join_all;
use humansize::{DECIMAL, format_size};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// The outcome of measuring one top-level path.
#[derive(Debug)]
pub struct PathReport {
    pub path: PathBuf,
    pub outcome: Result<u64, MeasureError>,
    pub elapsed: Duration,
}

impl PathReport {
    pub fn size(&self) -> Option<u64> {
        self.outcome.as_ref().ok().copied()
    }

    pub fn error(&self) -> Option<&MeasureError> {
        self.outcome.as_ref().err()
    }

    /// Flattens the report into a serializable record.
    pub fn to_record(&self) -> ReportRecord {
        let error = self.error();
        ReportRecord {
            path: self.path.display().to_string(),
            size_bytes: self.size(),
            size_human: self.size().map(|size| format_size(size, DECIMAL)),
            error_kind: error.map(|err| err.kind().as_str()),
            error: error.map(|err| err.to_string()),
            elapsed_ms: u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Opens and measures a single path on the host filesystem.
pub async fn measure_path(
    path: &Path,
    measurer: &Measurer,
    mode: SizeMode,
) -> Result<u64, MeasureError> {
    let dir = FsDirectory::open(path, mode).await?;
    measurer.measure(dir).await
}

/// Measures every path concurrently. Reports keep the order of `paths`.
pub async fn measure_paths(
    paths: &[PathBuf],
    measurer: &Measurer,
    mode: SizeMode,
) -> Vec<PathReport> {
    let measurements = paths.iter().map(|path| async move {
        tracing::debug!("measuring {}", path.display());
        let started = Instant::now();
        let outcome = measure_path(path, measurer, mode).await;
        let elapsed = started.elapsed();

        match &outcome {
            Ok(size) => tracing::debug!("{}: {} bytes in {:?}", path.display(), size, elapsed),
            Err(err) => tracing::warn!("{}: {}", path.display(), err),
        }

        PathReport {
            path: path.clone(),
            outcome,
            elapsed,
        }
    });

    join_all(measurements).await
}

/// Sum of all measured sizes, or `None` if any path failed.
pub fn total_size(reports: &[PathReport]) -> Option<u64> {
    reports
        .iter()
        .try_fold(0u64, |acc, report| acc.checked_add(report.size()?))
}

/// Reports whose measurement failed.
pub fn failures(reports: &[PathReport]) -> impl Iterator<Item = &PathReport> {
    reports.iter().filter(|report| report.outcome.is_err())
}
