//! JSON output formatter for measurement reports.

use crate::data::ReportRecord;
use crate::report::{PathReport, total_size};
use anyhow::Result;
use humansize::{DECIMAL, format_size};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct JsonReport {
    paths: Vec<ReportRecord>,
    total_bytes: Option<u64>,
    total_human: Option<String>,
}

/// Renders every report and the total as a single pretty-printed document.
/// `total_bytes` is `null` if any path failed.
pub fn render<W: Write>(reports: &[PathReport], mut out: W) -> Result<()> {
    let total = total_size(reports);
    let document = JsonReport {
        paths: reports.iter().map(PathReport::to_record).collect(),
        total_bytes: total,
        total_human: total.map(|size| format_size(size, DECIMAL)),
    };

    serde_json::to_writer_pretty(&mut out, &document)?;
    writeln!(out)?;
    Ok(())
}
