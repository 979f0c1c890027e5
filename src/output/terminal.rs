//! Terminal output formatter for measurement reports.

use crate::cli::Args;
use crate::report::{PathReport, total_size};
use anyhow::Result;
use humansize::{DECIMAL, format_size};
use std::io::Write;

/// Renders reports as human-readable lines.
///
/// Successful paths print as `[DIR]` lines with a human-readable size, failed
/// paths as `[ERR]` lines with the failure category and message. A `[TOTAL]`
/// line follows only when every path succeeded. With `--profile` each line
/// also shows how long the path took.
pub fn render<W: Write>(reports: &[PathReport], args: &Args, out: &mut W) -> Result<()> {
    for report in reports {
        let timing = if args.profile {
            format!("{:>8.2?} ", report.elapsed)
        } else {
            String::new()
        };

        match &report.outcome {
            Ok(size) => writeln!(
                out,
                "[DIR]   {:<12} {}{}",
                format_size(*size, DECIMAL),
                timing,
                report.path.display()
            )?,
            Err(err) => writeln!(
                out,
                "[ERR]   {:<12} {}{}",
                err.kind().as_str(),
                timing,
                err
            )?,
        }
    }

    if reports.len() > 1
        && let Some(total) = total_size(reports)
    {
        writeln!(out, "[TOTAL] {}", format_size(total, DECIMAL))?;
    }

    Ok(())
}
