//! CSV output formatter for measurement reports.
//!
//! Failed paths keep their row, with empty size columns and the error filled in.

use crate::report::PathReport;
use anyhow::Result;
use csv::Writer;
use std::io::Write;

/// Renders one CSV record per report using [`crate::data::ReportRecord`].
pub fn render<W: Write>(reports: &[PathReport], out: W) -> Result<()> {
    let mut csv_writer = Writer::from_writer(out);

    for report in reports {
        csv_writer.serialize(report.to_record())?;
    }

    csv_writer.flush()?;
    Ok(())
}
