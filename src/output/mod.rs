//! Output renderers for measurement reports.
//!
//! Each renderer writes already-collected [`PathReport`]s to any
//! [`std::io::Write`] destination and contains no measurement logic.
//!
//! # Available Formatters
//!
//! - **Terminal**: Human-readable lines with `[DIR]`/`[ERR]` prefixes and a total
//! - **CSV**: One record per measured path
//! - **JSON**: All records plus the total in one document

pub mod csv;
pub mod json;
pub mod terminal;

use crate::cli::{Args, OutputFormat};
use crate::report::PathReport;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// CSV output renderer function.
///
/// See [`csv::render`] for full documentation.
pub use self::csv::render as render_csv;

/// JSON output renderer function.
///
/// See [`json::render`] for full documentation.
pub use self::json::render as render_json;

/// Terminal output renderer function.
///
/// See [`terminal::render`] for full documentation.
pub use self::terminal::render as render_terminal;

/// Renders `reports` in the format selected by `args`, to `--output` if given
/// and stdout otherwise.
pub fn write_report(reports: &[PathReport], args: &Args) -> Result<()> {
    let mut writer: Box<dyn Write> = match &args.output {
        Some(output_file) => Box::new(BufWriter::new(
            File::create(output_file)
                .with_context(|| format!("Failed to create {}", output_file))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        OutputFormat::Terminal => render_terminal(reports, args, &mut writer)?,
        OutputFormat::Csv => render_csv(reports, &mut writer)?,
        OutputFormat::Json => render_json(reports, &mut writer)?,
    }
    writer.flush()?;

    if let Some(output_file) = &args.output {
        eprintln!("Output saved to: {}", output_file);
    }

    Ok(())
}
