//! Main entry point for the `dirsize` CLI application.
//!
//! # Responsibilities
//! - Parses CLI arguments via [`clap`] using the [`Args`] struct
//! - Configures logging and the tokio runtime
//! - Measures every requested path concurrently via [`report::measure_paths`]
//! - Renders the results and sets the exit status
//!
//! A spinner runs on stderr while the measurement is awaited. The optional
//! `--timeout` deadline drops the in-flight measurement, which aborts its tasks.

use anyhow::{Context, Result};
use clap::Parser;
use dirsize::measure::Measurer;
use dirsize::thread_pool::build_runtime;
use dirsize::{Args, output, report};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Installs a stderr logger whose level follows the `-v` count.
///
/// `DIRSIZE_LOG` replaces the derived filter entirely.
fn configure_logging(verbosity: u8) -> Result<()> {
    use tracing_subscriber::layer::SubscriberExt;

    let directives = match std::env::var("DIRSIZE_LOG") {
        Ok(overrides) => overrides,
        Err(_) => match verbosity {
            0 => "dirsize=warn",
            1 => "dirsize=info",
            2 => "dirsize=debug",
            _ => "dirsize=trace",
        }
        .to_string(),
    };

    let env_filter = tracing_subscriber::filter::EnvFilter::new(directives);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(verbosity >= 3);
    let subscriber = tracing_subscriber::Registry::default()
        .with(env_filter)
        .with(fmt_layer);

    tracing::subscriber::set_global_default(subscriber).context("Failed to set default logger")
}

fn spinner() -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✔"])
            .template("{spinner} Measuring... [{elapsed}]")
            .context("Failed to set progress template")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

async fn run(args: &Args) -> Result<Vec<report::PathReport>> {
    let measurer = match args.max_in_flight {
        Some(limit) => Measurer::with_max_in_flight(limit),
        None => Measurer::new(),
    };

    let pb = spinner()?;
    let measurement = report::measure_paths(&args.paths, &measurer, args.size_mode);
    let reports = match args.timeout {
        Some(secs) => {
            let deadline = Duration::from_secs(secs);
            match tokio::time::timeout(deadline, measurement).await {
                Ok(reports) => reports,
                Err(_) => {
                    pb.finish_and_clear();
                    anyhow::bail!("Measurement timed out after {}s", secs);
                }
            }
        }
        None => measurement.await,
    };
    pb.finish_and_clear();

    Ok(reports)
}

fn main() -> Result<()> {
    let args = Args::parse();
    configure_logging(args.verbose)?;

    let runtime = build_runtime(args.threads_strategy, args.threads)?;
    let reports = runtime.block_on(run(&args))?;

    output::write_report(&reports, &args)?;

    let failed = report::failures(&reports).count();
    if failed > 0 {
        anyhow::bail!("{} of {} path(s) could not be measured", failed, reports.len());
    }
    Ok(())
}
