//! # Session
//!
//! Startup order matters: the signal handler is installed before the first
//! actor is seated, so ^C during a staggered launch still stops the world.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use symposium_core::{Observer, SessionReport, Symposium, Table};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::render::TerminalRenderer;

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .init();
}

/// Runs one session to completion.
///
/// # Errors
///
/// Config errors, thread spawn failures, signal handler installation
/// failures and panicked units.
pub fn run(cli: &Cli) -> Result<SessionReport> {
    let config = cli.resolve_config().context("invalid configuration")?;
    let table = Table::new(config).context("failed to set the table")?;

    let trigger = table.shutdown_trigger();
    ctrlc::set_handler(move || {
        if trigger.trigger() {
            info!("interrupt received");
        }
    })
    .context("failed to install the ^C handler")?;

    let observer: Option<Box<dyn Observer>> = if cli.no_render {
        None
    } else {
        Some(Box::new(TerminalRenderer::stdout()))
    };

    let symposium = Symposium::launch(table, observer).context("failed to seat the actors")?;
    match cli.duration {
        Some(limit) => symposium.run_for(limit),
        None => symposium.wait(),
    }

    symposium.stop().context("teardown failed")
}

/// Human-readable per-actor summary of a finished session.
#[must_use]
pub fn summarize(report: &SessionReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} actors, {} meals in {:.1}s",
        report.cycles.len(),
        report.last_frame.total_meals(),
        report.elapsed.as_secs_f64()
    );
    for (id, (cycles, meals)) in report
        .cycles
        .iter()
        .zip(&report.last_frame.meals)
        .enumerate()
    {
        let _ = writeln!(out, "  actor {id}: {meals} meals, {cycles} full cycles");
    }
    out
}
