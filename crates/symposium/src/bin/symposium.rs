//! # SYMPOSIUM
//!
//! ```bash
//! # five philosophers, think 1s, eat 1s, until ^C
//! symposium 5 1 1
//!
//! # headless ten-second run with info logs
//! symposium 7 0.2 0.1 --duration 10 --no-render -v
//! ```

use std::process::ExitCode;

use clap::Parser;
use symposium::{init_tracing, run, summarize, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(report) => {
            print!("{}", summarize(&report));
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("symposium: {error:#}");
            ExitCode::FAILURE
        }
    }
}
