//! # SYMPOSIUM
//!
//! The runnable table: command line, terminal rendering and Ctrl-C
//! teardown around [`symposium_core`].
//!
//! ## Modules
//!
//! - `cli`: argument parsing and config layering
//! - `render`: ANSI terminal observer
//! - `session`: wiring the table, the renderer and the signal handler

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod render;
pub mod session;

pub use cli::Cli;
pub use render::TerminalRenderer;
pub use session::{init_tracing, run, summarize};
