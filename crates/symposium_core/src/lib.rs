//! # SYMPOSIUM Core Engine
//!
//! Deadlock-free sharing of boundary resources around a ring of actors
//! (the dining philosophers), built from:
//!
//! 1. **One guard** - a single lock serializing every state read and write
//! 2. **One predicate** - an actor may eat iff it is hungry and neither
//!    neighbor is eating
//! 3. **One wake channel per actor** - granted actors are signalled, blocked
//!    actors wait on their own channel only
//!
//! ## Architecture
//!
//! ```text
//!   actor 0 ─┐                                     ┌─> channel 0
//!   actor 1 ─┼─> Guard ─> StateStore ─> eligible? ─┼─> channel 1
//!   actor N ─┘      (test on every mutation)       └─> channel N
//!                     ^
//!   observer ─────────┘ (read-only frames)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use symposium_core::{Symposium, Table, TableConfig};
//!
//! let table = Table::new(TableConfig::default())?;
//! let symposium = Symposium::launch(table, None)?;
//! symposium.run_for(Duration::from_secs(10));
//! let report = symposium.stop()?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod actor;
pub mod config;
pub mod error;
pub mod guard;
pub mod observer;
pub mod predicate;
pub mod protocol;
pub mod ring;
pub mod runtime;
pub mod shutdown;
pub mod state;
pub mod table;
pub mod wake;

pub use actor::Actor;
pub use config::TableConfig;
pub use error::{CoreError, CoreResult};
pub use guard::{Guard, GuardedStore, Ledger};
pub use observer::{Frame, Observer};
pub use predicate::{any_eligible, eligible};
pub use protocol::Handoff;
pub use ring::Ring;
pub use runtime::{SessionReport, Symposium};
pub use shutdown::{shutdown_pair, ShutdownToken, ShutdownTrigger};
pub use state::{ActorState, StateStore};
pub use table::Table;
pub use wake::{WakeChannel, WakeOutcome, WakeSink};
