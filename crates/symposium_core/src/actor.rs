//! # Actor Loop
//!
//! ```text
//!   ┌──────────┐  think   ┌───────────┐  granted  ┌──────────┐
//!   │   Idle   │ ───────> │  Wanting  │ ────────> │  Active  │
//!   └──────────┘          └───────────┘           └──────────┘
//!        ^                                             │ use
//!        └──────────────────── release ────────────────┘
//! ```
//!
//! The loop has no terminal state of its own; it ends only when
//! stop-the-world fires. Every blocking point (think, the wake wait, use)
//! observes shutdown.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::state::ActorState;
use crate::table::Table;
use crate::wake::WakeOutcome;

/// One participant in the ring. Its id and durations are private to it.
#[derive(Debug)]
pub struct Actor {
    id: usize,
    table: Arc<Table>,
    think: Duration,
    use_duration: Duration,
}

impl Actor {
    /// Creates actor `id` seated at `table`.
    #[must_use]
    pub fn new(id: usize, table: Arc<Table>, think: Duration, use_duration: Duration) -> Self {
        Self {
            id,
            table,
            think,
            use_duration,
        }
    }

    /// This actor's position in the ring.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Runs think -> acquire -> use -> release until shutdown.
    ///
    /// Returns the number of completed cycles.
    #[must_use]
    pub fn run(&self) -> u64 {
        let token = self.table.shutdown_token();
        let mut cycles = 0u64;
        debug!(actor = self.id, "seated");

        loop {
            if !token.sleep(self.think) {
                break;
            }

            self.table.request(self.id);
            if self.table.await_grant(self.id) == WakeOutcome::Closed {
                // granted but never woken: only this actor can leave Active
                if self.table.state(self.id) == ActorState::Active {
                    self.table.release(self.id);
                }
                break;
            }

            trace!(actor = self.id, "eating");
            let finished = token.sleep(self.use_duration);
            self.table.release(self.id);
            if !finished {
                break;
            }
            cycles += 1;
        }

        debug!(actor = self.id, cycles, "leaving");
        cycles
    }
}
