//! # The Table
//!
//! Owns the one guard (and the store inside it), the N wake channels and
//! the shutdown broadcast. Shared between units as an `Arc<Table>`; there
//! is no ambient global state.
//!
//! ```text
//!            ┌──────────────── Table ────────────────┐
//!            │  Guard ─ Mutex<Ledger{store, meals}>  │
//!  actor i ─>│  channels[0..N]                       │<─ observer (snapshot)
//!            │  ShutdownTrigger / ShutdownToken      │
//!            └───────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use crate::actor::Actor;
use crate::config::TableConfig;
use crate::error::{CoreError, CoreResult};
use crate::guard::Guard;
use crate::observer::Frame;
use crate::protocol::{self, Handoff};
use crate::ring::Ring;
use crate::shutdown::{shutdown_pair, ShutdownToken, ShutdownTrigger};
use crate::state::{ActorState, StateStore};
use crate::wake::{WakeChannel, WakeOutcome};

/// Shared synchronization state for one ring of actors.
#[derive(Debug)]
pub struct Table {
    config: TableConfig,
    ring: Ring,
    guard: Guard,
    channels: Box<[WakeChannel]>,
    trigger: ShutdownTrigger,
    token: ShutdownToken,
}

impl Table {
    /// Builds a table with N idle actors.
    ///
    /// # Errors
    ///
    /// Returns the [`TableConfig::validate`] errors.
    pub fn new(config: TableConfig) -> CoreResult<Self> {
        config.validate()?;
        let ring = Ring::new(config.actor_count())?;
        let channels = ring.ids().map(|_| WakeChannel::new()).collect();
        let (trigger, token) = shutdown_pair();

        info!(actors = ring.len(), think_ms = config.think_ms, use_ms = config.use_ms, "table set");

        Ok(Self {
            guard: Guard::new(StateStore::new(ring)),
            config,
            ring,
            channels,
            trigger,
            token,
        })
    }

    /// Configuration the table was built with.
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Ring geometry.
    #[must_use]
    pub const fn ring(&self) -> Ring {
        self.ring
    }

    /// Number of actors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ring.len()
    }

    /// Always false; a table has at least one actor.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The guard over the shared store.
    #[must_use]
    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    /// Wake channel of actor `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    #[must_use]
    pub fn channel(&self, id: usize) -> &WakeChannel {
        &self.channels[id]
    }

    /// A handle that fires stop-the-world.
    #[must_use]
    pub fn shutdown_trigger(&self) -> ShutdownTrigger {
        self.trigger.clone()
    }

    /// A handle that observes stop-the-world.
    #[must_use]
    pub fn shutdown_token(&self) -> ShutdownToken {
        self.token.clone()
    }

    /// Acquisition, first half: mark `id` wanting and self-grant if
    /// neither neighbor is active. Never blocks beyond the guard.
    ///
    /// Returns true if granted inline.
    pub fn request(&self, id: usize) -> bool {
        let mut held = self.guard.acquire();
        let granted = protocol::request(&mut held, &*self.channels, id);
        if granted {
            held.record_meal(id);
        }
        drop(held);

        debug!(actor = id, granted, "requested");
        granted
    }

    /// Acquisition, second half: block on the actor's own wake channel.
    ///
    /// Must be called without holding the guard.
    pub fn await_grant(&self, id: usize) -> WakeOutcome {
        self.channels[id].wait()
    }

    /// [`request`](Self::request) followed by [`await_grant`](Self::await_grant).
    pub fn acquire(&self, id: usize) -> WakeOutcome {
        self.request(id);
        self.await_grant(id)
    }

    /// Marks `id` idle and hands the resource to any neighbor that became
    /// eligible.
    pub fn release(&self, id: usize) -> Handoff {
        let mut held = self.guard.acquire();
        let handoff = protocol::release(&mut held, &*self.channels, id);
        for neighbor in handoff.iter() {
            held.record_meal(neighbor);
        }
        drop(held);

        debug!(actor = id, handed_to = ?handoff, "released");
        handoff
    }

    /// State of actor `id`, read under the guard.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    #[must_use]
    pub fn state(&self, id: usize) -> ActorState {
        self.guard.acquire().get(id)
    }

    /// Current states, read under the guard.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ActorState> {
        self.guard.acquire().snapshot()
    }

    /// Current states and meal counters, read under the guard in one
    /// critical section.
    #[must_use]
    pub fn frame(&self) -> Frame {
        let held = self.guard.acquire();
        Frame {
            states: held.snapshot(),
            meals: held.meals().to_vec(),
        }
    }

    /// Actor entry point: runs the think/acquire/use/release loop for
    /// `id` until stop-the-world. Returns the number of completed cycles.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ActorOutOfRange`] if `id` is not at this table.
    pub fn run_actor(self: &Arc<Self>, id: usize) -> CoreResult<u64> {
        if !self.ring.contains(id) {
            return Err(CoreError::ActorOutOfRange {
                id,
                actors: self.ring.len(),
            });
        }
        let actor = Actor::new(
            id,
            Arc::clone(self),
            self.config.think(),
            self.config.use_duration(),
        );
        Ok(actor.run())
    }

    /// Fires the shutdown broadcast and closes every wake channel so no
    /// unit stays parked. Idempotent.
    pub fn stop_the_world(&self) {
        let first = self.trigger.trigger();
        for channel in self.channels.iter() {
            channel.close();
        }
        if first {
            info!("stop the world");
        }
    }

    /// Returns true once [`stop_the_world`](Self::stop_the_world) fired.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.token.is_triggered()
    }

    /// Releases the guard, the channels and the store. Consuming `self`
    /// means it can only happen once; requiring the last `Arc` means it
    /// can only happen after every unit is gone.
    ///
    /// Returns the final frame.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TableStillShared`] if another handle exists.
    pub fn destroy(table: Arc<Self>) -> CoreResult<Frame> {
        let table = Arc::try_unwrap(table).map_err(|_| CoreError::TableStillShared)?;
        table.stop_the_world();

        let Self { guard, channels, .. } = table;
        drop(channels);
        let ledger = guard.into_inner();

        info!(meals = ledger.meals.iter().sum::<u64>(), "table destroyed");
        Ok(Frame {
            states: ledger.store.snapshot(),
            meals: ledger.meals.into_vec(),
        })
    }
}
