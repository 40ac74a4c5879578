//! # Wake Channels
//!
//! One binary signal per actor. Any actor may `signal` channel `i` (always
//! while holding the guard, as part of a grant); only actor `i` ever waits
//! on it.
//!
//! ```text
//!   releaser ──signal(i)──┐
//!                         ▼
//!                 ┌───────────────┐
//!                 │ permits: 0/1  │──wait()──> actor i
//!                 │ closed: bool  │
//!                 └───────────────┘
//! ```
//!
//! A grant is only issued to a `Wanting` actor and flips it to `Active`
//! in the same critical section, so at most one permit is ever pending.
//! Closing a channel wakes its waiter without a permit; that is how
//! stop-the-world reaches actors parked in `wait`.

use parking_lot::{Condvar, Mutex};

/// What ended a [`WakeChannel::wait`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WakeOutcome {
    /// A grant was consumed.
    Granted,
    /// The channel was closed by shutdown.
    Closed,
}

#[derive(Debug, Default)]
struct Slot {
    permits: u32,
    closed: bool,
}

/// Counting signal with a non-blocking `signal` and a blocking `wait`.
#[derive(Debug, Default)]
pub struct WakeChannel {
    slot: Mutex<Slot>,
    wakeup: Condvar,
}

impl WakeChannel {
    /// Creates an open channel with no pending permit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one permit and wakes the waiter, if any. Never blocks on
    /// anything but the channel's own short internal lock.
    pub fn signal(&self) {
        let mut slot = self.slot.lock();
        slot.permits += 1;
        debug_assert!(
            slot.permits <= 1,
            "double grant: {} permits pending",
            slot.permits
        );
        self.wakeup.notify_one();
    }

    /// Blocks until a permit is available (consuming it) or the channel
    /// is closed. A closed channel wins over a pending permit.
    pub fn wait(&self) -> WakeOutcome {
        let mut slot = self.slot.lock();
        loop {
            if slot.closed {
                return WakeOutcome::Closed;
            }
            if slot.permits > 0 {
                slot.permits -= 1;
                return WakeOutcome::Granted;
            }
            self.wakeup.wait(&mut slot);
        }
    }

    /// Consumes a pending permit without blocking.
    pub fn try_consume(&self) -> bool {
        let mut slot = self.slot.lock();
        if slot.permits > 0 {
            slot.permits -= 1;
            true
        } else {
            false
        }
    }

    /// Number of signals not yet consumed by a wait.
    #[must_use]
    pub fn pending(&self) -> u32 {
        self.slot.lock().permits
    }

    /// Closes the channel and wakes any waiter. Idempotent.
    pub fn close(&self) {
        let mut slot = self.slot.lock();
        slot.closed = true;
        self.wakeup.notify_all();
    }

    /// Returns true once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.slot.lock().closed
    }
}

/// Where grants are delivered.
///
/// The protocol signals through this seam so the same transition code
/// drives real channels and bookkeeping models alike.
pub trait WakeSink {
    /// Delivers one grant to actor `id`.
    fn signal(&self, id: usize);
}

impl WakeSink for [WakeChannel] {
    #[inline]
    fn signal(&self, id: usize) {
        self[id].signal();
    }
}
