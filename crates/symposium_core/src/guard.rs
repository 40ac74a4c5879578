//! # Mutual Exclusion Guard
//!
//! A single lock serializing every read and write of the shared state.
//! The store lives *inside* the lock, so there is no way to touch a slot
//! without holding it, and the lock is released when the [`GuardedStore`]
//! goes out of scope on every exit path (early return, `?`, unwinding).
//!
//! Critical sections are O(1) state reads and writes plus non-blocking
//! wake signals. Nothing may block on a wake channel while holding the guard.

use std::ops::{Deref, DerefMut};

use parking_lot::{Mutex, MutexGuard};

use crate::state::StateStore;

/// Everything the guard protects: the states plus per-actor meal counters.
#[derive(Debug)]
pub struct Ledger {
    /// Actor states.
    pub store: StateStore,
    /// Number of times each actor has been granted the resource.
    pub meals: Box<[u64]>,
}

/// The single exclusive lock over the [`Ledger`].
#[derive(Debug)]
pub struct Guard {
    ledger: Mutex<Ledger>,
}

impl Guard {
    /// Wraps `store` with zeroed meal counters.
    #[must_use]
    pub fn new(store: StateStore) -> Self {
        let meals = vec![0; store.len()].into_boxed_slice();
        Self {
            ledger: Mutex::new(Ledger { store, meals }),
        }
    }

    /// Blocks until no other unit holds the guard.
    #[inline]
    pub fn acquire(&self) -> GuardedStore<'_> {
        GuardedStore {
            inner: self.ledger.lock(),
        }
    }

    /// Acquires the guard only if it is free right now.
    #[inline]
    pub fn try_acquire(&self) -> Option<GuardedStore<'_>> {
        self.ledger.try_lock().map(|inner| GuardedStore { inner })
    }

    /// Returns true if some unit currently holds the guard.
    #[inline]
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.ledger.is_locked()
    }

    /// Consumes the guard and hands back what it protected.
    #[must_use]
    pub fn into_inner(self) -> Ledger {
        self.ledger.into_inner()
    }
}

/// Exclusive access to the ledger. Dropping it releases the guard.
pub struct GuardedStore<'a> {
    inner: MutexGuard<'a, Ledger>,
}

impl GuardedStore<'_> {
    /// Meal counters.
    #[inline]
    #[must_use]
    pub fn meals(&self) -> &[u64] {
        &self.inner.meals
    }

    /// Records one grant for actor `id`.
    #[inline]
    pub fn record_meal(&mut self, id: usize) {
        self.inner.meals[id] += 1;
    }

    /// Explicit release; equivalent to dropping.
    #[inline]
    pub fn release(self) {}
}

impl Deref for GuardedStore<'_> {
    type Target = StateStore;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.inner.store
    }
}

impl DerefMut for GuardedStore<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner.store
    }
}
