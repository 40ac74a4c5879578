//! # Readiness Predicate
//!
//! The only deadlock-avoidance mechanism in the engine: an actor may become
//! active iff it wants to and neither neighbor is active. Callers must hold
//! the guard, since the predicate reads the store.

use crate::state::{ActorState, StateStore};

/// Returns true iff actor `id` is wanting and neither neighbor is active.
///
/// For a single actor both neighbors are the actor itself, which is
/// `Wanting` (not `Active`) at the moment of the check, so it never
/// blocks itself.
#[inline]
#[must_use]
pub fn eligible(store: &StateStore, id: usize) -> bool {
    let ring = store.ring();
    store.get(id) == ActorState::Wanting
        && store.get(ring.left(id)) != ActorState::Active
        && store.get(ring.right(id)) != ActorState::Active
}

/// Returns true if at least one actor could be granted right now.
#[must_use]
pub fn any_eligible(store: &StateStore) -> bool {
    store.ring().ids().any(|id| eligible(store, id))
}
