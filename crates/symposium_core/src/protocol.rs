//! # Grant Protocol
//!
//! The two guarded transitions every actor performs, with the predicate
//! re-tested after each mutation:
//!
//! ```text
//! request(i):  state[i] = Wanting
//!              grant(i)                      // inline self-grant
//!
//! release(i):  state[i] = Idle
//!              grant(left(i)); grant(right(i))
//!
//! grant(j):    if eligible(j) { state[j] = Active; signal(j) }
//! ```
//!
//! Only a releasing neighbor can newly satisfy a waiting actor's
//! predicate, so testing both neighbors on release guarantees every
//! blocked actor receives its wake once both neighbors are done.
//!
//! These functions take the store by `&mut`, which the caller can only
//! obtain through the guard.

use tracing::trace;

use crate::predicate::eligible;
use crate::state::{ActorState, StateStore};
use crate::wake::WakeSink;

/// Neighbors granted by a release, left first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Handoff {
    granted: [Option<usize>; 2],
}

impl Handoff {
    /// Iterates the granted actor ids.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.granted.iter().flatten().copied()
    }

    /// Number of neighbors granted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if the release granted nobody.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.granted.iter().all(Option::is_none)
    }

    /// Returns true if `id` was granted.
    #[must_use]
    pub fn contains(&self, id: usize) -> bool {
        self.iter().any(|granted| granted == id)
    }
}

/// Grants actor `id` if the predicate allows it.
///
/// Returns true if a grant was issued.
pub fn grant_if_eligible<S>(store: &mut StateStore, wake: &S, id: usize) -> bool
where
    S: WakeSink + ?Sized,
{
    if !eligible(store, id) {
        return false;
    }
    store.set(id, ActorState::Active);
    wake.signal(id);
    check_invariants(store);
    trace!(actor = id, "granted");
    true
}

/// Marks `id` as wanting and self-grants if uncontended.
///
/// Returns true if the actor was granted inline; its wake channel then
/// already holds the permit. Either way the caller must release the
/// guard and then wait on its channel.
pub fn request<S>(store: &mut StateStore, wake: &S, id: usize) -> bool
where
    S: WakeSink + ?Sized,
{
    store.set(id, ActorState::Wanting);
    trace!(actor = id, "wanting");
    grant_if_eligible(store, wake, id)
}

/// Marks `id` as idle and grants whichever neighbors became eligible.
pub fn release<S>(store: &mut StateStore, wake: &S, id: usize) -> Handoff
where
    S: WakeSink + ?Sized,
{
    debug_assert_eq!(
        store.get(id),
        ActorState::Active,
        "actor {id} released without holding the resource"
    );
    store.set(id, ActorState::Idle);
    trace!(actor = id, "idle");
    check_invariants(store);

    let mut handoff = Handoff::default();
    for (slot, neighbor) in handoff.granted.iter_mut().zip(store.ring().neighbors(id)) {
        if grant_if_eligible(store, wake, neighbor) {
            *slot = Some(neighbor);
        }
    }
    handoff
}

/// Asserts that no two neighbors are active. Compiled out of release builds.
#[inline]
pub fn check_invariants(store: &StateStore) {
    if cfg!(debug_assertions) {
        if let Some((a, b)) = store.adjacent_active() {
            panic!("neighbors {a} and {b} are both active: {:?}", store.states());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::Ring;
    use crate::state::ActorState::{Active, Idle, Wanting};
    use std::cell::RefCell;

    /// Records every grant instead of waking anyone.
    #[derive(Default)]
    struct Recorder {
        grants: RefCell<Vec<usize>>,
    }

    impl WakeSink for Recorder {
        fn signal(&self, id: usize) {
            self.grants.borrow_mut().push(id);
        }
    }

    fn store(len: usize) -> StateStore {
        StateStore::new(Ring::new(len).unwrap())
    }

    #[test]
    fn test_uncontended_request_self_grants() {
        let mut store = store(5);
        let sink = Recorder::default();

        assert!(request(&mut store, &sink, 2));
        assert_eq!(store.get(2), Active);
        assert_eq!(*sink.grants.borrow(), vec![2]);
    }

    #[test]
    fn test_contended_request_waits() {
        let mut store = store(5);
        let sink = Recorder::default();

        assert!(request(&mut store, &sink, 2));
        assert!(!request(&mut store, &sink, 3));
        assert_eq!(store.get(3), Wanting);
        assert_eq!(*sink.grants.borrow(), vec![2]);
    }

    #[test]
    fn test_release_hands_off_to_neighbor() {
        let mut store = store(5);
        let sink = Recorder::default();

        request(&mut store, &sink, 2);
        request(&mut store, &sink, 3);
        let handoff = release(&mut store, &sink, 2);

        assert_eq!(handoff.iter().collect::<Vec<_>>(), vec![3]);
        assert_eq!(store.get(2), Idle);
        assert_eq!(store.get(3), Active);
        assert_eq!(*sink.grants.borrow(), vec![2, 3]);
    }

    #[test]
    fn test_release_can_grant_both_sides() {
        let mut store = store(5);
        let sink = Recorder::default();

        request(&mut store, &sink, 2);
        request(&mut store, &sink, 1);
        request(&mut store, &sink, 3);
        let handoff = release(&mut store, &sink, 2);

        assert_eq!(handoff.len(), 2);
        assert!(handoff.contains(1) && handoff.contains(3));
    }

    #[test]
    fn test_release_skips_neighbor_blocked_on_far_side() {
        let mut store = store(5);
        let sink = Recorder::default();

        request(&mut store, &sink, 0);
        request(&mut store, &sink, 2);
        request(&mut store, &sink, 1);
        let handoff = release(&mut store, &sink, 0);

        // 1 still has 2 eating on its right
        assert!(handoff.is_empty());
        assert_eq!(store.get(1), Wanting);
    }

    #[test]
    fn test_pair_never_double_grants() {
        let mut store = store(2);
        let sink = Recorder::default();

        request(&mut store, &sink, 0);
        request(&mut store, &sink, 1);
        let handoff = release(&mut store, &sink, 0);

        // left and right of 0 are both 1; it is granted once
        assert_eq!(handoff.len(), 1);
        assert_eq!(*sink.grants.borrow(), vec![0, 1]);
    }

    #[test]
    fn test_single_actor_cycles() {
        let mut store = store(1);
        let sink = Recorder::default();

        for _ in 0..3 {
            assert!(request(&mut store, &sink, 0));
            assert!(release(&mut store, &sink, 0).is_empty());
        }
        assert_eq!(sink.grants.borrow().len(), 3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "both active")]
    fn test_invariant_check_fires() {
        check_invariants(&StateStore::from_states(&[Active, Active, Idle]));
    }
}
