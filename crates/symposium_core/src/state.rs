//! # Shared State Store
//!
//! One slot per actor. The store itself does no locking: it is only ever
//! reachable through the [`Guard`](crate::guard::Guard), so every read and
//! write already happens with the guard held.

use std::fmt;

use crate::ring::Ring;

/// What an actor is doing right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ActorState {
    /// Thinking. Not interested in the shared resource.
    #[default]
    Idle = 0,
    /// Hungry. Waiting to be granted the resource.
    Wanting = 1,
    /// Eating. Holds the resource on both of its boundaries.
    Active = 2,
}

impl ActorState {
    /// Single-letter symbol used by terminal renderers.
    #[inline]
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Idle => 'T',
            Self::Wanting => 'H',
            Self::Active => 'E',
        }
    }

    /// Returns true if `self -> next` is an edge of the
    /// `Idle -> Wanting -> Active -> Idle` cycle.
    #[inline]
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Wanting) | (Self::Wanting, Self::Active) | (Self::Active, Self::Idle)
        )
    }
}

impl fmt::Display for ActorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "thinking",
            Self::Wanting => "hungry",
            Self::Active => "eating",
        };
        f.write_str(name)
    }
}

/// Fixed-size array of actor states, all starting [`ActorState::Idle`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateStore {
    ring: Ring,
    states: Box<[ActorState]>,
}

impl StateStore {
    /// Creates a store with one idle slot per actor in `ring`.
    #[must_use]
    pub fn new(ring: Ring) -> Self {
        Self {
            ring,
            states: vec![ActorState::Idle; ring.len()].into_boxed_slice(),
        }
    }

    /// Builds a store from explicit states (for checking predicates
    /// against arbitrary configurations).
    ///
    /// # Panics
    ///
    /// Panics if `states` is empty.
    #[must_use]
    pub fn from_states(states: &[ActorState]) -> Self {
        let ring = Ring::new(states.len()).expect("a store needs at least one slot");
        Self {
            ring,
            states: states.into(),
        }
    }

    /// Ring geometry of this store.
    #[inline]
    #[must_use]
    pub const fn ring(&self) -> Ring {
        self.ring
    }

    /// Number of slots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false; a store has at least one slot.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State of actor `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, id: usize) -> ActorState {
        self.states[id]
    }

    /// Overwrites the state of actor `id`.
    ///
    /// Debug builds assert that the write is an edge of the state cycle.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    #[inline]
    pub fn set(&mut self, id: usize, next: ActorState) {
        let slot = &mut self.states[id];
        debug_assert!(
            slot.can_transition_to(next),
            "illegal transition for actor {id}: {slot:?} -> {next:?}"
        );
        *slot = next;
    }

    /// All states in ring order.
    #[inline]
    #[must_use]
    pub fn states(&self) -> &[ActorState] {
        &self.states
    }

    /// Copies the states out.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ActorState> {
        self.states.to_vec()
    }

    /// Number of actors currently in `state`.
    #[must_use]
    pub fn count(&self, state: ActorState) -> usize {
        self.states.iter().filter(|&&s| s == state).count()
    }

    /// First pair of distinct neighbors that are both active, if any.
    ///
    /// `None` means the adjacency invariant holds.
    #[must_use]
    pub fn adjacent_active(&self) -> Option<(usize, usize)> {
        self.ring.ids().find_map(|id| {
            let right = self.ring.right(id);
            let both = self.states[id] == ActorState::Active
                && self.states[right] == ActorState::Active;
            (both && right != id).then_some((id, right))
        })
    }
}
