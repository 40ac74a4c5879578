//! # Observer Interface
//!
//! A read-only unit that periodically renders what the table is doing.
//! Frames are read under the guard, so they are always consistent; the
//! observer only ever holds the guard for an O(N) copy.

use std::io;

use crate::state::ActorState;

/// One consistent view of the table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    /// State of every actor, in ring order.
    pub states: Vec<ActorState>,
    /// Grants each actor has received so far.
    pub meals: Vec<u64>,
}

impl Frame {
    /// Number of actors in the frame.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true for a frame with no actors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Sum of all meal counters.
    #[must_use]
    pub fn total_meals(&self) -> u64 {
        self.meals.iter().sum()
    }
}

/// Receives frames from the observer thread.
///
/// An error from [`observe`](Self::observe) stops the observer (the
/// actors keep running).
pub trait Observer: Send + 'static {
    /// Called once per refresh period.
    ///
    /// # Errors
    ///
    /// Any IO error from the underlying sink.
    fn observe(&mut self, frame: &Frame) -> io::Result<()>;

    /// Called once with the last frame before the observer exits.
    ///
    /// # Errors
    ///
    /// Any IO error from the underlying sink.
    fn finish(&mut self, _frame: &Frame) -> io::Result<()> {
        Ok(())
    }
}
