//! # Ring Geometry
//!
//! Actors sit in a circle. Actor `i` shares a boundary with
//! `left(i) = (i - 1) mod N` and `right(i) = (i + 1) mod N`, where `mod`
//! is the mathematical modulo (always non-negative).
//!
//! With `N == 1` both neighbors are the actor itself; with `N == 2` the
//! left and right neighbor are the same actor.

use crate::error::{CoreError, CoreResult};

/// Neighbor arithmetic for a ring of `len` actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ring {
    len: usize,
}

impl Ring {
    /// Creates a ring of `len` actors.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoActors`] when `len` is zero.
    pub fn new(len: usize) -> CoreResult<Self> {
        if len == 0 {
            return Err(CoreError::NoActors);
        }
        Ok(Self { len })
    }

    /// Number of actors.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.len
    }

    /// Always false; a ring is never empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        false
    }

    /// Returns true if `id` names an actor in this ring.
    #[inline]
    #[must_use]
    pub const fn contains(self, id: usize) -> bool {
        id < self.len
    }

    /// Left neighbor of `id`.
    #[inline]
    #[must_use]
    pub fn left(self, id: usize) -> usize {
        self.offset(id, -1)
    }

    /// Right neighbor of `id`.
    #[inline]
    #[must_use]
    pub fn right(self, id: usize) -> usize {
        self.offset(id, 1)
    }

    /// Both neighbors, left first.
    #[inline]
    #[must_use]
    pub fn neighbors(self, id: usize) -> [usize; 2] {
        [self.left(id), self.right(id)]
    }

    /// Iterates every actor id.
    pub fn ids(self) -> impl Iterator<Item = usize> {
        0..self.len
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn offset(self, id: usize, delta: isize) -> usize {
        debug_assert!(self.contains(id), "actor {id} outside ring of {}", self.len);
        (id as isize + delta).rem_euclid(self.len as isize) as usize
    }
}
