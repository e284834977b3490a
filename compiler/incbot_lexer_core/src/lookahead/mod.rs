//! Bounded queue of classified bytes.
//!
//! The classifier appends at the back and consumers pop from the front.
//! Capacity is fixed: a push beyond it is an error, never a silent drop.

use std::collections::VecDeque;

use crate::{ClassifyError, SuperChar};

/// Queue capacity. One step emits at most two pairs, and the end of input
/// may add an end marker.
pub const LOOKAHEAD: usize = 4;

/// Fixed-capacity FIFO of [`SuperChar`]s.
#[derive(Clone, Debug)]
pub struct Lookahead {
    queue: VecDeque<SuperChar>,
}

impl Lookahead {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::with_capacity(LOOKAHEAD),
        }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        LOOKAHEAD
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[inline]
    fn check_space(&self) -> Result<(), ClassifyError> {
        if self.queue.len() >= LOOKAHEAD {
            return Err(ClassifyError::LookaheadFull {
                capacity: LOOKAHEAD,
            });
        }
        Ok(())
    }

    /// Append at the back.
    pub fn push(&mut self, pair: SuperChar) -> Result<(), ClassifyError> {
        self.check_space()?;
        self.queue.push_back(pair);
        Ok(())
    }

    /// Remove the oldest pair.
    #[inline]
    pub fn pop(&mut self) -> Option<SuperChar> {
        self.queue.pop_front()
    }

    /// Most recently pushed pair.
    #[inline]
    pub fn back(&self) -> Option<SuperChar> {
        self.queue.back().copied()
    }

    /// Pairs from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = SuperChar> + '_ {
        self.queue.iter().copied()
    }
}

impl Default for Lookahead {
    fn default() -> Self {
        Self::new()
    }
}
