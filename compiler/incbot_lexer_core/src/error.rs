//! Classifier errors.

use std::fmt;

use crate::State;

/// Fatal classifier condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyError {
    /// Input ended inside a string, character literal or block comment.
    Unterminated { state: State },
    /// The lookahead queue was already at capacity.
    LookaheadFull { capacity: usize },
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyError::Unterminated { state } => write!(
                f,
                "unterminated {} at end of input (state {})",
                state.construct(),
                state
            ),
            ClassifyError::LookaheadFull { capacity } => write!(
                f,
                "out of space in character class buffer (capacity {capacity})"
            ),
        }
    }
}

impl std::error::Error for ClassifyError {}
