//! Lexical context classifier for C-like source text.
//!
//! Turns a byte stream into "super-characters": `(CharClass, byte)` pairs
//! telling whether each byte is ordinary code or belongs to a string
//! literal, a character literal or a comment. Within each context the
//! delimiters themselves are the *outer* class and everything strictly
//! inside is *inner*.
//!
//! Once classified, code and non-code bytes can be told apart with a
//! single comparison. An identifier search over the `Code` stream never
//! trips over a look-alike word inside a comment or a quoted string.
//!
//! # Design
//!
//! [`transition`] is a pure function over `(State, byte)`. [`Classifier`]
//! drives it and appends results to a caller-owned [`Lookahead`] queue.
//! One byte of lookahead is needed: a `/` may start a comment or be a
//! division, and a `*` inside a block comment may start the closing `*/`.
//! Such a byte is held in the state and released together with the next
//! one, so one input byte can yield zero, one or two pairs.
//!
//! The classifier knows nothing of preprocessor syntax.

mod class;
mod classifier;
mod error;
mod lookahead;
mod state;

pub use class::{CharClass, SuperChar};
pub use classifier::{end_of_input, transition, Classifier, Emit, Transition};
pub use error::ClassifyError;
pub use lookahead::{Lookahead, LOOKAHEAD};
pub use state::State;
