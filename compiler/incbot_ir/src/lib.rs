//! Symbol tables for incbot.
//!
//! Symbols are appended, never removed and never renamed, so every consumer
//! can hold a compact [`SymbolId`] instead of a string. Identifier names and
//! auxiliary strings (header names, man-page paths, standard references)
//! each live in their own [`Dict`].
//!
//! # Id Stability
//!
//! Ids are assigned in append order starting at 1. [`SymbolId::UNDEFINED`]
//! (0) is reserved and never names a real string. Once assigned, an id keeps
//! pointing at the same string for the lifetime of the dictionary, no matter
//! how much the dictionary grows afterwards.

mod dict;
mod hash;
mod index;
mod symbol;

pub use dict::{Dict, DictError};
pub use hash::hash_symbol;
pub use index::{IndexStrategy, ASSOCIATIVITY, DEFAULT_BUCKETS};
pub use symbol::SymbolId;
