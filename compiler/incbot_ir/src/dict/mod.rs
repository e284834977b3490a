//! Append-only string dictionary.
//!
//! Provides O(1)-amortized interning and lookup with stable ids.

use std::fmt;
use std::rc::Rc;

use crate::index::SymbolIndex;
use crate::{IndexStrategy, SymbolId};

/// Error when adding a symbol fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictError {
    /// Ids exhausted (over 4 billion symbols).
    Capacity { count: usize },
}

impl fmt::Display for DictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictError::Capacity { count } => write!(
                f,
                "symbol dictionary exceeded capacity: {} symbols, max is {}",
                count,
                u32::MAX - 1
            ),
        }
    }
}

impl std::error::Error for DictError {}

/// Append-only symbol dictionary.
///
/// Strings are stored in append order; slot `n` holds the symbol with id
/// `n + 1`. The hash index only ever stores ids, so growing the storage
/// never invalidates an id handed out earlier.
///
/// # Thread Safety
/// Not shared. Each dictionary is owned by one `IdTable` and used from a
/// single thread.
#[derive(Clone, Debug)]
pub struct Dict {
    names: Vec<Rc<str>>,
    index: SymbolIndex,
}

impl Dict {
    /// Create an empty dictionary with the default index.
    pub fn new() -> Self {
        Self::with_index(IndexStrategy::default())
    }

    /// Create an empty dictionary using the given index strategy.
    pub fn with_index(strategy: IndexStrategy) -> Self {
        Self {
            names: Vec::with_capacity(256),
            index: SymbolIndex::new(strategy),
        }
    }

    /// Try to add a string, returning its id or an error on overflow.
    ///
    /// Returns the existing id when `s` is already present; otherwise `s`
    /// is appended and receives the next sequential id. Never returns
    /// [`SymbolId::UNDEFINED`].
    pub fn try_add(&mut self, s: &str) -> Result<SymbolId, DictError> {
        let existing = self.find(s);
        if existing.is_defined() {
            return Ok(existing);
        }

        let id = SymbolId::from_index(self.names.len()).ok_or(DictError::Capacity {
            count: self.names.len(),
        })?;
        let name: Rc<str> = Rc::from(s);
        self.index.insert(&name, id);
        self.names.push(name);
        Ok(id)
    }

    /// Add a string, returning its id.
    ///
    /// # Panics
    /// Panics if the dictionary runs out of ids (over 4 billion symbols).
    /// Use `try_add` for fallible interning.
    pub fn add(&mut self, s: &str) -> SymbolId {
        self.try_add(s).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Look up the id of `s`, or [`SymbolId::UNDEFINED`] if absent.
    #[inline]
    pub fn find(&self, s: &str) -> SymbolId {
        self.index.find(s, &self.names)
    }

    /// Reverse lookup. `name_of(SymbolId::UNDEFINED)` is `None`.
    #[inline]
    pub fn name_of(&self, id: SymbolId) -> Option<&str> {
        id.index()
            .and_then(|idx| self.names.get(idx))
            .map(|name| &**name)
    }

    /// Number of symbols (the reserved id is not counted).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no symbol has been added yet.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All symbols in id order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .filter_map(|(idx, name)| SymbolId::from_index(idx).map(|id| (id, &**name)))
    }
}

impl Default for Dict {
    fn default() -> Self {
        Self::new()
    }
}
