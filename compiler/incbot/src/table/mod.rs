//! The identifier table.
//!
//! Maps each known library identifier to its kind and declaring header(s),
//! plus reference data (man page, standards) shown in debug output.
//!
//! # Layout
//!
//! Identifier names live in their own [`Dict`]; every other string (headers,
//! man sections and paths, standard names, declared type names) shares a
//! second one. Records are stored in the order their identifiers were
//! interned, so the record for identifier symbol `n` sits at index `n - 1`
//! and a lookup costs one dictionary probe. [`IdTable::verify`] checks that
//! correspondence after loading.

mod load;

use incbot_ir::{Dict, IndexStrategy, SymbolId};
use tracing::info;

use crate::tracing_setup::TRACE_TARGET;
use crate::{IdKind, IncbotError};

pub use load::{LoadOptions, LoadReport, TableError, DEFAULT_ERROR_LIMIT, FIELDS, MAX_FIELD_LEN};

/// One line of an identifier table file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IdRecord {
    /// Identifier, in the name dictionary.
    pub name: SymbolId,
    pub kind: IdKind,
    /// Declaring header(s), possibly `|`-joined, in the string dictionary.
    pub header: SymbolId,
    pub standard1: SymbolId,
    pub standard2: SymbolId,
    pub man_section: SymbolId,
    pub man_path: SymbolId,
    /// Type a typedef declares, if the table says.
    pub declares: SymbolId,
    /// Log every lookup of this identifier on the `incbot::trace` target.
    pub trace: bool,
}

/// Identifier records plus the dictionaries their fields point into.
#[derive(Clone, Debug, Default)]
pub struct IdTable {
    names: Dict,
    strings: Dict,
    records: Vec<IdRecord>,
}

impl IdTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table whose dictionaries use `strategy`.
    pub fn with_index(strategy: IndexStrategy) -> Self {
        Self {
            names: Dict::with_index(strategy),
            strings: Dict::with_index(strategy),
            records: Vec::new(),
        }
    }

    /// Find the record for `name` if its kind is in `mask`.
    ///
    /// Returns the record index. Lookups of traced identifiers are logged
    /// whether or not they match.
    pub fn find(&self, name: &str, mask: IdKind) -> Option<usize> {
        let position = self.names.find(name).index()?;
        let record = self.records.get(position)?;
        let matched = record.kind.intersects(mask);

        if record.trace {
            info!(
                target: TRACE_TARGET,
                id = name,
                mask = %mask,
                kind = record.kind.word(),
                matched,
                "lookup"
            );
        }

        matched.then_some(position)
    }

    /// Record at `position`.
    #[inline]
    pub fn record(&self, position: usize) -> Option<&IdRecord> {
        self.records.get(position)
    }

    /// Dictionary of identifier names.
    #[inline]
    pub fn names(&self) -> &Dict {
        &self.names
    }

    /// Dictionary of every other string field.
    #[inline]
    pub fn strings(&self) -> &Dict {
        &self.strings
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Turn on lookup tracing for `name`. Returns `false` if the table has
    /// no such identifier.
    pub fn trace(&mut self, name: &str) -> bool {
        let Some(position) = self.names.find(name).index() else {
            return false;
        };
        match self.records.get_mut(position) {
            Some(record) => {
                record.trace = true;
                true
            }
            None => false,
        }
    }

    /// Check that record `n` holds identifier symbol `n + 1`.
    pub fn verify(&self) -> Result<(), IncbotError> {
        for (position, record) in self.records.iter().enumerate() {
            if record.name.index() != Some(position) {
                return Err(IncbotError::InconsistentTable {
                    position,
                    symbol: record.name.raw(),
                });
            }
        }
        Ok(())
    }

    /// Append a record whose name was just interned.
    fn push(&mut self, record: IdRecord) {
        self.records.push(record);
    }

    #[cfg(test)]
    fn records_mut(&mut self) -> &mut Vec<IdRecord> {
        &mut self.records
    }
}
