//! Run-wide state.

use std::io::Write;

use crate::emit::{write_includes, EmitOptions};
use crate::scan::scan_source;
use crate::{IdTable, IncbotError, XRef, XRefScope};

/// Everything one incbot run reads and writes.
///
/// Owns the identifier table and the cross-references collected so far.
/// Passed by `&mut`; there is no global state.
#[derive(Debug)]
pub struct IncbotContext {
    table: IdTable,
    xrefs: Vec<XRef>,
    scope: XRefScope,
    emit: EmitOptions,
}

impl IncbotContext {
    pub fn new(table: IdTable, scope: XRefScope, emit: EmitOptions) -> Self {
        Self {
            table,
            xrefs: Vec::new(),
            scope,
            emit,
        }
    }

    /// Cross-references not yet cleared.
    #[inline]
    pub fn xrefs(&self) -> &[XRef] {
        &self.xrefs
    }

    /// Scan one source file, adding its cross-references.
    pub fn scan(&mut self, source: &[u8]) -> Result<(), IncbotError> {
        scan_source(source, &self.table, &mut self.xrefs)
    }

    /// Write the include groups for the references collected so far, then
    /// clear them unless the scope is [`XRefScope::Accumulate`].
    pub fn emit<W: Write>(&mut self, out: &mut W) -> Result<(), IncbotError> {
        write_includes(out, &self.table, &self.xrefs, self.emit).map_err(IncbotError::Output)?;
        if self.scope == XRefScope::PerFile {
            self.xrefs.clear();
        }
        Ok(())
    }

    /// Scan one source file and write its include groups.
    pub fn process<W: Write>(&mut self, source: &[u8], out: &mut W) -> Result<(), IncbotError> {
        self.scan(source)?;
        self.emit(out)
    }
}
