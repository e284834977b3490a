//! Cross-references from source identifiers to declaring headers.

use incbot_ir::SymbolId;
use serde::Deserialize;

/// One qualifying identifier occurrence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct XRef {
    /// Header field of the record, in the string dictionary. May name
    /// several headers joined with `|`.
    pub header: SymbolId,
    /// The identifier, in the identifier dictionary.
    pub ident: SymbolId,
    /// Index of the matching record in the identifier table.
    pub record: usize,
    /// 1-based line where the identifier starts.
    pub line: u32,
}

/// How long cross-references are kept.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XRefScope {
    /// Cleared once a file's includes have been emitted.
    #[default]
    PerFile,
    /// Kept for the whole run; each file's output also lists the includes
    /// needed by the files before it.
    Accumulate,
}
