//! incbot: suggest `#include` directives for a C source file.
//!
//! The pipeline, per source file:
//!
//! 1. **Classify**: [`incbot_lexer_core`] tags every byte as code, string,
//!    character literal or comment.
//! 2. **Scan**: [`scan`] collects identifiers from the code stream and looks
//!    each one up in the [`IdTable`].
//! 3. **Collect**: every identifier with a declaring header becomes an
//!    [`XRef`].
//! 4. **Emit**: [`emit`] sorts and deduplicates the cross-references and
//!    renders `#include <header>` lines, each followed by the identifiers
//!    that need it.
//!
//! The identifier table is loaded once from one or more text files (see
//! [`table`]) and shared by every file scanned during a run. All mutable
//! state for a run lives in one [`IncbotContext`].

pub mod cli;
pub mod config;
mod context;
pub mod driver;
pub mod emit;
mod error;
mod kind;
pub mod scan;
pub mod table;
pub mod tracing_setup;
mod xref;

pub use context::IncbotContext;
pub use error::IncbotError;
pub use kind::IdKind;
pub use table::{IdRecord, IdTable, LoadOptions, LoadReport, TableError};
pub use xref::{XRef, XRefScope};

/// Version string shown by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
