//! Error type for the incbot driver.

use std::io;
use std::path::PathBuf;

use incbot_lexer_core::ClassifyError;
use thiserror::Error;

use crate::table::TableError;

/// Everything that can go wrong while running incbot.
///
/// Classifier errors are wrapped unchanged; dictionary errors arrive
/// through [`TableError`]. Whether an error aborts the run is the driver's
/// decision: an unreadable source file is reported and skipped, the rest
/// are fatal.
#[derive(Debug, Error)]
pub enum IncbotError {
    /// The source text could not be classified (unterminated literal or
    /// comment, or the lookahead queue overflowed).
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    /// Reading a table, configuration or source file failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Table(#[from] TableError),

    /// The configuration file is malformed or holds an invalid value.
    #[error("{}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("could not find an identifier table")]
    NoIdTable,

    /// Record `position` does not hold symbol `position + 1`.
    #[error("identifier table is out of sync with its symbols: record {position} holds symbol {symbol}")]
    InconsistentTable { position: usize, symbol: u32 },

    /// Scanning a source file failed.
    #[error("{}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: Box<IncbotError>,
    },

    /// A second character was pushed back before the first was re-read.
    #[error("pushback buffer already holds a character")]
    PushbackFull,

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl IncbotError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        IncbotError::Io {
            path: path.into(),
            source,
        }
    }
}
