//! Configuration file.
//!
//! A JSON object; every key is optional and unknown keys are rejected:
//!
//! ```json
//! {
//!   "id_tables": ["/usr/share/incbot/id-table"],
//!   "separator": ";",
//!   "error_limit": 10,
//!   "trace": ["printf"],
//!   "xref_scope": "per_file",
//!   "hash_index": { "buckets": 4093 },
//!   "indent": 0
//! }
//! ```
//!
//! Command-line options are applied on top: tables and traced identifiers
//! are appended, the rest override.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use incbot_ir::IndexStrategy;
use serde::Deserialize;

use crate::cli::Options;
use crate::emit::EmitOptions;
use crate::table::{LoadOptions, DEFAULT_ERROR_LIMIT};
use crate::{IncbotError, XRefScope};

/// Identifier table field separator: one ASCII character other than a
/// newline or carriage return.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "char")]
pub struct Separator(u8);

impl Separator {
    #[inline]
    pub fn byte(self) -> u8 {
        self.0
    }
}

impl Default for Separator {
    fn default() -> Self {
        Separator(b';')
    }
}

impl TryFrom<char> for Separator {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match u8::try_from(c) {
            Ok(byte) if byte.is_ascii() && byte != b'\n' && byte != b'\r' => Ok(Separator(byte)),
            _ => Err(format!(
                "separator must be a single ASCII character other than a line break, got {c:?}"
            )),
        }
    }
}

impl FromStr for Separator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Separator::try_from(c),
            _ => Err(format!("separator must be exactly one character, got {s:?}")),
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(self.0))
    }
}

/// Hash index used by the symbol dictionaries.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashIndex {
    #[default]
    Native,
    /// Fixed set-associative table; 0 picks the default size.
    Buckets(usize),
}

impl From<HashIndex> for IndexStrategy {
    fn from(index: HashIndex) -> Self {
        match index {
            HashIndex::Native => IndexStrategy::Native,
            HashIndex::Buckets(count) => IndexStrategy::Buckets(count),
        }
    }
}

/// Settings for one run.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Identifier tables, loaded in order.
    pub id_tables: Vec<PathBuf>,
    pub separator: Separator,
    /// Problems tolerated per table file.
    pub error_limit: usize,
    /// Identifiers whose lookups are logged.
    pub trace: Vec<String>,
    pub xref_scope: XRefScope,
    pub hash_index: HashIndex,
    /// Spaces before each `// Import` line.
    pub indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id_tables: Vec::new(),
            separator: Separator::default(),
            error_limit: DEFAULT_ERROR_LIMIT,
            trace: Vec::new(),
            xref_scope: XRefScope::default(),
            hash_index: HashIndex::default(),
            indent: 0,
        }
    }
}

impl Config {
    /// Parse configuration text. `path` is used in error messages only.
    pub fn from_json(text: &str, path: &Path) -> Result<Config, IncbotError> {
        serde_json::from_str(text).map_err(|err| IncbotError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Read and parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Config, IncbotError> {
        let text = fs::read_to_string(path).map_err(|source| IncbotError::io(path, source))?;
        Self::from_json(&text, path)
    }

    /// Apply command-line options on top of the file settings.
    pub fn apply(&mut self, options: &Options) {
        self.id_tables.extend(options.id_tables.iter().cloned());
        self.trace.extend(options.trace.iter().cloned());
        if let Some(separator) = options.separator {
            self.separator = separator;
        }
        if options.accumulate {
            self.xref_scope = XRefScope::Accumulate;
        }
        if let Some(indent) = options.indent {
            self.indent = indent;
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            separator: self.separator.byte(),
            error_limit: self.error_limit,
        }
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            indent: self.indent,
        }
    }

    pub fn index_strategy(&self) -> IndexStrategy {
        self.hash_index.into()
    }
}
