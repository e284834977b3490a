//! Identifier table file loader.
//!
//! One record per line, fields separated by a single byte (`;` unless
//! configured otherwise):
//!
//! ```text
//! type-code;man-section;name;header[|header...];standard-1;standard-2;man-path;declares
//! ```
//!
//! A `#` in column 1 starts a comment line. Blank lines are skipped and a
//! trailing `\r` is ignored. Missing trailing fields read as empty.
//!
//! Malformed records are reported and skipped rather than failing the load.
//! Each problem counts against an error budget; once the budget is
//! exceeded the load is abandoned.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use incbot_ir::{Dict, DictError, SymbolId};
use memchr::{memchr, memchr_iter};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use super::{IdRecord, IdTable};
use crate::{IdKind, IncbotError};

/// Fields in a full record.
pub const FIELDS: usize = 8;

/// Longest accepted field, in bytes.
pub const MAX_FIELD_LEN: usize = 1024;

/// Default number of problems tolerated per file.
pub const DEFAULT_ERROR_LIMIT: usize = 10;

/// Knobs for reading a table file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field separator byte.
    pub separator: u8,
    /// Problems tolerated before the load is abandoned.
    pub error_limit: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            separator: b';',
            error_limit: DEFAULT_ERROR_LIMIT,
        }
    }
}

/// Outcome of a successful load.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records added to the table.
    pub records: usize,
    /// Problems reported (each logged as a warning).
    pub errors: usize,
}

/// Fatal table loading error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("{}: too many errors ({count}), giving up", path.display())]
    TooManyErrors { path: PathBuf, count: usize },

    #[error(transparent)]
    Dict(#[from] DictError),
}

/// A problem with one line of a table file.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Problem {
    ExtraFields(usize),
    FieldTooLong { field: usize, len: usize },
    NotUtf8 { field: usize },
    BadKind(String),
    MissingName,
    Duplicate(String),
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::ExtraFields(count) => write!(
                f,
                "{count} fields, more than {FIELDS}; extra fields ignored"
            ),
            Problem::FieldTooLong { field, len } => write!(
                f,
                "field {field} is {len} bytes, longer than {MAX_FIELD_LEN}; record skipped"
            ),
            Problem::NotUtf8 { field } => {
                write!(f, "field {field} is not valid UTF-8; record skipped")
            }
            Problem::BadKind(code) => write!(f, "invalid type code {code:?}; record skipped"),
            Problem::MissingName => f.write_str("missing identifier name; record skipped"),
            Problem::Duplicate(name) => {
                write!(f, "identifier {name:?} is already defined; record skipped")
            }
        }
    }
}

/// Split one line at every `separator`.
fn split_fields(line: &[u8], separator: u8) -> SmallVec<[&[u8]; FIELDS]> {
    let mut fields = SmallVec::new();
    let mut start = 0;
    for end in memchr_iter(separator, line) {
        fields.push(&line[start..end]);
        start = end + 1;
    }
    fields.push(&line[start..]);
    fields
}

/// Intern a string field; empty fields stay undefined.
fn intern(dict: &mut Dict, field: &str) -> Result<SymbolId, DictError> {
    if field.is_empty() {
        Ok(SymbolId::UNDEFINED)
    } else {
        dict.try_add(field)
    }
}

struct Loader<'a> {
    table: &'a mut IdTable,
    path: &'a Path,
    options: LoadOptions,
    report: LoadReport,
}

impl Loader<'_> {
    /// Report a problem and charge it to the error budget.
    fn complain(&mut self, line: usize, problem: &Problem) -> Result<(), TableError> {
        warn!(path = %self.path.display(), line, "{problem}");
        self.report.errors += 1;
        if self.report.errors > self.options.error_limit {
            return Err(TableError::TooManyErrors {
                path: self.path.to_path_buf(),
                count: self.report.errors,
            });
        }
        Ok(())
    }

    fn line(&mut self, number: usize, raw: &[u8]) -> Result<(), TableError> {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        if raw.first() == Some(&b'#') || raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }

        let split = split_fields(raw, self.options.separator);
        if split.len() > FIELDS {
            self.complain(number, &Problem::ExtraFields(split.len()))?;
        }

        let mut fields: [&str; FIELDS] = [""; FIELDS];
        for (index, (slot, bytes)) in fields.iter_mut().zip(split.iter().copied()).enumerate() {
            if bytes.len() > MAX_FIELD_LEN {
                let problem = Problem::FieldTooLong {
                    field: index + 1,
                    len: bytes.len(),
                };
                return self.complain(number, &problem);
            }
            match std::str::from_utf8(bytes) {
                Ok(text) => *slot = text,
                Err(_) => return self.complain(number, &Problem::NotUtf8 { field: index + 1 }),
            }
        }

        let [code, man_section, name, header, standard1, standard2, man_path, declares] = fields;

        let Some(kind) = IdKind::from_code(code) else {
            return self.complain(number, &Problem::BadKind(code.to_owned()));
        };
        if name.is_empty() {
            return self.complain(number, &Problem::MissingName);
        }
        if self.table.names.find(name).is_defined() {
            return self.complain(number, &Problem::Duplicate(name.to_owned()));
        }

        let strings = &mut self.table.strings;
        let record = IdRecord {
            name: SymbolId::UNDEFINED,
            kind,
            header: intern(strings, header)?,
            standard1: intern(strings, standard1)?,
            standard2: intern(strings, standard2)?,
            man_section: intern(strings, man_section)?,
            man_path: intern(strings, man_path)?,
            declares: intern(strings, declares)?,
            trace: false,
        };
        let name = self.table.names.try_add(name)?;
        debug!(line = number, id = name.raw(), kind = %kind.codes(), "record");
        self.table.push(IdRecord { name, ..record });
        self.report.records += 1;
        Ok(())
    }
}

impl IdTable {
    /// Load records from table text. `path` is used in diagnostics only.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load_bytes(
        &mut self,
        text: &[u8],
        path: &Path,
        options: LoadOptions,
    ) -> Result<LoadReport, TableError> {
        let mut loader = Loader {
            table: self,
            path,
            options,
            report: LoadReport::default(),
        };

        let mut rest = text;
        let mut number = 0;
        while !rest.is_empty() {
            number += 1;
            let (line, tail) = match memchr(b'\n', rest) {
                Some(end) => (&rest[..end], &rest[end + 1..]),
                None => (rest, &rest[rest.len()..]),
            };
            loader.line(number, line)?;
            rest = tail;
        }

        let report = loader.report;
        info!(
            records = report.records,
            errors = report.errors,
            "loaded identifier table"
        );
        Ok(report)
    }

    /// Read and load a table file.
    pub fn load_file(
        &mut self,
        path: &Path,
        options: LoadOptions,
    ) -> Result<LoadReport, IncbotError> {
        let text = fs::read(path).map_err(|source| IncbotError::io(path, source))?;
        Ok(self.load_bytes(&text, path, options)?)
    }
}
