//! Identifier extraction.
//!
//! Drives the classifier over one source file and turns the code stream into
//! table lookups. Only `Code` bytes take part in identifier recognition;
//! every byte, code or not, is counted for line and column tracking.
//!
//! A lookup uses one of two kind masks. An identifier followed (after
//! optional whitespace) by `(` is looked up as a function or keyword;
//! anything else as any kind except function. The byte after the
//! whitespace is consumed by that decision unless it starts another
//! identifier, in which case it is pushed back.
//!
//! Preprocessor lines get one special case: after `#include` the rest of
//! the line is skipped, so header names are never mistaken for identifiers.

use incbot_lexer_core::{CharClass, Classifier, Lookahead, SuperChar};
use tracing::{debug, instrument, trace};

use crate::{IdKind, IdTable, IncbotError, XRef};

#[inline]
fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

#[inline]
fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// C `isspace`: includes vertical tab, unlike `u8::is_ascii_whitespace`.
#[inline]
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

/// Per-file scanning state.
pub struct Scanner<'src> {
    source: std::slice::Iter<'src, u8>,
    classifier: Classifier,
    queue: Lookahead,
    /// Single code byte pushed back by the identifier reader.
    pushback: Option<u8>,
    /// 1-based line of the last byte read.
    line: u32,
    /// Column of the last byte read on its line; 0 right after a newline.
    column: u32,
    in_preprocessor: bool,
    ident: String,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src [u8]) -> Self {
        Self {
            source: source.iter(),
            classifier: Classifier::new(),
            queue: Lookahead::new(),
            pushback: None,
            line: 1,
            column: 0,
            in_preprocessor: false,
            ident: String::new(),
        }
    }

    #[cfg(test)]
    fn starting_at_line(source: &'src [u8], line: u32) -> Self {
        Self {
            line,
            ..Self::new(source)
        }
    }

    /// 1-based line number of the most recently read byte.
    #[cfg(test)]
    fn line(&self) -> u32 {
        self.line
    }

    #[cfg(test)]
    fn in_preprocessor(&self) -> bool {
        self.in_preprocessor
    }

    /// Next classified pair, with line/column bookkeeping applied.
    fn next_pair(&mut self) -> Result<SuperChar, IncbotError> {
        loop {
            if let Some(pair) = self.queue.pop() {
                self.account(pair);
                return Ok(pair);
            }
            let byte = self.source.next().copied();
            self.classifier.next(byte, &mut self.queue)?;
        }
    }

    fn account(&mut self, pair: SuperChar) {
        if pair.class.is_terminal() {
            return;
        }
        if pair.byte == b'\n' {
            self.line = self.line.saturating_add(1);
            self.column = 0;
            self.in_preprocessor = false;
        } else {
            self.column = self.column.saturating_add(1);
            if self.column == 1 && pair.is_code() && pair.byte == b'#' {
                self.in_preprocessor = true;
            }
        }
    }

    /// Next code byte, or `None` at end of input.
    fn next_code(&mut self) -> Result<Option<u8>, IncbotError> {
        if let Some(byte) = self.pushback.take() {
            return Ok(Some(byte));
        }
        loop {
            let pair = self.next_pair()?;
            match pair.class {
                CharClass::Code => return Ok(Some(pair.byte)),
                CharClass::Eof | CharClass::Err => return Ok(None),
                _ => {}
            }
        }
    }

    fn unget(&mut self, byte: u8) -> Result<(), IncbotError> {
        if self.pushback.is_some() {
            return Err(IncbotError::PushbackFull);
        }
        self.pushback = Some(byte);
        Ok(())
    }

    /// Discard everything up to and including the next newline, whatever
    /// its class.
    fn skip_line(&mut self) -> Result<(), IncbotError> {
        self.pushback = None;
        loop {
            let pair = self.next_pair()?;
            if pair.byte == b'\n' || pair.class.is_terminal() {
                return Ok(());
            }
        }
    }

    /// Read the identifier starting with `first` into `self.ident` and
    /// decide the lookup mask.
    fn read_ident(&mut self, first: u8) -> Result<IdKind, IncbotError> {
        self.ident.clear();
        self.ident.push(char::from(first));

        let mut next = self.next_code()?;
        while let Some(byte) = next.filter(|&b| is_ident_continue(b)) {
            self.ident.push(char::from(byte));
            next = self.next_code()?;
        }
        while next.is_some_and(is_space) {
            next = self.next_code()?;
        }

        match next {
            Some(b'(') => Ok(IdKind::CALLED),
            Some(byte) if is_ident_start(byte) => {
                self.unget(byte)?;
                Ok(IdKind::NOT_CALLED)
            }
            _ => Ok(IdKind::NOT_CALLED),
        }
    }

    /// Scan the whole source, appending a cross-reference for every
    /// identifier that resolves to a header.
    pub fn run(&mut self, table: &IdTable, out: &mut Vec<XRef>) -> Result<(), IncbotError> {
        while let Some(byte) = self.next_code()? {
            if !is_ident_start(byte) {
                continue;
            }

            let line = self.line;
            let in_preprocessor = self.in_preprocessor;
            let mask = self.read_ident(byte)?;

            if in_preprocessor && self.ident == "include" && self.line == line {
                self.skip_line()?;
            }

            self.resolve(table, mask, line, out);
        }
        Ok(())
    }

    fn resolve(&self, table: &IdTable, mask: IdKind, line: u32, out: &mut Vec<XRef>) {
        let Some(position) = table.find(&self.ident, mask) else {
            trace!(line, id = %self.ident, %mask, "unresolved");
            return;
        };
        let Some(record) = table.record(position) else {
            return;
        };

        let header = table.strings().name_of(record.header).unwrap_or("");
        if record.kind != IdKind::KEYWORD && !header.is_empty() {
            out.push(XRef {
                header: record.header,
                ident: record.name,
                record: position,
                line,
            });
        }

        let declares = table.strings().name_of(record.declares).unwrap_or("");
        debug!(
            line,
            id = %self.ident,
            kind = %record.kind.codes(),
            header,
            declares,
            "resolved"
        );
    }
}

/// Scan `source` and append its cross-references to `out`.
#[instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn scan_source(source: &[u8], table: &IdTable, out: &mut Vec<XRef>) -> Result<(), IncbotError> {
    let before = out.len();
    Scanner::new(source).run(table, out)?;
    debug!(xrefs = out.len() - before, "scanned");
    Ok(())
}

#[cfg(test)]
mod tests;
