//! Lexical classes and the `(class, byte)` pair.

use std::fmt;

/// Lexical context of a single byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Ordinary code.
    Code,
    /// `"` opening or closing a string literal.
    OuterString,
    /// Content of a string literal, escapes included.
    InnerString,
    /// `'` opening or closing a character literal.
    OuterChar,
    /// Content of a character literal.
    InnerChar,
    /// Comment delimiter: `/*`, `*/`, `//`, or the newline ending a `//` comment.
    OuterComment,
    /// Comment text.
    InnerComment,
    /// End of input.
    Eof,
    /// Input ended inside a literal or block comment.
    Err,
}

impl CharClass {
    /// Upper-case name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            CharClass::Code => "CODE",
            CharClass::OuterString => "OUTER_STRING",
            CharClass::InnerString => "INNER_STRING",
            CharClass::OuterChar => "OUTER_CHAR",
            CharClass::InnerChar => "INNER_CHAR",
            CharClass::OuterComment => "OUTER_COMMENT",
            CharClass::InnerComment => "INNER_COMMENT",
            CharClass::Eof => "EOF",
            CharClass::Err => "ERR",
        }
    }

    /// `Eof` or `Err`: nothing follows.
    pub const fn is_terminal(self) -> bool {
        matches!(self, CharClass::Eof | CharClass::Err)
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SuperChar {
    pub class: CharClass,
    pub byte: u8,
}

impl SuperChar {
    /// End-of-input marker.
    pub const EOF: SuperChar = SuperChar::new(CharClass::Eof, 0);
    /// Error marker, queued before an unterminated-input error is returned.
    pub const ERR: SuperChar = SuperChar::new(CharClass::Err, 0);

    #[inline]
    pub const fn new(class: CharClass, byte: u8) -> Self {
        Self { class, byte }
    }

    #[inline]
    pub const fn code(byte: u8) -> Self {
        Self::new(CharClass::Code, byte)
    }

    /// Returns `true` for a `Code` byte.
    #[inline]
    pub fn is_code(self) -> bool {
        self.class == CharClass::Code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_eof_and_err_are_terminal() {
        let all = [
            CharClass::Code,
            CharClass::OuterString,
            CharClass::InnerString,
            CharClass::OuterChar,
            CharClass::InnerChar,
            CharClass::OuterComment,
            CharClass::InnerComment,
            CharClass::Eof,
            CharClass::Err,
        ];
        let terminal: Vec<CharClass> = all.into_iter().filter(|c| c.is_terminal()).collect();
        assert_eq!(terminal, [CharClass::Eof, CharClass::Err]);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(CharClass::InnerComment.to_string(), "INNER_COMMENT");
        assert_eq!(CharClass::Code.to_string(), "CODE");
    }

    #[test]
    fn markers() {
        assert!(SuperChar::code(b'x').is_code());
        assert!(!SuperChar::EOF.is_code());
        assert_eq!(SuperChar::ERR.class, CharClass::Err);
    }
}
