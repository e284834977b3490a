//! Identifier kinds.
//!
//! A table record carries exactly one kind. Lookups carry a *mask* of the
//! kinds they accept, so the same type serves both roles.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Kind of a library identifier, or a set of kinds used as a lookup mask.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct IdKind: u8 {
        /// Listed, but the kind is not known (`?`).
        const UNKNOWN = 0x01;
        /// Function or function-like macro (`f`).
        const FUNCTION = 0x02;
        /// Typedef name (`t`).
        const TYPEDEF = 0x04;
        /// Language keyword (`k`). Never produces an include.
        const KEYWORD = 0x08;
        /// Constant or object-like macro (`c`).
        const CONSTANT = 0x10;
        /// Global variable (`v`).
        const VAR = 0x20;
        /// Struct tag (`s`).
        const STRUCT = 0x40;
    }
}

/// Kinds in display order, highest bit first.
const BY_BIT: [IdKind; 7] = [
    IdKind::STRUCT,
    IdKind::VAR,
    IdKind::CONSTANT,
    IdKind::KEYWORD,
    IdKind::TYPEDEF,
    IdKind::FUNCTION,
    IdKind::UNKNOWN,
];

const WORDS: [(IdKind, &str); 7] = [
    (IdKind::CONSTANT, "constant"),
    (IdKind::FUNCTION, "function"),
    (IdKind::KEYWORD, "keyword"),
    (IdKind::STRUCT, "struct"),
    (IdKind::TYPEDEF, "type"),
    (IdKind::VAR, "var"),
    (IdKind::UNKNOWN, "unknown"),
];

/// Kinds in table-code order.
const BY_CODE: [(u8, IdKind); 7] = [
    (b'c', IdKind::CONSTANT),
    (b'f', IdKind::FUNCTION),
    (b'k', IdKind::KEYWORD),
    (b's', IdKind::STRUCT),
    (b't', IdKind::TYPEDEF),
    (b'v', IdKind::VAR),
    (b'?', IdKind::UNKNOWN),
];

impl IdKind {
    /// Mask for an identifier followed by `(`.
    pub const CALLED: IdKind = IdKind::FUNCTION.union(IdKind::KEYWORD);

    /// Mask for an identifier not followed by `(`.
    pub const NOT_CALLED: IdKind = IdKind::all().difference(IdKind::FUNCTION);

    /// Decode a one-letter table type code.
    pub fn from_code(code: &str) -> Option<IdKind> {
        match code.as_bytes() {
            [letter] => BY_CODE
                .iter()
                .find(|(c, _)| c == letter)
                .map(|&(_, kind)| kind),
            _ => None,
        }
    }

    /// Table codes of every kind in the set, e.g. `"fk"`.
    pub fn codes(self) -> String {
        BY_CODE
            .iter()
            .filter(|(_, kind)| self.contains(*kind))
            .map(|&(code, _)| char::from(code))
            .collect()
    }

    /// Human-readable word for a single kind; `"?"` for anything else.
    pub fn word(self) -> &'static str {
        WORDS
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or("?", |&(_, word)| word)
    }
}

/// Shows a mask as `{keyword|function}`, highest bit first. The empty set
/// shows as nothing.
impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for kind in BY_BIT.iter().filter(|kind| self.contains(**kind)) {
            f.write_str(if first { "{" } else { "|" })?;
            f.write_str(kind.word())?;
            first = false;
        }
        if !first {
            f.write_str("}")?;
        }
        Ok(())
    }
}
