//! Interned symbol identifier.
//!
//! Provides compact 32-bit symbol ids with a reserved "undefined" value.

use std::fmt;

/// Interned symbol identifier.
///
/// Layout: 1-based append position in the owning [`Dict`](crate::Dict).
/// Raw value 0 is [`SymbolId::UNDEFINED`] and never names a string, so a
/// zero-initialized record field reads as "no symbol".
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct SymbolId(u32);

impl SymbolId {
    /// Reserved sentinel, never assigned to a real string.
    pub const UNDEFINED: SymbolId = SymbolId(0);

    /// Create from raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        SymbolId(raw)
    }

    /// Id for the symbol stored at zero-based slot `index`.
    ///
    /// Returns `None` when `index + 1` does not fit in 32 bits.
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        index
            .checked_add(1)
            .and_then(|raw| u32::try_from(raw).ok())
            .map(SymbolId)
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns `true` unless this is [`SymbolId::UNDEFINED`].
    #[inline]
    pub const fn is_defined(self) -> bool {
        self.0 != 0
    }

    /// Zero-based storage slot, or `None` for [`SymbolId::UNDEFINED`].
    #[inline]
    pub const fn index(self) -> Option<usize> {
        match self.0 {
            0 => None,
            raw => Some(raw as usize - 1),
        }
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_defined() {
            write!(f, "SymbolId({})", self.0)
        } else {
            f.write_str("SymbolId(undefined)")
        }
    }
}

#[cfg(test)]
mod tests;
