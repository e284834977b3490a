//! Hash index from symbol text to [`SymbolId`].
//!
//! The index stores ids only. Strings stay in the dictionary's append-order
//! storage, and every candidate id is confirmed by comparing against it.
//!
//! Two strategies are available:
//!
//! - [`IndexStrategy::Native`]: an `FxHashMap` keyed by the shared string.
//! - [`IndexStrategy::Buckets`]: a fixed table of set-associative buckets.
//!   Each bucket has [`ASSOCIATIVITY`] direct `(hash, id)` slots; once those
//!   are full, further ids are appended to a shared overflow area and linked
//!   onto the bucket's chain. The table is sized once and never rehashed.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::hash::hash_symbol;
use crate::SymbolId;

/// Direct slots per bucket before spilling into the overflow chain.
pub const ASSOCIATIVITY: usize = 2;

/// Bucket count used when [`IndexStrategy::Buckets`] is given zero.
pub const DEFAULT_BUCKETS: usize = 4093;

/// How a [`Dict`](crate::Dict) indexes its symbols.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum IndexStrategy {
    /// Native string-keyed hash map.
    #[default]
    Native,
    /// Set-associative bucket table with the given number of buckets.
    Buckets(usize),
}

#[derive(Copy, Clone, Debug, Default)]
struct Slot {
    hash: u32,
    id: SymbolId,
}

#[derive(Clone, Debug, Default)]
struct Bucket {
    slots: [Slot; ASSOCIATIVITY],
    /// Head of this bucket's overflow chain.
    chain: Option<usize>,
}

#[derive(Copy, Clone, Debug)]
struct Overflow {
    hash: u32,
    id: SymbolId,
    next: Option<usize>,
}

/// Fixed-size set-associative table with chained overflow.
#[derive(Clone, Debug)]
pub(crate) struct BucketIndex {
    buckets: Box<[Bucket]>,
    /// Append-only; entries are linked per bucket through `next`.
    overflow: Vec<Overflow>,
}

impl BucketIndex {
    pub(crate) fn new(buckets: usize) -> Self {
        let count = if buckets == 0 { DEFAULT_BUCKETS } else { buckets };
        Self {
            buckets: vec![Bucket::default(); count].into_boxed_slice(),
            overflow: Vec::new(),
        }
    }

    #[inline]
    fn bucket_of(&self, hash: u32) -> usize {
        hash as usize % self.buckets.len()
    }

    fn find(&self, s: &str, names: &[Rc<str>]) -> SymbolId {
        let hash = hash_symbol(s);
        let bucket = &self.buckets[self.bucket_of(hash)];

        for slot in &bucket.slots {
            // Slots fill front to back, so the first empty one ends the set.
            if !slot.id.is_defined() {
                return SymbolId::UNDEFINED;
            }
            if slot.hash == hash && names_match(names, slot.id, s) {
                return slot.id;
            }
        }

        let mut link = bucket.chain;
        while let Some(at) = link {
            let entry = &self.overflow[at];
            if entry.hash == hash && names_match(names, entry.id, s) {
                return entry.id;
            }
            link = entry.next;
        }

        SymbolId::UNDEFINED
    }

    fn insert(&mut self, name: &str, id: SymbolId) {
        let hash = hash_symbol(name);
        let bucket_idx = self.bucket_of(hash);
        let bucket = &mut self.buckets[bucket_idx];

        if let Some(slot) = bucket.slots.iter_mut().find(|slot| !slot.id.is_defined()) {
            *slot = Slot { hash, id };
            return;
        }

        let at = self.overflow.len();
        self.overflow.push(Overflow {
            hash,
            id,
            next: None,
        });

        match bucket.chain {
            None => bucket.chain = Some(at),
            Some(head) => {
                let mut tail = head;
                while let Some(next) = self.overflow[tail].next {
                    tail = next;
                }
                self.overflow[tail].next = Some(at);
            }
        }
    }

    /// Number of entries that spilled out of their bucket's direct slots.
    #[cfg(test)]
    pub(crate) fn overflow_len(&self) -> usize {
        self.overflow.len()
    }
}

#[inline]
fn names_match(names: &[Rc<str>], id: SymbolId, s: &str) -> bool {
    id.index()
        .and_then(|idx| names.get(idx))
        .is_some_and(|name| **name == *s)
}

/// Index over a dictionary's symbols, dispatching on [`IndexStrategy`].
#[derive(Clone, Debug)]
pub(crate) enum SymbolIndex {
    Native(FxHashMap<Rc<str>, SymbolId>),
    Buckets(BucketIndex),
}

impl SymbolIndex {
    pub(crate) fn new(strategy: IndexStrategy) -> Self {
        match strategy {
            IndexStrategy::Native => SymbolIndex::Native(FxHashMap::default()),
            IndexStrategy::Buckets(count) => SymbolIndex::Buckets(BucketIndex::new(count)),
        }
    }

    /// Look up `s`, confirming candidates against `names` (slot = id - 1).
    pub(crate) fn find(&self, s: &str, names: &[Rc<str>]) -> SymbolId {
        match self {
            SymbolIndex::Native(map) => map.get(s).copied().unwrap_or(SymbolId::UNDEFINED),
            SymbolIndex::Buckets(table) => table.find(s, names),
        }
    }

    /// Record `id` for `name`. The caller guarantees `name` is not indexed yet.
    pub(crate) fn insert(&mut self, name: &Rc<str>, id: SymbolId) {
        match self {
            SymbolIndex::Native(map) => {
                map.insert(Rc::clone(name), id);
            }
            SymbolIndex::Buckets(table) => table.insert(name, id),
        }
    }
}
