//! Symbol hash for the bucket index.

/// Jenkins one-at-a-time hash over the bytes of `s`.
///
/// Each byte is folded in with an add/shift/xor round, then three final
/// rounds avalanche the high bits down. Deterministic within a run; no
/// stability across versions is promised.
#[inline]
pub fn hash_symbol(s: &str) -> u32 {
    let mut hash: u32 = 0;
    for &byte in s.as_bytes() {
        hash = hash.wrapping_add(u32::from(byte));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}
