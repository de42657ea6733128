//! Helpers for feeding one document as several `write` calls.
//!
//! Splits happen at arbitrary byte offsets, including inside UTF-8
//! sequences, escapes and numbers: the parser must produce the same result
//! however the input is cut.
use alloc::vec::Vec;

/// Split `payload` into `parts` chunks of approximately equal size. A `parts`
/// of zero is treated as one.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    let chunk_size = payload.len().div_ceil(parts.max(1)).max(1);
    payload.chunks(chunk_size).collect()
}

/// Split `payload` at the given sizes, the way a property test or fuzzer
/// picks them: each entry is reduced modulo the remaining length, and the
/// rest of the payload forms the final chunk.
#[must_use]
pub fn split_by_sizes<'a>(payload: &'a [u8], sizes: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::with_capacity(sizes.len() + 1);
    let mut rest = payload;
    for &s in sizes {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(1 + s % rest.len());
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}
