//! Buffer Fragmentation Enumeration
//!
//! ## Purpose
//!
//! A stream parser must produce the same result however the transport happens
//! to chop its input. This module enumerates every such chopping of a buffer so
//! a test harness can feed each one through an incremental parser and compare.
//!
//! A fragmentation of `length` bytes with pieces of at most `max_piece_size`
//! bytes is a composition of `length`: an ordered list of positive piece sizes
//! summing to `length`.
//!
//! ```text
//! "ABCDE", max 2
//!   [1,1,1,1,1]  A|B|C|D|E
//!   [1,1,1,2]    A|B|C|DE
//!   ...
//!   [2,2,1]      AB|CD|E
//! ```
//!
//! ## Ordering
//!
//! [`enumerate_compositions`] yields compositions in lexicographic ascending
//! order, so the all-ones composition comes first and `[1,1,1] < [1,2] < [2,1] < [3]`.
//! Fixtures may rely on this order.
//!
//! ## Growth
//!
//! Counts grow exponentially in `length` once `max_piece_size` exceeds one, so
//! enumeration is lazy and holds a single composition at a time.

use crate::error::{ChunkingError, Result};
use bytes::Bytes;
use std::iter::FusedIterator;
use tracing::debug;

/// Number of compositions of `length` with pieces in `1..=max_piece_size`
///
/// Evaluates `count(n) = Σ count(n - k)` for `k` in `1..=min(max_piece_size, n)`
/// bottom-up with `count(0) = 1`. Saturates at `u128::MAX`.
pub fn count_compositions(length: usize, max_piece_size: usize) -> u128 {
    if length == 0 {
        return 1;
    }
    if max_piece_size == 0 {
        return 0;
    }
    if max_piece_size == 1 {
        return 1;
    }
    if max_piece_size >= length {
        // every subset of the length - 1 gaps is a cut
        return u32::try_from(length - 1)
            .ok()
            .and_then(|gaps| 1u128.checked_shl(gaps))
            .unwrap_or(u128::MAX);
    }

    let window = max_piece_size;
    let mut counts: Vec<u128> = Vec::with_capacity(length.min(256) + 1);
    counts.push(1);
    // Σ counts[n - window..n], clamped at zero
    let mut window_sum: u128 = 1;

    for n in 1..length {
        counts.push(window_sum);
        let evicted = if n >= window { counts[n - window] } else { 0 };
        window_sum = match (window_sum - evicted).checked_add(counts[n]) {
            Some(sum) => sum,
            None => {
                // counts never decrease, so count(length) overflows as well
                debug!(length, max_piece_size, "Composition count saturated");
                return u128::MAX;
            }
        };
    }

    window_sum
}

/// Lazily enumerate the compositions of `length` with pieces in `1..=max_piece_size`
///
/// A zero `length` yields one empty composition. A zero `max_piece_size` with a
/// nonzero `length` yields nothing. The number of items always equals
/// [`count_compositions`] for the same arguments.
pub fn enumerate_compositions(length: usize, max_piece_size: usize) -> Compositions {
    let first = if length == 0 {
        Some(Vec::new())
    } else if max_piece_size == 0 {
        None
    } else {
        Some(vec![1; length])
    };

    Compositions {
        max_piece_size,
        next: first,
    }
}

/// Iterator returned by [`enumerate_compositions`]
///
/// A clone continues from the same position; call [`enumerate_compositions`]
/// again to start over.
#[derive(Debug, Clone)]
pub struct Compositions {
    max_piece_size: usize,
    next: Option<Vec<usize>>,
}

impl Compositions {
    /// Lexicographic successor of `current`, if any
    ///
    /// Grows the rightmost non-final piece that is still below the bound and
    /// resets everything after it to single-byte pieces.
    fn successor(current: &[usize], max_piece_size: usize) -> Option<Vec<usize>> {
        let last = current.len().checked_sub(1)?;
        let pivot = current[..last]
            .iter()
            .rposition(|&piece| piece < max_piece_size)?;
        let rest = current[pivot + 1..].iter().sum::<usize>() - 1;

        let mut next = Vec::with_capacity(pivot + 1 + rest);
        next.extend_from_slice(&current[..pivot]);
        next.push(current[pivot] + 1);
        next.resize(pivot + 1 + rest, 1);
        Some(next)
    }
}

impl Iterator for Compositions {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = Self::successor(&current, self.max_piece_size);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(_) => (1, None),
            None => (0, Some(0)),
        }
    }
}

impl FusedIterator for Compositions {}

/// Split `buffer` into contiguous slices of the given lengths
///
/// Slices share the buffer's storage. Concatenating them reproduces `buffer`.
///
/// # Panics
///
/// If `pieces` does not sum to `buffer.len()` or contains a zero. Use
/// [`try_split_buffer`] to get the error instead.
pub fn split_buffer(buffer: &Bytes, pieces: &[usize]) -> Vec<Bytes> {
    match try_split_buffer(buffer, pieces) {
        Ok(slices) => slices,
        Err(e) => panic!("invalid fragmentation {pieces:?}: {e}"),
    }
}

/// Fallible [`split_buffer`]
pub fn try_split_buffer(buffer: &Bytes, pieces: &[usize]) -> Result<Vec<Bytes>> {
    if let Some(index) = pieces.iter().position(|&piece| piece == 0) {
        return Err(ChunkingError::zero_length_piece(index));
    }

    let total = pieces
        .iter()
        .fold(0usize, |total, &piece| total.saturating_add(piece));
    if total != buffer.len() {
        return Err(ChunkingError::length_mismatch(buffer.len(), total));
    }

    let mut offset = 0;
    Ok(pieces
        .iter()
        .map(|&piece| {
            let slice = buffer.slice(offset..offset + piece);
            offset += piece;
            slice
        })
        .collect())
}

/// Every fragmentation of `buffer` with pieces of at most `max_piece_size` bytes
///
/// Items come in [`enumerate_compositions`] order.
pub fn fragmentations(buffer: &Bytes, max_piece_size: usize) -> Fragmentations {
    Fragmentations {
        buffer: buffer.clone(),
        compositions: enumerate_compositions(buffer.len(), max_piece_size),
    }
}

/// Iterator returned by [`fragmentations`]
#[derive(Debug, Clone)]
pub struct Fragmentations {
    buffer: Bytes,
    compositions: Compositions,
}

impl Iterator for Fragmentations {
    type Item = Vec<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        let pieces = self.compositions.next()?;
        Some(split_buffer(&self.buffer, &pieces))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.compositions.size_hint()
    }
}

impl FusedIterator for Fragmentations {}
