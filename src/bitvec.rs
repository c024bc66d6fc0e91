//! Position Mask (Consumed-Position Set)
//!
//! Fixed-length bitset over target positions. One `u64` word covers 64
//! positions, so membership is a shift and a mask.
//!
//! The position index itself is never modified: consumed positions are
//! skipped by checking this mask next to the binary search.

use alloc::vec;
use alloc::vec::Vec;

const WORD_BITS: usize = 64;

#[derive(Clone, Debug)]
pub struct PositionMask {
    words: Vec<u64>,
    len: usize,
}

impl PositionMask {
    /// Empty mask covering positions `0..len`.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    /// Mark `pos`. Positions past the end are ignored.
    #[inline]
    pub fn insert(&mut self, pos: usize) {
        if pos >= self.len {
            return;
        }
        self.words[pos / WORD_BITS] |= 1u64 << (pos % WORD_BITS);
    }

    #[inline(always)]
    pub fn contains(&self, pos: usize) -> bool {
        if pos >= self.len {
            return false;
        }
        (self.words[pos / WORD_BITS] >> (pos % WORD_BITS)) & 1 != 0
    }
}
