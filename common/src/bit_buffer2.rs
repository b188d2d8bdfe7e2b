//! Bit-packed 2D buffer for boolean masks.
//!
//! Uses 1 bit per element instead of 1 byte.

/// Number of bits per storage word.
const BITS_PER_WORD: usize = 64;

/// A 2D buffer storing boolean values packed as bits, row-major.
///
/// Addressed by linear index (`y * width + x`), matching [`crate::Buffer2::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitBuffer2 {
    /// Each u64 holds 64 values in LSB order.
    words: Vec<u64>,
    len: usize,
}

impl BitBuffer2 {
    #[inline]
    pub fn new_filled(width: usize, height: usize, value: bool) -> Self {
        let len = width * height;
        let fill = if value { !0u64 } else { 0u64 };
        Self {
            words: vec![fill; len.div_ceil(BITS_PER_WORD)],
            len,
        }
    }

    #[inline]
    pub fn new_default(width: usize, height: usize) -> Self {
        Self::new_filled(width, height, false)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        debug_assert!(idx < self.len);
        (self.words[idx / BITS_PER_WORD] >> (idx % BITS_PER_WORD)) & 1 != 0
    }

    #[inline]
    pub fn set(&mut self, idx: usize, value: bool) {
        debug_assert!(idx < self.len);
        let bit = 1u64 << (idx % BITS_PER_WORD);
        if value {
            self.words[idx / BITS_PER_WORD] |= bit;
        } else {
            self.words[idx / BITS_PER_WORD] &= !bit;
        }
    }

    /// Sets the bit and reports whether it was previously clear.
    #[inline]
    pub fn insert(&mut self, idx: usize) -> bool {
        let was_set = self.get(idx);
        self.set(idx, true);
        !was_set
    }
}
