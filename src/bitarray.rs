//! BitArray - Thread-safe fixed-size bit array using 64-bit words.
//!
//! This module provides a packed bit array guarded by a single lock, meant
//! for tracking which of N discrete items (votes, block parts, peer
//! addresses) have been observed, by index, from many workers at once.
//!
//! # Design
//!
//! - Uses `Vec<u64>` for storage (64-bit words)
//! - Bit indexing: word_idx = bit_idx / 64, bit_offset = bit_idx % 64
//! - One `Mutex` per instance; every public method holds it for its
//!   whole duration, so operations on one instance are linearizable
//! - Unlocked logic lives on [`Words`]; `BitArray` methods are thin
//!   lock-and-delegate wrappers
//! - Out-of-range indices never panic: reads return `false`, writes
//!   return `false` and leave the array untouched
//!
//! # Examples
//!
//! ```
//! use syncbits::BitArray;
//!
//! let ba = BitArray::new(3).unwrap();
//! ba.set_index(0, true);
//! ba.set_index(2, true);
//! assert_eq!(ba.to_string(), "BA{3:x_x}");
//! assert_eq!(ba.true_indices(), vec![0, 2]);
//! ```

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Word type for bit storage (64-bit unsigned integer)
pub type Word = u64;

/// Number of bits per word
pub const BITS_PER_WORD: usize = 64;

/// Maximum word value
pub const WORD_MAX: Word = Word::MAX;

/// Get word index from bit position
#[inline(always)]
const fn get_word_idx(bit_pos: usize) -> usize {
    bit_pos >> 6 // bit_pos / 64
}

/// Get bit index within word from bit position
#[inline(always)]
const fn get_bit_idx(bit_pos: usize) -> usize {
    bit_pos & 63 // bit_pos % 64
}

/// Create bitmask with n bits set (from LSB)
#[inline(always)]
pub(crate) const fn bitmask(n: usize) -> Word {
    if n == 0 {
        0
    } else if n >= BITS_PER_WORD {
        WORD_MAX
    } else {
        WORD_MAX >> (BITS_PER_WORD - n)
    }
}

/// Number of words needed to hold `bits` bits.
#[inline]
pub(crate) const fn num_words(bits: usize) -> usize {
    bits.div_ceil(BITS_PER_WORD)
}

/// Number of meaningful bits in the final word of a `bits`-bit store.
///
/// Always in `1..=64`; a zero-bit store has no final word and reports 64.
#[inline]
pub(crate) const fn last_word_bits(bits: usize) -> usize {
    if bits == 0 {
        BITS_PER_WORD
    } else {
        (bits - 1) % BITS_PER_WORD + 1
    }
}

/// Unlocked bit storage.
///
/// Invariants: `elems.len() == num_words(bits)` and every bit at or past
/// `bits` in the final word is zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Words {
    pub(crate) bits: usize,
    pub(crate) elems: Vec<Word>,
}

impl Words {
    pub(crate) fn zeroed(bits: usize) -> Self {
        Self {
            bits,
            elems: vec![0; num_words(bits)],
        }
    }

    #[inline]
    fn get_index(&self, i: usize) -> bool {
        if i >= self.bits {
            return false;
        }
        (self.elems[get_word_idx(i)] >> get_bit_idx(i)) & 1 == 1
    }

    #[inline]
    fn set_index(&mut self, i: usize, v: bool) -> bool {
        if i >= self.bits {
            return false;
        }
        if v {
            self.elems[get_word_idx(i)] |= 1 << get_bit_idx(i);
        } else {
            self.elems[get_word_idx(i)] &= !(1 << get_bit_idx(i));
        }
        true
    }

    /// Copy into a store of a different size.
    ///
    /// Truncates or zero-pads by word, then clears whatever lands past the
    /// new bit count in the final word.
    fn copy_bits(&self, bits: usize) -> Self {
        let mut out = Self::zeroed(bits);
        let n = out.elems.len().min(self.elems.len());
        out.elems[..n].copy_from_slice(&self.elems[..n]);
        out.clear_padding();
        out
    }

    /// Zero the unused high bits of the final word.
    pub(crate) fn clear_padding(&mut self) {
        let valid = last_word_bits(self.bits);
        if let Some(last) = self.elems.last_mut() {
            *last &= bitmask(valid);
        }
    }

    /// True if any bit at or past `bits` is set in the final word.
    pub(crate) fn has_padding_bits(&self) -> bool {
        match self.elems.last() {
            Some(&last) => last & !bitmask(last_word_bits(self.bits)) != 0,
            None => false,
        }
    }

    fn is_empty(&self) -> bool {
        self.elems.iter().all(|&w| w == 0)
    }

    fn is_full(&self) -> bool {
        let Some((&last, rest)) = self.elems.split_last() else {
            return true;
        };
        if rest.iter().any(|&w| w != WORD_MAX) {
            return false;
        }
        let mask = bitmask(last_word_bits(self.bits));
        last & mask == mask
    }

    /// Ascending indices of every set bit in `[0, bits)`.
    fn true_indices(&self) -> Vec<usize> {
        let mut acts = Vec::new();
        for (word_idx, &word) in self.elems.iter().enumerate() {
            if word == 0 {
                continue;
            }
            let base = word_idx * BITS_PER_WORD;
            for bit_idx in 0..BITS_PER_WORD {
                let bit_pos = base + bit_idx;
                if bit_pos >= self.bits {
                    break;
                }
                if (word >> bit_idx) & 1 == 1 {
                    acts.push(bit_pos);
                }
            }
        }
        acts
    }

    fn count_true(&self) -> usize {
        self.elems.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Body of the text form.
    ///
    /// `indent` goes after every 10th bit and once more after every 50th;
    /// every 100 bits start a new segment, and segments are joined with
    /// `indent`.
    fn string_indented(&self, indent: &str) -> String {
        let mut lines: Vec<String> = Vec::new();
        let mut bits = String::new();
        for i in 0..self.bits {
            bits.push(if self.get_index(i) { 'x' } else { '_' });
            if i % 100 == 99 {
                lines.push(std::mem::take(&mut bits));
            }
            if i % 10 == 9 {
                bits.push_str(indent);
            }
            if i % 50 == 49 {
                bits.push_str(indent);
            }
        }
        if !bits.is_empty() {
            lines.push(bits);
        }
        format!("BA{{{}:{}}}", self.bits, lines.join(indent))
    }
}

/// Thread-safe packed bit array.
///
/// The size is fixed at construction. All methods take `&self`; writes go
/// through the internal lock, so a `BitArray` is shared across threads
/// behind an `Arc` rather than a `Mutex`.
///
/// The absent ("no array") value is `None`; see [`crate::MaybeBitArray`]
/// for the operations that treat it as an empty array.
pub struct BitArray {
    words: Mutex<Words>,
}

impl BitArray {
    /// Create a new BitArray with `bits` bits, all initialized to 0.
    ///
    /// Returns `None` (the absent array) when `bits == 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use syncbits::BitArray;
    ///
    /// assert!(BitArray::new(0).is_none());
    ///
    /// let ba = BitArray::new(100).unwrap();
    /// assert_eq!(ba.size(), 100);
    /// assert!(ba.is_empty());
    /// ```
    pub fn new(bits: usize) -> Option<Self> {
        if bits == 0 {
            return None;
        }
        Some(Self::from_words(Words::zeroed(bits)))
    }

    pub(crate) fn from_words(words: Words) -> Self {
        Self {
            words: Mutex::new(words),
        }
    }

    /// Acquire the instance lock.
    ///
    /// Every critical section leaves `Words` consistent, so a poisoned lock
    /// is recovered rather than propagated.
    #[inline]
    pub(crate) fn lock(&self) -> MutexGuard<'_, Words> {
        self.words.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the word store, taken under the lock.
    pub(crate) fn snapshot(&self) -> Words {
        self.lock().clone()
    }

    // =========================================================================
    // Single Bit Operations
    // =========================================================================

    /// Number of bits in the array.
    #[inline]
    pub fn size(&self) -> usize {
        self.lock().bits
    }

    /// Get the bit at index `i`.
    ///
    /// Returns `false` when `i >= size()`; use [`BitArray::get`] to tell an
    /// invalid index apart from a cleared bit.
    #[inline]
    pub fn get_index(&self, i: usize) -> bool {
        self.lock().get_index(i)
    }

    /// Get the bit at index `i`, or `None` when `i >= size()`.
    #[inline]
    pub fn get(&self, i: usize) -> Option<bool> {
        let words = self.lock();
        (i < words.bits).then(|| words.get_index(i))
    }

    /// Set the bit at index `i` to `v`.
    ///
    /// Returns `false` without touching the array when `i >= size()`.
    #[inline]
    pub fn set_index(&self, i: usize, v: bool) -> bool {
        self.lock().set_index(i, v)
    }

    // =========================================================================
    // Copying
    // =========================================================================

    /// Independent copy with the same size and bits.
    pub fn copy(&self) -> BitArray {
        Self::from_words(self.snapshot())
    }

    /// Copy into a new array of `bits` bits.
    ///
    /// The copy truncates or zero-pads by word, not by bit: the first
    /// `min` words are carried over and any bits past `bits` in the new
    /// final word are cleared. Returns `None` when `bits == 0`.
    pub fn copy_bits(&self, bits: usize) -> Option<BitArray> {
        if bits == 0 {
            return None;
        }
        let words = self.lock();
        if bits < words.bits {
            log::trace!("copy_bits truncating {} bits to {}", words.bits, bits);
        }
        Some(Self::from_words(words.copy_bits(bits)))
    }

    /// Overwrite this array's words with `other`'s, starting at word 0.
    ///
    /// Copies `min(len(self), len(other))` words; the size of `self` never
    /// changes. This is a raw overwrite, not a logical OR.
    ///
    /// `other` is snapshotted under its own lock and released before
    /// `self` is locked, so two arrays updating from each other
    /// concurrently cannot deadlock.
    pub fn update(&self, other: &BitArray) {
        if std::ptr::eq(self, other) {
            return;
        }
        let src = other.lock().elems.clone();
        let mut dst = self.lock();
        if dst.elems.len() != src.len() {
            log::debug!(
                "update between mismatched arrays: {} words <- {} words",
                dst.elems.len(),
                src.len()
            );
        }
        let n = dst.elems.len().min(src.len());
        dst.elems[..n].copy_from_slice(&src[..n]);
        dst.clear_padding();
    }

    // =========================================================================
    // Aggregate Queries
    // =========================================================================

    /// True if every bit is 0 (vacuously true for a zero-bit array).
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// True if every bit in `[0, size())` is 1.
    ///
    /// A zero-bit array is trivially full.
    pub fn is_full(&self) -> bool {
        self.lock().is_full()
    }

    /// Ascending indices of all set bits.
    pub fn true_indices(&self) -> Vec<usize> {
        self.lock().true_indices()
    }

    /// Number of set bits.
    pub fn count_true(&self) -> usize {
        self.lock().count_true()
    }

    // =========================================================================
    // Random Operations
    // =========================================================================

    /// Index of a set bit chosen uniformly at random, or `None` if no bit is
    /// set. Uses the thread-local RNG.
    pub fn pick_random(&self) -> Option<usize> {
        self.pick_random_with(&mut rand::thread_rng())
    }

    /// Same as [`BitArray::pick_random`] with a caller-supplied RNG.
    ///
    /// The lock is held only while collecting the set indices.
    pub fn pick_random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        let true_indices = self.true_indices();
        true_indices.choose(rng).copied()
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Text form `BA{<bits>:<bitstring>}` with `indent` inserted after every
    /// 10th bit, twice after every 50th, and between 100-bit segments.
    ///
    /// ```
    /// use syncbits::BitArray;
    ///
    /// let ba = BitArray::new(12).unwrap();
    /// ba.set_index(11, true);
    /// assert_eq!(ba.string_indented(" "), "BA{12:__________ _x}");
    /// ```
    pub fn string_indented(&self, indent: &str) -> String {
        self.lock().string_indented(indent)
    }
}

impl Default for BitArray {
    /// Present array with zero bits and an empty word store.
    fn default() -> Self {
        Self::from_words(Words::default())
    }
}

impl Clone for BitArray {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl PartialEq for BitArray {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        // One lock at a time, same as update().
        let lhs = self.snapshot();
        lhs == other.snapshot()
    }
}

impl Eq for BitArray {}

impl fmt::Display for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string_indented(""))
    }
}

impl fmt::Debug for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = self.lock();
        f.debug_struct("BitArray")
            .field("bits", &words.bits)
            .field("elems", &words.elems)
            .finish()
    }
}
