//! Operations on a possibly-absent bit array.
//!
//! [`BitArray::new`] returns `None` for a zero-bit request, and callers
//! commonly hold `Option<BitArray>`. [`MaybeBitArray`] lets them query and
//! mutate that value directly: `None` behaves as an array of size 0 and
//! every operation returns a neutral result instead of failing.
//!
//! ```
//! use syncbits::{BitArray, MaybeBitArray};
//!
//! let absent: Option<BitArray> = BitArray::new(0);
//! assert_eq!(absent.as_ref().size(), 0);
//! assert!(!absent.as_ref().set_index(0, true));
//! assert_eq!(absent.as_ref().render(), "nil-BitArray");
//! ```

use crate::bitarray::BitArray;

/// Text form of an absent array.
pub const NIL_BIT_ARRAY: &str = "nil-BitArray";

/// Bit array operations that accept the absent array.
pub trait MaybeBitArray {
    /// Number of bits; 0 when absent.
    fn size(&self) -> usize;

    /// Bit at `i`; `false` when absent or out of range.
    fn get_index(&self, i: usize) -> bool;

    /// Set bit `i`; `false` when absent or out of range.
    fn set_index(&self, i: usize, v: bool) -> bool;

    /// Independent copy; absent in, absent out.
    fn copy(&self) -> Option<BitArray>;

    /// `true` when absent.
    fn is_empty(&self) -> bool;

    /// `true` when absent.
    fn is_full(&self) -> bool;

    /// Uniformly chosen set index; `None` when absent.
    fn pick_random(&self) -> Option<usize>;

    /// Byte form; empty when absent.
    fn bytes(&self) -> Vec<u8>;

    /// Indented text form; `"nil-BitArray"` when absent.
    fn string_indented(&self, indent: &str) -> String;

    /// Raw word overwrite from `other`; no-op if either side is absent.
    fn update(&self, other: Option<&BitArray>);

    /// Unindented text form.
    fn render(&self) -> String {
        self.string_indented("")
    }
}

impl MaybeBitArray for Option<&BitArray> {
    fn size(&self) -> usize {
        self.map_or(0, BitArray::size)
    }

    fn get_index(&self, i: usize) -> bool {
        self.is_some_and(|ba| ba.get_index(i))
    }

    fn set_index(&self, i: usize, v: bool) -> bool {
        self.is_some_and(|ba| ba.set_index(i, v))
    }

    fn copy(&self) -> Option<BitArray> {
        self.map(BitArray::copy)
    }

    fn is_empty(&self) -> bool {
        self.map_or(true, BitArray::is_empty)
    }

    fn is_full(&self) -> bool {
        self.map_or(true, BitArray::is_full)
    }

    fn pick_random(&self) -> Option<usize> {
        self.and_then(BitArray::pick_random)
    }

    fn bytes(&self) -> Vec<u8> {
        self.map(BitArray::bytes).unwrap_or_default()
    }

    fn string_indented(&self, indent: &str) -> String {
        match self {
            Some(ba) => ba.string_indented(indent),
            None => NIL_BIT_ARRAY.to_string(),
        }
    }

    fn update(&self, other: Option<&BitArray>) {
        if let (Some(ba), Some(other)) = (self, other) {
            ba.update(other);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_neutral_results() {
        let absent: Option<&BitArray> = None;
        assert_eq!(absent.size(), 0);
        assert!(!absent.get_index(0));
        assert!(!absent.set_index(0, true));
        assert!(absent.copy().is_none());
        assert!(absent.is_empty());
        assert!(absent.is_full());
        assert_eq!(absent.pick_random(), None);
        assert!(absent.bytes().is_empty());
        assert_eq!(absent.render(), "nil-BitArray");
        assert_eq!(absent.string_indented("  "), "nil-BitArray");
    }

    #[test]
    fn test_present_delegates() {
        let ba = BitArray::new(3);
        let present = ba.as_ref();
        assert_eq!(present.size(), 3);
        assert!(present.set_index(1, true));
        assert!(present.get_index(1));
        assert!(!present.is_empty());
        assert!(!present.is_full());
        assert_eq!(present.pick_random(), Some(1));
        assert_eq!(present.bytes(), vec![0b010]);
        assert_eq!(present.render(), "BA{3:_x_}");

        let copy = present.copy().unwrap();
        assert_eq!(copy.true_indices(), vec![1]);
    }

    #[test]
    fn test_update_with_absent_side() {
        let a = BitArray::new(8);
        let b = BitArray::new(8);
        b.as_ref().set_index(4, true);

        a.as_ref().update(None);
        assert!(a.as_ref().is_empty());

        let absent: Option<&BitArray> = None;
        absent.update(b.as_ref());

        a.as_ref().update(b.as_ref());
        assert!(a.as_ref().get_index(4));
    }
}
