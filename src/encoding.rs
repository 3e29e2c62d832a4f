//! Wire forms of a [`BitArray`].
//!
//! - Structured form: serde with exactly two fields, `bits` then `elems`.
//!   The lock is never serialized. An absent array goes through
//!   `Option<BitArray>` and encodes as `null`.
//! - Byte form: each word little-endian, concatenated, truncated to
//!   `ceil(bits / 8)` bytes.
//!
//! Decoding validates the word count and rejects set padding bits, so every
//! decoded array satisfies the same invariants as one built with
//! [`BitArray::new`].

use crate::bitarray::{num_words, BitArray, Word, Words};
use crate::error::{BitArrayError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of bytes in the byte form of a `bits`-bit array.
#[inline]
pub(crate) const fn num_bytes(bits: usize) -> usize {
    bits.div_ceil(8)
}

#[derive(Serialize)]
struct BitArrayRef<'a> {
    bits: usize,
    elems: &'a [Word],
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BitArrayRepr {
    bits: usize,
    elems: Vec<Word>,
}

impl BitArrayRepr {
    fn into_bit_array(self) -> Result<BitArray> {
        let expected = num_words(self.bits);
        if self.elems.len() != expected {
            log::debug!(
                "rejecting bit array: {} bits with {} words",
                self.bits,
                self.elems.len()
            );
            return Err(BitArrayError::ElemCount {
                bits: self.bits,
                expected,
                actual: self.elems.len(),
            });
        }
        let words = Words {
            bits: self.bits,
            elems: self.elems,
        };
        if words.has_padding_bits() {
            log::debug!("rejecting bit array: padding bits set past {}", words.bits);
            return Err(BitArrayError::PaddingBits { bits: words.bits });
        }
        Ok(BitArray::from_words(words))
    }
}

impl Serialize for BitArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let words = self.lock();
        BitArrayRef {
            bits: words.bits,
            elems: &words.elems,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BitArray {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let repr = BitArrayRepr::deserialize(deserializer)?;
        repr.into_bit_array().map_err(D::Error::custom)
    }
}

impl BitArray {
    /// Byte form: little-endian words truncated to `ceil(size() / 8)` bytes.
    ///
    /// ```
    /// use syncbits::BitArray;
    ///
    /// let ba = BitArray::new(3).unwrap();
    /// ba.set_index(0, true);
    /// ba.set_index(2, true);
    /// assert_eq!(ba.bytes(), vec![0b0000_0101]);
    /// ```
    pub fn bytes(&self) -> Vec<u8> {
        let words = self.lock();
        let mut out = Vec::with_capacity(words.elems.len() * 8);
        for elem in &words.elems {
            out.extend_from_slice(&elem.to_le_bytes());
        }
        out.truncate(num_bytes(words.bits));
        out
    }

    /// Rebuild an array of `bits` bits from its byte form.
    ///
    /// `bytes` must be exactly `ceil(bits / 8)` long with no bits set past
    /// `bits`.
    pub fn from_bytes(bits: usize, bytes: &[u8]) -> Result<Self> {
        if bits == 0 {
            return Err(BitArrayError::ZeroBits);
        }
        let expected = num_bytes(bits);
        if bytes.len() != expected {
            return Err(BitArrayError::ByteCount {
                bits,
                expected,
                actual: bytes.len(),
            });
        }

        let mut words = Words::zeroed(bits);
        for (elem, chunk) in words.elems.iter_mut().zip(bytes.chunks(8)) {
            let mut buf = [0u8; 8];
            buf[..chunk.len()].copy_from_slice(chunk);
            *elem = Word::from_le_bytes(buf);
        }
        if words.has_padding_bits() {
            return Err(BitArrayError::PaddingBits { bits });
        }
        Ok(Self::from_words(words))
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to binary (bincode).
    pub fn to_binary(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from binary (bincode).
    pub fn from_binary(data: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(data)?)
    }
}
