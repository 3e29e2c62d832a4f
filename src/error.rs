//! Error types for decoding and encoding bit arrays.
//!
//! Every in-memory `BitArray` operation is total; only the conversion
//! surface (structured form, JSON, binary, raw bytes) can fail.

use thiserror::Error;

/// The error type for bit array conversions.
#[derive(Error, Debug)]
pub enum BitArrayError {
    /// A present bit array needs at least one bit
    #[error("Bit count must be greater than zero")]
    ZeroBits,

    /// Word store length does not match the bit count
    #[error("Invalid word count for {bits} bits: expected {expected}, got {actual}")]
    ElemCount {
        /// Declared bit count
        bits: usize,
        /// Words required by `bits`
        expected: usize,
        /// Words supplied
        actual: usize,
    },

    /// Byte image length does not match the bit count
    #[error("Invalid byte count for {bits} bits: expected {expected}, got {actual}")]
    ByteCount {
        /// Declared bit count
        bits: usize,
        /// Bytes required by `bits`
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },

    /// Bits beyond the declared count are set in the final word or byte
    #[error("Padding bits set beyond bit count {bits}")]
    PaddingBits {
        /// Declared bit count
        bits: usize,
    },

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary encoding or decoding failed
    #[error("Binary serialization error: {0}")]
    Binary(#[from] bincode::Error),
}

/// A specialized `Result` type for bit array conversions.
pub type Result<T> = std::result::Result<T, BitArrayError>;
