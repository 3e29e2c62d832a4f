//! Syncbits - Thread-Safe Fixed-Size Bit Arrays
//!
//! Syncbits provides a compact, lock-guarded array of N boolean flags packed
//! into 64-bit words. It is meant for tracking which of N discrete items
//! (votes, block parts, peer addresses) have been observed, by index, while
//! many workers read and write the same array.
//!
//! # Key Characteristics
//!
//! - Fixed size chosen at construction; `BitArray::new(0)` is the absent array
//! - All operations take `&self` and hold a single per-instance lock
//! - Out-of-range indices never panic
//! - Uniform random selection among set bits
//! - Structured (serde), JSON, bincode and raw byte forms
//!
//! # Examples
//!
//! ## Tracking received parts
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use syncbits::BitArray;
//!
//! let parts = Arc::new(BitArray::new(128).unwrap());
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let parts = Arc::clone(&parts);
//!         thread::spawn(move || {
//!             for i in (t * 32)..((t + 1) * 32) {
//!                 parts.set_index(i, true);
//!             }
//!         })
//!     })
//!     .collect();
//! for h in handles {
//!     h.join().unwrap();
//! }
//! assert!(parts.is_full());
//! ```
//!
//! ## Absent arrays
//!
//! ```
//! use syncbits::{BitArray, MaybeBitArray};
//!
//! let votes: Option<BitArray> = BitArray::new(0);
//! assert!(votes.as_ref().is_empty());
//! assert_eq!(votes.as_ref().pick_random(), None);
//! ```
//!
//! # Concurrency
//!
//! Operations on one instance are linearizable. `update` never holds two
//! locks at once, so arrays may update from each other concurrently.

// Module declarations
pub mod absent;
pub mod bitarray;
pub mod encoding;
pub mod error;

// Re-exports for convenient access
pub use absent::{MaybeBitArray, NIL_BIT_ARRAY};
pub use bitarray::{BitArray, Word, BITS_PER_WORD, WORD_MAX};
pub use error::{BitArrayError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "Syncbits";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
