//! Crate-wide constants.

/// Width of an EVM word, in bytes.
pub const WORD_BYTES: usize = 32;

/// Width of an EVM word, in bits.
pub const WORD_BITS: usize = WORD_BYTES * 8;

/// Width of an address, in bytes (the low-order 20 bytes of a word).
pub const ADDR_BYTES: usize = 20;
