//! Errors surfaced by the crate.
//!
//! The expression algebra itself (smart constructors, buffer/storage
//! overlay resolution) is total and never fails — see the crate-level
//! docs. The only fallible surface is the canonical IR codec.

use thiserror::Error;

/// Failure decoding a canonical IR byte stream produced by [`crate::codec`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The input ended before a complete node could be read.
    #[error("unexpected end of input while decoding {0}")]
    UnexpectedEof(&'static str),
    /// A tag byte didn't match any known variant for the sort being decoded.
    #[error("unknown {sort} tag: {tag}")]
    UnknownTag {
        /// The IR sort being decoded (`"EWord"`, `"Byte"`, `"Buf"`, `"Storage"`).
        sort: &'static str,
        /// The offending tag byte.
        tag: u8,
    },
    /// A length prefix claimed more bytes than remained in the input.
    #[error("length prefix {declared} exceeds remaining input ({remaining})")]
    LengthOutOfBounds {
        /// The declared length.
        declared: usize,
        /// The bytes actually remaining.
        remaining: usize,
    },
    /// A variable or abstract-leaf name was not valid UTF-8.
    #[error("leaf name is not valid UTF-8")]
    InvalidName,
    /// `JoinBytes` must carry exactly 32 byte children.
    #[error("JoinBytes requires exactly 32 children, found {0}")]
    BadJoinBytesArity(usize),
}
