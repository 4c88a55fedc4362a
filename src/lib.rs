//! A symbolic expression algebra and partial-evaluation engine for an EVM
//! symbolic executor's core IR: 256-bit concrete arithmetic, four
//! recursive expression sorts (`EWord`, `Byte`, `Buf`, `Storage`), a
//! smart-constructor layer that folds literal operands to literals, and a
//! buffer/storage overlay engine that resolves reads through chains of
//! writes and copies.
//!
//! Every operation here is total and pure: no panics, no I/O, no mutable
//! global state. The one exception is [`storage::read_storage`], which
//! returns `None` when the answer depends on data outside this crate.

pub mod buffer;
pub mod codec;
pub mod consts;
pub mod ctor;
pub mod display;
pub mod error;
pub mod expr;
pub mod storage;
pub mod word;

/// Re-exports of the types and functions most callers reach for first.
pub mod prelude {
    pub use crate::buffer::{base, buf_length, copy_slice, read_byte, read_bytes, read_word, write_byte, write_word};
    pub use crate::ctor::byte::{eq_byte, index_word, join_bytes, pad_byte};
    pub use crate::ctor::word::{
        add_s, addmod_s, and_s, div_s, eq_s, exp_s, geq_s, gt_s, iszero_s, leq_s, lit_addr, lt_s, min_s, mod_s,
        mul_s, mulmod_s, not_s, or_s, sar_s, sdiv_s, sex_s, sgt_s, shl_s, shr_s, slt_s, smod_s, sub_s, xor_s,
    };
    pub use crate::error::DecodeError;
    pub use crate::expr::{Buf, Byte, EWord, Storage};
    pub use crate::storage::{read_storage, write_storage};
    pub use crate::word::U256;
}
