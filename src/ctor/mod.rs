//! The smart-constructor layer: one function per opcode, folding to a
//! literal whenever every operand is literal and otherwise building the
//! matching symbolic node. See `spec.md` §4.1–§4.2.

pub mod byte;
pub mod word;
