//! Integration tests for the buffer overlay engine: read/write and
//! copy-slice behavior as seen from outside the crate, plus the
//! "can't-resolve-statically" residual paths.

use evm_symbolic_core::prelude::*;
use std::sync::Arc;

fn concrete(bytes: &[u8]) -> Buf {
    Buf::ConcreteBuf(Arc::from(bytes))
}

#[test]
fn write_byte_then_read_same_offset_round_trips() {
    let buf = write_byte(EWord::Lit(U256::from(3u64)), Byte::LitByte(0x7f), Buf::EmptyBuf);
    assert_eq!(read_byte(&EWord::Lit(U256::from(3u64)), &buf), Byte::LitByte(0x7f));
}

#[test]
fn write_word_then_read_byte_out_of_window_falls_through() {
    let buf = write_word(EWord::Lit(U256::from(10u64)), EWord::Lit(U256::from(0xAAu64)), concrete(&[1; 64]));
    assert_eq!(read_byte(&EWord::Lit(U256::from(5u64)), &buf), Byte::LitByte(1));
    assert_eq!(read_byte(&EWord::Lit(U256::from(41u64)), &buf), Byte::LitByte(0xAA));
}

#[test]
fn copy_slice_preserves_untouched_destination_region() {
    let src = concrete(&[9, 9, 9, 9]);
    let dst = concrete(&[1, 2, 3, 4, 5, 6]);
    let result = copy_slice(EWord::Lit(U256::ZERO), EWord::Lit(U256::from(2u64)), EWord::Lit(U256::from(2u64)), src, dst);
    assert_eq!(result, concrete(&[1, 2, 9, 9, 5, 6]));
}

#[test]
fn copy_slice_identity_reproduces_source_buffer() {
    let src = concrete(&[10, 20, 30]);
    let len = buf_length(&src);
    let result = copy_slice(EWord::Lit(U256::ZERO), EWord::Lit(U256::ZERO), len, src.clone(), Buf::EmptyBuf);
    assert_eq!(result, src);
}

#[test]
fn symbolic_offset_copy_slice_stays_residual() {
    let src = concrete(&[1, 2, 3]);
    let off = EWord::Var(Arc::from("off"));
    let result = copy_slice(off, EWord::Lit(U256::ZERO), EWord::Lit(U256::from(1u64)), src, Buf::EmptyBuf);
    assert!(matches!(result, Buf::CopySlice(..)));
}

#[test]
fn abstract_buf_read_is_always_residual() {
    let buf = Buf::AbstractBuf(Arc::from("calldata"));
    let result = read_byte(&EWord::Lit(U256::ZERO), &buf);
    assert!(matches!(result, Byte::ReadByte(_, _)));
}

#[test]
fn read_word_with_symbolic_index_never_attempts_the_byte_walk() {
    let buf = concrete(&[0xFF; 32]);
    let idx = EWord::Var(Arc::from("i"));
    let result = read_word(&idx, &buf);
    assert!(matches!(result, EWord::ReadWord(_, _)));
}

#[test]
fn buf_length_is_exact_for_concrete_buffers_and_symbolic_otherwise() {
    assert_eq!(buf_length(&concrete(&[1, 2, 3, 4])), EWord::Lit(U256::from(4u64)));
    let abstract_buf = Buf::AbstractBuf(Arc::from("returndata"));
    assert!(matches!(buf_length(&abstract_buf), EWord::BufLength(_)));
}

#[test]
fn base_of_a_copy_slice_chain_is_the_underlying_destination() {
    let dst_root = Buf::AbstractBuf(Arc::from("memory"));
    let overlaid = copy_slice(
        EWord::Var(Arc::from("soff")),
        EWord::Var(Arc::from("doff")),
        EWord::Var(Arc::from("sz")),
        concrete(&[1, 2, 3]),
        dst_root.clone(),
    );
    assert_eq!(base(&overlaid), dst_root);
}

#[test]
fn reading_past_the_end_of_a_concrete_buffer_is_zero() {
    let buf = concrete(&[1, 2, 3]);
    assert_eq!(read_byte(&EWord::Lit(U256::from(1000u64)), &buf), Byte::LitByte(0));
}
