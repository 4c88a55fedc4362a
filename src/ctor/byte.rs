//! Smart constructors that cross the `EWord`/`Byte` boundary: `indexWord`,
//! `joinBytes`, `padByte`, `eqByte` — `spec.md` §4.2.

use std::sync::Arc;

use crate::expr::{Byte, EWord};
use crate::word::U256;

/// `indexWord(idx, w)`: byte `idx` of word `w`, big-endian (byte 0 is most
/// significant). `idx >= 32` is always `0`, even when `idx` is itself a
/// literal but `w` is symbolic — this is the one piece of constant folding
/// that doesn't require *all* operands to be literal, because the bound
/// check alone decides the answer.
pub fn index_word(idx: EWord, w: EWord) -> Byte {
    let EWord::Lit(i) = idx else {
        return Byte::IndexWord(Arc::new(idx), Arc::new(w));
    };

    if i >= U256::from(32u64) {
        return Byte::LitByte(0);
    }
    let i = i.to::<usize>();

    match &w {
        EWord::Lit(word) => {
            let bytes = word.to_be_bytes::<32>();
            Byte::LitByte(bytes[i])
        }
        EWord::JoinBytes(children) => (*children[i]).clone(),
        _ => Byte::IndexWord(Arc::new(EWord::Lit(U256::from(i as u64))), Arc::new(w)),
    }
}

/// `joinBytes(bytes)`: left-pad to 32 bytes with `LitByte(0)`, then compose
/// big-endian. Folds to `Lit` iff every child is literal.
pub fn join_bytes(bytes: &[Byte]) -> EWord {
    use itertools::Itertools;

    assert!(bytes.len() <= 32, "joinBytes accepts at most 32 bytes");

    let pad = 32 - bytes.len();
    let children: Vec<Arc<Byte>> = std::iter::repeat(Byte::LitByte(0))
        .take(pad)
        .chain(bytes.iter().cloned())
        .map(Arc::new)
        .collect_vec();

    let mut all_lit = true;
    let mut buf = [0u8; 32];
    for (idx, b) in children.iter().enumerate() {
        match b.as_lit() {
            Some(v) => buf[idx] = v,
            None => {
                all_lit = false;
                break;
            }
        }
    }

    if all_lit {
        EWord::Lit(U256::from_be_bytes(buf))
    } else {
        let array: [Arc<Byte>; 32] = children
            .try_into()
            .unwrap_or_else(|_| unreachable!("exactly 32 children were built above"));
        EWord::JoinBytes(Box::new(array))
    }
}

/// `padByte(b)`: zero-extend a single byte into a word.
pub fn pad_byte(b: Byte) -> EWord {
    join_bytes(&[b])
}

/// `eqByte(x, y)`: `0`/`1` word result of comparing two bytes.
pub fn eq_byte(x: Byte, y: Byte) -> EWord {
    match (x.as_lit(), y.as_lit()) {
        (Some(a), Some(b)) => EWord::Lit(if a == b { U256::from(1u64) } else { U256::ZERO }),
        _ => EWord::EqByte(Arc::new(x), Arc::new(y)),
    }
}
