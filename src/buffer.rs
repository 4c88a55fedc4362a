//! The buffer overlay engine — `spec.md` §4.3, the hardest part of the
//! algebra. `readByte` walks an overlay chain top-down, at each layer
//! resolving only the minimum information needed to know whether the read
//! falls inside that layer's write region; when it's outside, the layer is
//! skipped entirely.
//!
//! Grounded in `fuel-vm/src/interpreter/memory.rs`'s `MemoryRange` /
//! `has_ownership_range` style of "decide inside-vs-outside from bounds
//! before touching bytes" — generalized here from one flat mutable buffer
//! to an immutable chain of overlays.

use std::sync::Arc;

use crate::ctor::byte::index_word;
use crate::expr::{Buf, Byte, EWord};
use crate::word::U256;

/// Read one byte, walking the overlay chain iteratively (never via Rust
/// recursion on the chain itself) so that arbitrarily deep write/copy
/// stacks can't blow the call stack — `spec.md` §5, §9.
pub fn read_byte(idx: &EWord, buf: &Buf) -> Byte {
    let mut idx = idx.clone();
    let mut buf = buf.clone();

    loop {
        match &buf {
            Buf::EmptyBuf => return Byte::LitByte(0),

            Buf::ConcreteBuf(bytes) => {
                return match &idx {
                    EWord::Lit(i) => {
                        if *i < U256::from(bytes.len() as u64) {
                            Byte::LitByte(bytes[i.to::<usize>()])
                        } else {
                            Byte::LitByte(0)
                        }
                    }
                    _ => Byte::ReadByte(Arc::new(idx), Arc::new(buf.clone())),
                };
            }

            Buf::AbstractBuf(name) => {
                tracing::trace!(buf = %name, "readByte against an abstract buffer, emitting residual");
                return Byte::ReadByte(Arc::new(idx), Arc::new(buf.clone()));
            }

            Buf::WriteByte(j, v, base) => match (&idx, j.as_ref()) {
                (EWord::Lit(i), EWord::Lit(jv)) if i == jv => return (**v).clone(),
                (EWord::Lit(_), EWord::Lit(_)) => {
                    buf = (**base).clone();
                }
                _ => return Byte::ReadByte(Arc::new(idx), Arc::new(buf.clone())),
            },

            Buf::WriteWord(j, v, base) => match (&idx, j.as_ref()) {
                (EWord::Lit(i), EWord::Lit(jv)) if *jv <= *i && *i < jv.wrapping_add(U256::from(32u64)) => {
                    let offset = EWord::Lit(i.wrapping_sub(*jv));
                    return index_word(offset, (**v).clone());
                }
                (EWord::Lit(_), EWord::Lit(_)) => {
                    buf = (**base).clone();
                }
                _ => return Byte::ReadByte(Arc::new(idx), Arc::new(buf.clone())),
            },

            Buf::CopySlice(dst_off, src_off, size, src, dst) => {
                let EWord::Lit(i) = idx.clone() else {
                    return Byte::ReadByte(Arc::new(idx), Arc::new(buf.clone()));
                };

                match (dst_off.as_ref(), src_off.as_ref(), size.as_ref()) {
                    (EWord::Lit(d), EWord::Lit(s), EWord::Lit(n)) => {
                        if *d <= i && i < d.wrapping_add(*n) {
                            idx = EWord::Lit(i.wrapping_sub(*d).wrapping_add(*s));
                            buf = (**src).clone();
                        } else {
                            buf = (**dst).clone();
                        }
                    }
                    // case 6: sOff or src symbolic, dOff and size literal
                    (EWord::Lit(d), _, EWord::Lit(n)) => {
                        if i < *d || i >= d.wrapping_add(*n) {
                            buf = (**dst).clone();
                        } else {
                            return Byte::ReadByte(Arc::new(idx), Arc::new(buf.clone()));
                        }
                    }
                    // case 7: size symbolic, dOff literal
                    (EWord::Lit(d), _, _) => {
                        if i < *d {
                            buf = (**dst).clone();
                        } else {
                            return Byte::ReadByte(Arc::new(idx), Arc::new(buf.clone()));
                        }
                    }
                    _ => return Byte::ReadByte(Arc::new(idx), Arc::new(buf.clone())),
                }
            }
        }
    }
}

/// `readBytes(n, idx, buf)`: `n <= 32` consecutive bytes from `idx`,
/// left-zero-padded into a word. Folds to `Lit` iff every byte is literal;
/// otherwise a `JoinBytes` node (distinct from `readWord`'s own residual,
/// which is always the dedicated `ReadWord` node — `spec.md` §4.3).
pub fn read_bytes(n: usize, idx: &EWord, buf: &Buf) -> EWord {
    assert!(n <= 32, "readBytes accepts at most 32 bytes");

    let positions: Vec<Byte> = (0..n)
        .map(|k| {
            let offset_idx = match idx {
                EWord::Lit(i) => EWord::Lit(i.wrapping_add(U256::from(k as u64))),
                other => crate::ctor::word::add_s(other.clone(), EWord::Lit(U256::from(k as u64))),
            };
            read_byte(&offset_idx, buf)
        })
        .collect();

    crate::ctor::byte::join_bytes(&positions)
}

/// `readWord(idx, buf)`: 32 bytes from `idx`. Symbolic `idx` is always a
/// residual `ReadWord` node, even if every byte *would* happen to read as
/// literal — per `spec.md` §4.3 this case never attempts the byte walk.
pub fn read_word(idx: &EWord, buf: &Buf) -> EWord {
    let EWord::Lit(i) = idx else {
        return EWord::ReadWord(Arc::new(idx.clone()), Arc::new(buf.clone()));
    };

    // Shortcut: a word read landing exactly on a `WriteWord` recovers that
    // value directly, even when it's symbolic — the byte walk below can
    // only ever recover literal bytes, so without this it would miss
    // `readWord(Lit 0, writeWord(Lit 0, v, EmptyBuf)) = v` for symbolic `v`.
    if let Buf::WriteWord(j, v, _) = buf {
        if let EWord::Lit(jv) = j.as_ref() {
            if jv == i {
                return (**v).clone();
            }
        }
    }

    let mut out = [0u8; 32];
    for (k, slot) in out.iter_mut().enumerate() {
        let byte_idx = EWord::Lit(i.wrapping_add(U256::from(k as u64)));
        match read_byte(&byte_idx, buf) {
            Byte::LitByte(v) => *slot = v,
            _ => return EWord::ReadWord(Arc::new(idx.clone()), Arc::new(buf.clone())),
        }
    }

    EWord::Lit(U256::from_be_bytes(out))
}

/// `writeByte(off, byte, buf)`.
pub fn write_byte(off: EWord, byte: Byte, buf: Buf) -> Buf {
    if let (EWord::Lit(o), Byte::LitByte(b), Buf::ConcreteBuf(s)) = (&off, &byte, &buf) {
        let o = o.to::<usize>();
        let mut out = s.to_vec();
        if out.len() <= o {
            out.resize(o.wrapping_add(1), 0);
        }
        out[o] = *b;
        return Buf::ConcreteBuf(out.into());
    }

    Buf::WriteByte(Arc::new(off), Arc::new(byte), Arc::new(buf))
}

/// `writeWord(off, w, buf)`.
pub fn write_word(off: EWord, w: EWord, buf: Buf) -> Buf {
    if let (EWord::Lit(o), EWord::Lit(v), Buf::ConcreteBuf(s)) = (&off, &w, &buf) {
        let o = o.to::<usize>();
        let word_bytes = v.to_be_bytes::<32>();
        let mut out = s.to_vec();
        let end = o.wrapping_add(32);
        if out.len() < end {
            out.resize(end, 0);
        }
        out[o..end].copy_from_slice(&word_bytes);
        return Buf::ConcreteBuf(out.into());
    }

    Buf::WriteWord(Arc::new(off), Arc::new(w), Arc::new(buf))
}

fn take_padded(bytes: &[u8], start: usize, len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    if start < bytes.len() {
        let avail = (bytes.len() - start).min(len);
        out[..avail].copy_from_slice(&bytes[start..start + avail]);
    }
    out
}

/// `copySlice(srcOff, dstOff, size, src, dst)` — `spec.md` §4.3.
pub fn copy_slice(src_off: EWord, dst_off: EWord, size: EWord, src: Buf, dst: Buf) -> Buf {
    // Case 1.
    if matches!((&src, &dst), (Buf::EmptyBuf, Buf::EmptyBuf)) {
        return Buf::EmptyBuf;
    }

    // Case 2.
    if let (Buf::EmptyBuf, Buf::ConcreteBuf(d)) = (&src, &dst) {
        return Buf::ConcreteBuf(d.clone());
    }

    if let (EWord::Lit(s_off), EWord::Lit(d_off), EWord::Lit(sz)) = (&src_off, &dst_off, &size) {
        let s_off = s_off.to::<usize>();
        let d_off = d_off.to::<usize>();
        let sz = sz.to::<usize>();

        // Case 3.
        if let (Buf::ConcreteBuf(s), Buf::EmptyBuf) = (&src, &dst) {
            let mut out = vec![0u8; d_off];
            out.extend(take_padded(s, s_off, sz));
            return Buf::ConcreteBuf(out.into());
        }

        // Case 4.
        if let (Buf::ConcreteBuf(s), Buf::ConcreteBuf(d)) = (&src, &dst) {
            let slice = take_padded(s, s_off, sz);
            let mut out = d.to_vec();
            let end = d_off + sz;
            if out.len() < end {
                out.resize(end, 0);
            }
            out[d_off..end].copy_from_slice(&slice);
            return Buf::ConcreteBuf(out.into());
        }

        // Case 5: dst concrete, src symbolic but the window folds to literal bytes anyway.
        if let Buf::ConcreteBuf(d) = &dst {
            let mut resolved = Vec::with_capacity(sz);
            for i in 0..sz {
                let src_idx = EWord::Lit(U256::from((s_off + i) as u64));
                match read_byte(&src_idx, &src) {
                    Byte::LitByte(v) => resolved.push(v),
                    _ => break,
                }
            }
            if resolved.len() == sz {
                let mut out = d.to_vec();
                let end = d_off + sz;
                if out.len() < end {
                    out.resize(end, 0);
                }
                out[d_off..end].copy_from_slice(&resolved);
                return Buf::ConcreteBuf(out.into());
            }
        }
    }

    // Case 6.
    tracing::trace!("copySlice could not fold to a concrete buffer, emitting residual node");
    Buf::CopySlice(Arc::new(dst_off), Arc::new(src_off), Arc::new(size), Arc::new(src), Arc::new(dst))
}

/// `bufLength(buf)`.
pub fn buf_length(buf: &Buf) -> EWord {
    match buf {
        Buf::EmptyBuf => EWord::Lit(U256::ZERO),
        Buf::ConcreteBuf(b) => EWord::Lit(U256::from(b.len() as u64)),
        other => EWord::BufLength(Arc::new(other.clone())),
    }
}

/// `base(buf)`: peel `WriteByte`/`WriteWord` overlays and follow `dst`
/// through `CopySlice`, exposing the underlying `EmptyBuf` / `ConcreteBuf`
/// / `AbstractBuf`.
pub fn base(buf: &Buf) -> Buf {
    let mut cur = buf.clone();
    loop {
        cur = match cur {
            Buf::WriteByte(_, _, b) => (*b).clone(),
            Buf::WriteWord(_, _, b) => (*b).clone(),
            Buf::CopySlice(_, _, _, _, dst) => (*dst).clone(),
            terminal => return terminal,
        };
    }
}
