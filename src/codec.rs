//! Canonical binary (de)serialization for the four IR sorts — `spec.md` §6.
//!
//! One byte tag per variant followed by its fields in declaration order;
//! children are encoded depth-first. This is distinct from the optional
//! `serde` feature (`Cargo.toml`'s `serde` feature flag), which derives a
//! self-describing format suitable for JSON/etc.; this codec is the
//! crate's own fixed, dependency-free wire format, grounded in
//! `fuel-tx`'s length-prefixed canonical encoding convention as used
//! throughout `fuel-vm`.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::DecodeError;
use crate::expr::{Buf, Byte, EWord, Storage};
use crate::word::U256;

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Cursor { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize, ctx: &'static str) -> Result<&'a [u8], DecodeError> {
        let remaining = self.bytes.len() - self.pos;
        if remaining < n {
            return Err(DecodeError::UnexpectedEof(ctx));
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn u8(&mut self, ctx: &'static str) -> Result<u8, DecodeError> {
        Ok(self.take(1, ctx)?[0])
    }

    fn u32(&mut self, ctx: &'static str) -> Result<u32, DecodeError> {
        let b = self.take(4, ctx)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn u256(&mut self, ctx: &'static str) -> Result<U256, DecodeError> {
        let b = self.take(32, ctx)?;
        let array: [u8; 32] = b.try_into().expect("take(32) returns exactly 32 bytes");
        Ok(U256::from_be_bytes(array))
    }

    fn name(&mut self, ctx: &'static str) -> Result<Arc<str>, DecodeError> {
        let len = self.u32(ctx)? as usize;
        let remaining = self.bytes.len() - self.pos;
        if len > remaining {
            return Err(DecodeError::LengthOutOfBounds { declared: len, remaining });
        }
        let bytes = self.take(len, ctx)?;
        let s = std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidName)?;
        if s.is_empty() {
            return Err(DecodeError::InvalidName);
        }
        Ok(Arc::from(s))
    }

    fn bytes_vec(&mut self, ctx: &'static str) -> Result<Vec<u8>, DecodeError> {
        let len = self.u32(ctx)? as usize;
        let remaining = self.bytes.len() - self.pos;
        if len > remaining {
            return Err(DecodeError::LengthOutOfBounds { declared: len, remaining });
        }
        Ok(self.take(len, ctx)?.to_vec())
    }
}

fn push_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn push_name(out: &mut Vec<u8>, name: &str) {
    push_u32(out, name.len() as u32);
    out.extend_from_slice(name.as_bytes());
}

fn push_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    push_u32(out, bytes.len() as u32);
    out.extend_from_slice(bytes);
}

/// Encode an [`EWord`] into its canonical byte representation.
pub fn encode_word(w: &EWord, out: &mut Vec<u8>) {
    match w {
        EWord::Lit(v) => {
            out.push(0);
            out.extend_from_slice(&v.to_be_bytes::<32>());
        }
        EWord::Var(name) => {
            out.push(1);
            push_name(out, name);
        }
        EWord::Add(a, b) => encode_binop(2, a, b, out),
        EWord::Sub(a, b) => encode_binop(3, a, b, out),
        EWord::Mul(a, b) => encode_binop(4, a, b, out),
        EWord::Div(a, b) => encode_binop(5, a, b, out),
        EWord::SDiv(a, b) => encode_binop(6, a, b, out),
        EWord::Mod(a, b) => encode_binop(7, a, b, out),
        EWord::SMod(a, b) => encode_binop(8, a, b, out),
        EWord::AddMod(a, b, c) => encode_triop(9, a, b, c, out),
        EWord::MulMod(a, b, c) => encode_triop(10, a, b, c, out),
        EWord::Exp(a, b) => encode_binop(11, a, b, out),
        EWord::SEx(a, b) => encode_binop(12, a, b, out),
        EWord::Lt(a, b) => encode_binop(13, a, b, out),
        EWord::Gt(a, b) => encode_binop(14, a, b, out),
        EWord::LEq(a, b) => encode_binop(15, a, b, out),
        EWord::GEq(a, b) => encode_binop(16, a, b, out),
        EWord::SLt(a, b) => encode_binop(17, a, b, out),
        EWord::SGt(a, b) => encode_binop(18, a, b, out),
        EWord::Eq(a, b) => encode_binop(19, a, b, out),
        EWord::IsZero(a) => {
            out.push(20);
            encode_word(a, out);
        }
        EWord::And(a, b) => encode_binop(21, a, b, out),
        EWord::Or(a, b) => encode_binop(22, a, b, out),
        EWord::Xor(a, b) => encode_binop(23, a, b, out),
        EWord::Not(a) => {
            out.push(24);
            encode_word(a, out);
        }
        EWord::Shl(a, b) => encode_binop(25, a, b, out),
        EWord::Shr(a, b) => encode_binop(26, a, b, out),
        EWord::Sar(a, b) => encode_binop(27, a, b, out),
        EWord::Min(a, b) => encode_binop(28, a, b, out),
        EWord::ReadWord(idx, buf) => {
            out.push(29);
            encode_word(idx, out);
            encode_buf(buf, out);
        }
        EWord::BufLength(buf) => {
            out.push(30);
            encode_buf(buf, out);
        }
        EWord::JoinBytes(children) => {
            out.push(31);
            push_u32(out, children.len() as u32);
            for child in children.iter() {
                encode_byte(child, out);
            }
        }
        EWord::SLoad(key, store) => {
            out.push(32);
            encode_word(key, out);
            encode_storage(store, out);
        }
        EWord::EqByte(a, b) => {
            out.push(33);
            encode_byte(a, out);
            encode_byte(b, out);
        }
    }
}

fn encode_binop(tag: u8, a: &EWord, b: &EWord, out: &mut Vec<u8>) {
    out.push(tag);
    encode_word(a, out);
    encode_word(b, out);
}

fn encode_triop(tag: u8, a: &EWord, b: &EWord, c: &EWord, out: &mut Vec<u8>) {
    out.push(tag);
    encode_word(a, out);
    encode_word(b, out);
    encode_word(c, out);
}

/// Decode an [`EWord`] previously written by [`encode_word`].
pub fn decode_word(cur_bytes: &[u8]) -> Result<EWord, DecodeError> {
    let mut cursor = Cursor::new(cur_bytes);
    decode_word_at(&mut cursor)
}

fn decode_word_at(c: &mut Cursor) -> Result<EWord, DecodeError> {
    let tag = c.u8("EWord tag")?;
    Ok(match tag {
        0 => EWord::Lit(c.u256("EWord::Lit")?),
        1 => EWord::Var(c.name("EWord::Var")?),
        2 => binop_word(c, EWord::Add)?,
        3 => binop_word(c, EWord::Sub)?,
        4 => binop_word(c, EWord::Mul)?,
        5 => binop_word(c, EWord::Div)?,
        6 => binop_word(c, EWord::SDiv)?,
        7 => binop_word(c, EWord::Mod)?,
        8 => binop_word(c, EWord::SMod)?,
        9 => triop_word(c, EWord::AddMod)?,
        10 => triop_word(c, EWord::MulMod)?,
        11 => binop_word(c, EWord::Exp)?,
        12 => binop_word(c, EWord::SEx)?,
        13 => binop_word(c, EWord::Lt)?,
        14 => binop_word(c, EWord::Gt)?,
        15 => binop_word(c, EWord::LEq)?,
        16 => binop_word(c, EWord::GEq)?,
        17 => binop_word(c, EWord::SLt)?,
        18 => binop_word(c, EWord::SGt)?,
        19 => binop_word(c, EWord::Eq)?,
        20 => EWord::IsZero(Arc::new(decode_word_at(c)?)),
        21 => binop_word(c, EWord::And)?,
        22 => binop_word(c, EWord::Or)?,
        23 => binop_word(c, EWord::Xor)?,
        24 => EWord::Not(Arc::new(decode_word_at(c)?)),
        25 => binop_word(c, EWord::Shl)?,
        26 => binop_word(c, EWord::Shr)?,
        27 => binop_word(c, EWord::Sar)?,
        28 => binop_word(c, EWord::Min)?,
        29 => {
            let idx = decode_word_at(c)?;
            let buf = decode_buf_at(c)?;
            EWord::ReadWord(Arc::new(idx), Arc::new(buf))
        }
        30 => EWord::BufLength(Arc::new(decode_buf_at(c)?)),
        31 => {
            let count = c.u32("EWord::JoinBytes arity")? as usize;
            if count != 32 {
                return Err(DecodeError::BadJoinBytesArity(count));
            }
            let mut children: Vec<Arc<Byte>> = Vec::with_capacity(32);
            for _ in 0..32 {
                children.push(Arc::new(decode_byte_at(c)?));
            }
            let array: [Arc<Byte>; 32] = children
                .try_into()
                .unwrap_or_else(|_| unreachable!("count was checked to be 32 above"));
            EWord::JoinBytes(Box::new(array))
        }
        32 => {
            let key = decode_word_at(c)?;
            let store = decode_storage_at(c)?;
            EWord::SLoad(Arc::new(key), Arc::new(store))
        }
        33 => {
            let a = decode_byte_at(c)?;
            let b = decode_byte_at(c)?;
            EWord::EqByte(Arc::new(a), Arc::new(b))
        }
        other => return Err(DecodeError::UnknownTag { sort: "EWord", tag: other }),
    })
}

fn binop_word(c: &mut Cursor, f: fn(Arc<EWord>, Arc<EWord>) -> EWord) -> Result<EWord, DecodeError> {
    let a = decode_word_at(c)?;
    let b = decode_word_at(c)?;
    Ok(f(Arc::new(a), Arc::new(b)))
}

fn triop_word(c: &mut Cursor, f: fn(Arc<EWord>, Arc<EWord>, Arc<EWord>) -> EWord) -> Result<EWord, DecodeError> {
    let a = decode_word_at(c)?;
    let b = decode_word_at(c)?;
    let d = decode_word_at(c)?;
    Ok(f(Arc::new(a), Arc::new(b), Arc::new(d)))
}

/// Encode a [`Byte`].
pub fn encode_byte(b: &Byte, out: &mut Vec<u8>) {
    match b {
        Byte::LitByte(v) => {
            out.push(0);
            out.push(*v);
        }
        Byte::ReadByte(idx, buf) => {
            out.push(1);
            encode_word(idx, out);
            encode_buf(buf, out);
        }
        Byte::IndexWord(idx, w) => {
            out.push(2);
            encode_word(idx, out);
            encode_word(w, out);
        }
    }
}

fn decode_byte_at(c: &mut Cursor) -> Result<Byte, DecodeError> {
    let tag = c.u8("Byte tag")?;
    Ok(match tag {
        0 => Byte::LitByte(c.u8("Byte::LitByte")?),
        1 => {
            let idx = decode_word_at(c)?;
            let buf = decode_buf_at(c)?;
            Byte::ReadByte(Arc::new(idx), Arc::new(buf))
        }
        2 => {
            let idx = decode_word_at(c)?;
            let w = decode_word_at(c)?;
            Byte::IndexWord(Arc::new(idx), Arc::new(w))
        }
        other => return Err(DecodeError::UnknownTag { sort: "Byte", tag: other }),
    })
}

/// Encode a [`Buf`].
pub fn encode_buf(buf: &Buf, out: &mut Vec<u8>) {
    match buf {
        Buf::EmptyBuf => out.push(0),
        Buf::ConcreteBuf(bytes) => {
            out.push(1);
            push_bytes(out, bytes);
        }
        Buf::AbstractBuf(name) => {
            out.push(2);
            push_name(out, name);
        }
        Buf::WriteByte(off, byte, base) => {
            out.push(3);
            encode_word(off, out);
            encode_byte(byte, out);
            encode_buf(base, out);
        }
        Buf::WriteWord(off, w, base) => {
            out.push(4);
            encode_word(off, out);
            encode_word(w, out);
            encode_buf(base, out);
        }
        Buf::CopySlice(dst_off, src_off, size, src, dst) => {
            out.push(5);
            encode_word(dst_off, out);
            encode_word(src_off, out);
            encode_word(size, out);
            encode_buf(src, out);
            encode_buf(dst, out);
        }
    }
}

/// Decode a [`Buf`] previously written by [`encode_buf`].
pub fn decode_buf(bytes: &[u8]) -> Result<Buf, DecodeError> {
    let mut cursor = Cursor::new(bytes);
    decode_buf_at(&mut cursor)
}

fn decode_buf_at(c: &mut Cursor) -> Result<Buf, DecodeError> {
    let tag = c.u8("Buf tag")?;
    Ok(match tag {
        0 => Buf::EmptyBuf,
        1 => Buf::ConcreteBuf(c.bytes_vec("Buf::ConcreteBuf")?.into()),
        2 => Buf::AbstractBuf(c.name("Buf::AbstractBuf")?),
        3 => {
            let off = decode_word_at(c)?;
            let byte = decode_byte_at(c)?;
            let base = decode_buf_at(c)?;
            Buf::WriteByte(Arc::new(off), Arc::new(byte), Arc::new(base))
        }
        4 => {
            let off = decode_word_at(c)?;
            let w = decode_word_at(c)?;
            let base = decode_buf_at(c)?;
            Buf::WriteWord(Arc::new(off), Arc::new(w), Arc::new(base))
        }
        5 => {
            let dst_off = decode_word_at(c)?;
            let src_off = decode_word_at(c)?;
            let size = decode_word_at(c)?;
            let src = decode_buf_at(c)?;
            let dst = decode_buf_at(c)?;
            Buf::CopySlice(Arc::new(dst_off), Arc::new(src_off), Arc::new(size), Arc::new(src), Arc::new(dst))
        }
        other => return Err(DecodeError::UnknownTag { sort: "Buf", tag: other }),
    })
}

/// Encode a [`Storage`].
pub fn encode_storage(store: &Storage, out: &mut Vec<u8>) {
    match store {
        Storage::EmptyStore => out.push(0),
        Storage::ConcreteStore(map) => {
            out.push(1);
            push_u32(out, map.len() as u32);
            for (k, v) in map.iter() {
                out.extend_from_slice(&k.to_be_bytes::<32>());
                out.extend_from_slice(&v.to_be_bytes::<32>());
            }
        }
        Storage::AbstractStore(name) => {
            out.push(2);
            push_name(out, name);
        }
        Storage::SStore(key, val, base) => {
            out.push(3);
            encode_word(key, out);
            encode_word(val, out);
            encode_storage(base, out);
        }
    }
}

/// Decode a [`Storage`] previously written by [`encode_storage`].
pub fn decode_storage(bytes: &[u8]) -> Result<Storage, DecodeError> {
    let mut cursor = Cursor::new(bytes);
    decode_storage_at(&mut cursor)
}

fn decode_storage_at(c: &mut Cursor) -> Result<Storage, DecodeError> {
    let tag = c.u8("Storage tag")?;
    Ok(match tag {
        0 => Storage::EmptyStore,
        1 => {
            let count = c.u32("Storage::ConcreteStore count")? as usize;
            let mut map = BTreeMap::new();
            for _ in 0..count {
                let k = c.u256("Storage::ConcreteStore key")?;
                let v = c.u256("Storage::ConcreteStore value")?;
                map.insert(k, v);
            }
            Storage::ConcreteStore(Arc::new(map))
        }
        2 => Storage::AbstractStore(c.name("Storage::AbstractStore")?),
        3 => {
            let key = decode_word_at(c)?;
            let val = decode_word_at(c)?;
            let base = decode_storage_at(c)?;
            Storage::SStore(Arc::new(key), Arc::new(val), Arc::new(base))
        }
        other => return Err(DecodeError::UnknownTag { sort: "Storage", tag: other }),
    })
}
