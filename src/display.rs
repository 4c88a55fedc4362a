//! A minimal S-expression pretty-printer for the four IR sorts —
//! supplemental, not the disassembler-facing output explicitly excluded
//! from scope. Variant names come from `strum::IntoStaticStr` on the
//! `expr` enums rather than a hand-written name table, so the printer
//! can't drift out of sync with the algebra as variants are added.

use std::fmt;

use crate::expr::{Buf, Byte, EWord, Storage};

impl fmt::Display for EWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EWord::Lit(v) => write!(f, "0x{v:x}"),
            EWord::Var(name) => write!(f, "{name}"),
            EWord::Add(a, b) | EWord::Sub(a, b) | EWord::Mul(a, b) | EWord::Div(a, b) | EWord::SDiv(a, b)
            | EWord::Mod(a, b) | EWord::SMod(a, b) | EWord::Exp(a, b) | EWord::SEx(a, b) | EWord::Lt(a, b)
            | EWord::Gt(a, b) | EWord::LEq(a, b) | EWord::GEq(a, b) | EWord::SLt(a, b) | EWord::SGt(a, b)
            | EWord::Eq(a, b) | EWord::And(a, b) | EWord::Or(a, b) | EWord::Xor(a, b) | EWord::Shl(a, b)
            | EWord::Shr(a, b) | EWord::Sar(a, b) | EWord::Min(a, b) => {
                write!(f, "({} {a} {b})", opcode_name(self))
            }
            EWord::AddMod(a, b, c) | EWord::MulMod(a, b, c) => {
                write!(f, "({} {a} {b} {c})", opcode_name(self))
            }
            EWord::IsZero(a) | EWord::Not(a) => write!(f, "({} {a})", opcode_name(self)),
            EWord::ReadWord(idx, buf) => write!(f, "(readWord {idx} {buf})"),
            EWord::BufLength(buf) => write!(f, "(bufLength {buf})"),
            EWord::JoinBytes(children) => {
                write!(f, "(joinBytes")?;
                for child in children.iter() {
                    write!(f, " {child}")?;
                }
                write!(f, ")")
            }
            EWord::SLoad(key, store) => write!(f, "(sload {key} {store})"),
            EWord::EqByte(a, b) => write!(f, "(eqByte {a} {b})"),
        }
    }
}

fn opcode_name(w: &EWord) -> &'static str {
    let name: &'static str = w.into();
    name
}

impl fmt::Display for Byte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Byte::LitByte(v) => write!(f, "0x{v:02x}"),
            Byte::ReadByte(idx, buf) => write!(f, "(readByte {idx} {buf})"),
            Byte::IndexWord(idx, w) => write!(f, "(indexWord {idx} {w})"),
        }
    }
}

impl fmt::Display for Buf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Buf::EmptyBuf => write!(f, "EmptyBuf"),
            Buf::ConcreteBuf(bytes) => {
                write!(f, "0x")?;
                for b in bytes.iter() {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            Buf::AbstractBuf(name) => write!(f, "{name}"),
            Buf::WriteByte(off, byte, base) => write!(f, "(writeByte {off} {byte} {base})"),
            Buf::WriteWord(off, w, base) => write!(f, "(writeWord {off} {w} {base})"),
            Buf::CopySlice(dst_off, src_off, size, src, dst) => {
                write!(f, "(copySlice {src_off} {dst_off} {size} {src} {dst})")
            }
        }
    }
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Storage::EmptyStore => write!(f, "EmptyStore"),
            Storage::ConcreteStore(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "0x{k:x}: 0x{v:x}")?;
                }
                write!(f, "}}")
            }
            Storage::AbstractStore(name) => write!(f, "{name}"),
            Storage::SStore(key, val, base) => write!(f, "(sstore {key} {val} {base})"),
        }
    }
}
