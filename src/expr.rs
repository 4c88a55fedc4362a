//! The four IR sorts: [`EWord`], [`Byte`], [`Buf`], [`Storage`].
//!
//! Nodes are immutable and linked with `Arc` so that "mutation" (building a
//! new overlay on top of an old one) is a cheap pointer-sharing operation —
//! see `spec.md` §3 and §9. Equality is `#[derive]`d, which makes it
//! structural: two `Arc`-wrapped subtrees compare equal whenever their
//! contents do, regardless of whether the `Arc`s point at the same
//! allocation.

use std::sync::Arc;

use crate::word::U256;

/// A 256-bit word: either a concrete literal or a node in the symbolic
/// expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EWord {
    Lit(U256),
    Var(Arc<str>),

    Add(Arc<EWord>, Arc<EWord>),
    Sub(Arc<EWord>, Arc<EWord>),
    Mul(Arc<EWord>, Arc<EWord>),
    Div(Arc<EWord>, Arc<EWord>),
    SDiv(Arc<EWord>, Arc<EWord>),
    Mod(Arc<EWord>, Arc<EWord>),
    SMod(Arc<EWord>, Arc<EWord>),
    AddMod(Arc<EWord>, Arc<EWord>, Arc<EWord>),
    MulMod(Arc<EWord>, Arc<EWord>, Arc<EWord>),
    Exp(Arc<EWord>, Arc<EWord>),
    SEx(Arc<EWord>, Arc<EWord>),

    Lt(Arc<EWord>, Arc<EWord>),
    Gt(Arc<EWord>, Arc<EWord>),
    LEq(Arc<EWord>, Arc<EWord>),
    GEq(Arc<EWord>, Arc<EWord>),
    SLt(Arc<EWord>, Arc<EWord>),
    SGt(Arc<EWord>, Arc<EWord>),
    Eq(Arc<EWord>, Arc<EWord>),
    IsZero(Arc<EWord>),

    And(Arc<EWord>, Arc<EWord>),
    Or(Arc<EWord>, Arc<EWord>),
    Xor(Arc<EWord>, Arc<EWord>),
    Not(Arc<EWord>),
    Shl(Arc<EWord>, Arc<EWord>),
    Shr(Arc<EWord>, Arc<EWord>),
    Sar(Arc<EWord>, Arc<EWord>),
    Min(Arc<EWord>, Arc<EWord>),

    /// A residual 32-byte read through a buffer overlay chain.
    ReadWord(Arc<EWord>, Arc<Buf>),
    /// The length of a buffer that couldn't be reduced to a literal.
    BufLength(Arc<Buf>),
    /// 32 byte children composed big-endian into a word.
    JoinBytes(Box<[Arc<Byte>; 32]>),

    /// A residual storage read through a write-log chain.
    SLoad(Arc<EWord>, Arc<Storage>),
    /// `0`/`1` result of comparing two byte children.
    EqByte(Arc<Byte>, Arc<Byte>),
}

/// An 8-bit value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Byte {
    LitByte(u8),
    /// A residual single-byte read through a buffer overlay chain.
    ReadByte(Arc<EWord>, Arc<Buf>),
    /// Byte `idx` of word `w` (big-endian, byte 0 most significant);
    /// `idx >= 32` is `0`.
    IndexWord(Arc<EWord>, Arc<EWord>),
}

/// A byte-indexed, infinite-on-the-right sequence. Indices beyond the
/// explicit bytes of a node read as `0x00`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Buf {
    EmptyBuf,
    ConcreteBuf(Arc<[u8]>),
    AbstractBuf(Arc<str>),
    WriteByte(Arc<EWord>, Arc<Byte>, Arc<Buf>),
    WriteWord(Arc<EWord>, Arc<EWord>, Arc<Buf>),
    /// `CopySlice(dst_off, src_off, size, src, dst)`: copy `size` bytes from
    /// `src[src_off..]` into `dst[dst_off..]`, leaving the rest of `dst`
    /// unchanged.
    CopySlice(Arc<EWord>, Arc<EWord>, Arc<EWord>, Arc<Buf>, Arc<Buf>),
}

/// A word-keyed, word-valued map with a distinguished "no prior write"
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Storage {
    EmptyStore,
    ConcreteStore(Arc<std::collections::BTreeMap<U256, U256>>),
    AbstractStore(Arc<str>),
    SStore(Arc<EWord>, Arc<EWord>, Arc<Storage>),
}

impl EWord {
    /// `true` iff this node is a `Lit` leaf.
    pub fn as_lit(&self) -> Option<U256> {
        match self {
            EWord::Lit(v) => Some(*v),
            _ => None,
        }
    }
}

impl Byte {
    pub fn as_lit(&self) -> Option<u8> {
        match self {
            Byte::LitByte(v) => Some(*v),
            _ => None,
        }
    }
}
