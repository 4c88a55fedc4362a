//! Concrete 256-bit arithmetic, per `spec.md` §4.1. Every function here is
//! total: division and modulus by zero return `0`, shifts by `>= 256`
//! return `0`, and nothing panics.

use super::{addmod_wide, mulmod_wide, U256};

fn is_negative(x: U256) -> bool {
    x.bit(255)
}

fn two_complement_neg(x: U256) -> U256 {
    (!x).wrapping_add(U256::from(1u64))
}

fn abs_unsigned(x: U256) -> U256 {
    if is_negative(x) {
        two_complement_neg(x)
    } else {
        x
    }
}

pub fn add(x: U256, y: U256) -> U256 {
    x.wrapping_add(y)
}

pub fn sub(x: U256, y: U256) -> U256 {
    x.wrapping_sub(y)
}

pub fn mul(x: U256, y: U256) -> U256 {
    x.wrapping_mul(y)
}

pub fn div(x: U256, y: U256) -> U256 {
    if y.is_zero() {
        U256::ZERO
    } else {
        x / y
    }
}

/// Signed, truncated-towards-zero division. `min_int / -1 == min_int`.
pub fn sdiv(x: U256, y: U256) -> U256 {
    if y.is_zero() {
        return U256::ZERO;
    }

    let min_int = U256::from(1u64) << 255;
    let neg_one = two_complement_neg(U256::from(1u64));
    if x == min_int && y == neg_one {
        return min_int;
    }

    let x_neg = is_negative(x);
    let y_neg = is_negative(y);
    let q = abs_unsigned(x) / abs_unsigned(y);

    if x_neg != y_neg {
        two_complement_neg(q)
    } else {
        q
    }
}

pub fn rem(x: U256, y: U256) -> U256 {
    if y.is_zero() {
        U256::ZERO
    } else {
        x % y
    }
}

/// Signed remainder; the result takes the sign of the dividend.
pub fn smod(x: U256, y: U256) -> U256 {
    if y.is_zero() {
        return U256::ZERO;
    }

    let x_neg = is_negative(x);
    let r = abs_unsigned(x) % abs_unsigned(y);

    if x_neg {
        two_complement_neg(r)
    } else {
        r
    }
}

pub fn addmod(x: U256, y: U256, z: U256) -> U256 {
    addmod_wide(x, y, z)
}

pub fn mulmod(x: U256, y: U256, z: U256) -> U256 {
    mulmod_wide(x, y, z)
}

pub fn exp(base: U256, exponent: U256) -> U256 {
    let mut base = base;
    let mut exponent = exponent;
    let mut result = U256::from(1u64);

    while !exponent.is_zero() {
        if exponent.bit(0) {
            result = result.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exponent >>= 1;
    }

    result
}

/// Sign-extend `x` treating it as a `(k+1)`-byte signed integer. `k >= 31`
/// is the identity.
pub fn sex(k: U256, x: U256) -> U256 {
    if k >= U256::from(31u64) {
        return x;
    }

    let k = k.to::<usize>();
    let sign_bit_index = k * 8 + 7;

    if x.bit(sign_bit_index) {
        let mask = U256::MAX << (sign_bit_index + 1);
        x | mask
    } else {
        let mask = (U256::from(1u64) << (sign_bit_index + 1)) - U256::from(1u64);
        x & mask
    }
}

fn bool_word(b: bool) -> U256 {
    if b {
        U256::from(1u64)
    } else {
        U256::ZERO
    }
}

pub fn lt(x: U256, y: U256) -> U256 {
    bool_word(x < y)
}

pub fn gt(x: U256, y: U256) -> U256 {
    bool_word(x > y)
}

pub fn leq(x: U256, y: U256) -> U256 {
    bool_word(x <= y)
}

pub fn geq(x: U256, y: U256) -> U256 {
    bool_word(x >= y)
}

pub fn eq(x: U256, y: U256) -> U256 {
    bool_word(x == y)
}

pub fn iszero(x: U256) -> U256 {
    bool_word(x.is_zero())
}

/// Two's-complement preserves relative order within a sign class, so a
/// same-sign comparison can fall through to the unsigned comparison.
pub fn slt(x: U256, y: U256) -> U256 {
    let (xn, yn) = (is_negative(x), is_negative(y));
    bool_word(match (xn, yn) {
        (true, false) => true,
        (false, true) => false,
        _ => x < y,
    })
}

pub fn sgt(x: U256, y: U256) -> U256 {
    slt(y, x)
}

pub fn and(x: U256, y: U256) -> U256 {
    x & y
}

pub fn or(x: U256, y: U256) -> U256 {
    x | y
}

pub fn xor(x: U256, y: U256) -> U256 {
    x ^ y
}

pub fn not(x: U256) -> U256 {
    !x
}

pub fn shl(n: U256, x: U256) -> U256 {
    if n >= U256::from(256u64) {
        U256::ZERO
    } else {
        x << n.to::<usize>()
    }
}

pub fn shr(n: U256, x: U256) -> U256 {
    if n >= U256::from(256u64) {
        U256::ZERO
    } else {
        x >> n.to::<usize>()
    }
}

/// Arithmetic right shift: sign-preserving, distinct from `shr`.
pub fn sar(n: U256, x: U256) -> U256 {
    if n >= U256::from(256u64) {
        return if is_negative(x) { U256::MAX } else { U256::ZERO };
    }

    let n = n.to::<usize>();
    if n == 0 {
        return x;
    }

    let shifted = x >> n;
    if is_negative(x) {
        let mask = U256::MAX << (256 - n);
        shifted | mask
    } else {
        shifted
    }
}

pub fn min(x: U256, y: U256) -> U256 {
    if x < y {
        x
    } else {
        y
    }
}
