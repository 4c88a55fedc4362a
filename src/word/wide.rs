//! A restricted 512-bit scratch value, used only to compute `addmod`/`mulmod`
//! without truncating the intermediate sum/product before reducing modulo
//! the third operand. Not a general bignum type — see `spec.md` §9.

use super::U256;

/// A 512-bit unsigned value as two 256-bit limbs, `hi` most significant.
#[derive(Clone, Copy)]
struct U512 {
    hi: U256,
    lo: U256,
}

impl U512 {
    fn bit(&self, index: usize) -> bool {
        if index >= 256 {
            self.hi.bit(index - 256)
        } else {
            self.lo.bit(index)
        }
    }

    /// Reduce modulo `m` (`m` must be nonzero) via binary long division,
    /// tracking the implicit 257th bit of the running remainder explicitly
    /// rather than widening the remainder's storage.
    fn rem_u256(self, m: U256) -> U256 {
        let mut rem = U256::ZERO;
        let mut rem_overflow = false;

        for i in (0..512).rev() {
            let carry_out = rem.bit(255);
            rem <<= 1;
            if self.bit(i) {
                rem |= U256::from(1u64);
            }
            rem_overflow = rem_overflow || carry_out;

            if rem_overflow || rem >= m {
                rem = rem.wrapping_sub(m);
                rem_overflow = false;
            }
        }

        rem
    }
}

/// 256x256 -> 512 schoolbook multiplication over `u64` limbs.
fn widening_mul(a: U256, b: U256) -> U512 {
    let a = a.as_limbs();
    let b = b.as_limbs();
    let mut out = [0u64; 8];

    for (i, &ai) in a.iter().enumerate() {
        let mut carry: u128 = 0;
        for (j, &bj) in b.iter().enumerate() {
            let idx = i + j;
            let product = (ai as u128) * (bj as u128) + (out[idx] as u128) + carry;
            out[idx] = product as u64;
            carry = product >> 64;
        }
        let mut k = i + b.len();
        while carry != 0 {
            let sum = out[k] as u128 + carry;
            out[k] = sum as u64;
            carry = sum >> 64;
            k += 1;
        }
    }

    let lo = U256::from_limbs([out[0], out[1], out[2], out[3]]);
    let hi = U256::from_limbs([out[4], out[5], out[6], out[7]]);
    U512 { hi, lo }
}

/// `(x + y) mod z`, computed without truncating `x + y` to 256 bits first.
/// Returns `0` when `z == 0`.
pub(crate) fn addmod_wide(x: U256, y: U256, z: U256) -> U256 {
    if z.is_zero() {
        return U256::ZERO;
    }

    let (lo, carried) = x.overflowing_add(y);
    let hi = if carried { U256::from(1u64) } else { U256::ZERO };
    U512 { hi, lo }.rem_u256(z)
}

/// `(x * y) mod z`, computed without truncating `x * y` to 256 bits first.
/// Returns `0` when `z == 0`.
pub(crate) fn mulmod_wide(x: U256, y: U256, z: U256) -> U256 {
    if z.is_zero() {
        return U256::ZERO;
    }

    widening_mul(x, y).rem_u256(z)
}
