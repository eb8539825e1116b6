use ruint::aliases::{U256, U512};

use crate::error::{MathError, MathResult};

/// Zero-extends a 256-bit value into 512 bits.
#[inline]
pub fn widen(x: U256) -> U512 {
    let mut limbs = [0u64; 8];
    limbs[..4].copy_from_slice(x.as_limbs());
    U512::from_limbs(limbs)
}

/// Truncates back to 256 bits, failing if any high limb is set.
#[inline]
pub fn narrow(x: U512) -> MathResult<U256> {
    let limbs = x.as_limbs();
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return Err(MathError::ArithmeticOverflow);
    }
    let mut low = [0u64; 4];
    low.copy_from_slice(&limbs[..4]);
    Ok(U256::from_limbs(low))
}

/// floor(a * b / denominator) with a full 512-bit intermediate product.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> MathResult<U256> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    // 256 x 256 bit product always fits in 512 bits
    let product = widen(a) * widen(b);
    narrow(product / widen(denominator))
}

/// (a * b) >> shift, where the product itself must fit in 256 bits.
#[inline]
pub fn mul_shift(a: U256, b: U256, shift: usize) -> MathResult<U256> {
    a.checked_mul(b)
        .map(|product| product >> shift)
        .ok_or(MathError::ArithmeticOverflow)
}

/// x * x mod 2^256, i.e. Solidity's unchecked `mul(r, r)`.
#[inline]
pub fn wrapping_square(x: U256) -> U256 {
    x.wrapping_mul(x)
}

#[inline]
pub fn checked_sub(a: U256, b: U256) -> MathResult<U256> {
    a.checked_sub(b).ok_or(MathError::ArithmeticOverflow)
}

/// Position of the highest set bit, found by halving the search window from
/// 128 bits down to one. Returns 0 for 0 and 1.
pub fn most_significant_bit(x: U256) -> usize {
    let mut r = x;
    let mut msb = 0usize;
    for shift in [128usize, 64, 32, 16, 8, 4, 2, 1] {
        if !(r >> shift).is_zero() {
            msb |= shift;
            r >>= shift;
        }
    }
    msb
}

/// (a, b) sorted ascending.
#[inline]
pub fn increasing_order(a: U256, b: U256) -> (U256, U256) {
    if a > b { (b, a) } else { (a, b) }
}
