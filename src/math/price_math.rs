use num_traits::Float;
use ruint::aliases::U256;

use super::full_math::{narrow, widen};
use super::tick_math::get_sqrt_ratio_at_tick;
use crate::error::{MathError, MathResult};

/// 10^exponent, failing once it no longer fits in 256 bits.
pub fn pow10(exponent: u32) -> MathResult<U256> {
    let ten = U256::from(10u64);
    (0..exponent).try_fold(U256::from(1u64), |acc, _| {
        acc.checked_mul(ten).ok_or(MathError::ArithmeticOverflow)
    })
}

/// Converts a Q64.96 sqrt price into the token1/token0 price scaled by
/// `10^decimals`: `sqrt_price_x96^2 * 10^decimals / 2^192`.
///
/// The division truncates toward zero.
pub fn sqrt_price_x96_to_price(sqrt_price_x96: U256, decimals: u32) -> MathResult<U256> {
    let squared = widen(sqrt_price_x96) * widen(sqrt_price_x96);
    let scaled = squared
        .checked_mul(widen(pow10(decimals)?))
        .ok_or(MathError::ArithmeticOverflow)?;
    narrow(scaled >> 192usize)
}

/// Scaled price at a tick, see [`sqrt_price_x96_to_price`].
pub fn price_at_tick(tick: i32, decimals: u32) -> MathResult<U256> {
    sqrt_price_x96_to_price(get_sqrt_ratio_at_tick(tick)?, decimals)
}

/// Approximate `sqrt(price) * 2^96` computed in `f64`.
///
/// Only for display and for building test inputs: the float square root
/// drifts from the contract's sqrt prices, so this must never feed a value
/// that has to match [`get_sqrt_ratio_at_tick`] exactly. The float result is
/// converted to an integer exactly and truncated toward zero.
pub fn encode_sqrt_price(price: f64) -> MathResult<U256> {
    if price.is_nan() || price.is_infinite() || price < 0.0 {
        return Err(MathError::invalid_input(price.to_string()));
    }

    let scaled = price.sqrt() * 2f64.powi(96);
    let (mantissa, exponent, _sign) = Float::integer_decode(scaled);
    let mantissa = U256::from(mantissa);

    if exponent >= 0 {
        let shift = exponent as usize;
        if mantissa.bit_len() + shift > 256 {
            return Err(MathError::ArithmeticOverflow);
        }
        Ok(mantissa << shift)
    } else {
        let shift = exponent.unsigned_abs() as usize;
        if shift >= 256 {
            return Ok(U256::ZERO);
        }
        Ok(mantissa >> shift)
    }
}
