//! Conversions between ticks and Q64.96 square root prices.
//!
//! Both directions reproduce the deployed TickMath contract bit for bit: the
//! forward direction through binary exponentiation over precomputed
//! `2^128 / sqrt(1.0001^(2^i))` factors, the inverse through a fixed-point
//! base-2 logarithm.

use ethnum::I256;
use ruint::aliases::U256;
use tracing::trace;

use super::full_math::{most_significant_bit, mul_shift, wrapping_square};
use crate::constants::{MAX_SQRT_RATIO, MAX_TICK, MAX_UINT256, MIN_SQRT_RATIO, MIN_TICK};
use crate::error::{MathError, MathResult};

/// 2^128 / sqrt(1.0001), the starting accumulator for odd ticks.
const SQRT_RATIO_ODD_SEED: u128 = 0xfffcb933bd6fad37aa2d162d1a594001;

/// 2^128 / sqrt(1.0001^(2^i)) for bit i = 1..=19 of |tick|.
const SQRT_RATIO_FACTORS: [u128; 19] = [
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
    0x48a170391f7dc42444e8fa2,
];

/// log_sqrt(1.0001)(2) * 2^64, turns a Q64 log2 into a Q128 tick.
const LOG_SQRT10001_FACTOR: i128 = 255738958999603826347141;
/// Error bound subtracted to get the lower tick candidate.
const TICK_LOW_ERROR: u128 = 3402992956809132418596140100660247210;
/// Error bound added to get the upper tick candidate.
const TICK_HIGH_ERROR: u128 = 291339464771989622907027621153398088495;

/// Returns sqrt(1.0001^tick) * 2^96.
///
/// Fails with [`MathError::TickOutOfRange`] outside `[MIN_TICK, MAX_TICK]`.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> MathResult<U256> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(MathError::TickOutOfRange(tick));
    }

    let abs_tick = tick.unsigned_abs();

    // Q128 accumulator of 1 / sqrt(1.0001)^|tick|
    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(SQRT_RATIO_ODD_SEED)
    } else {
        U256::from(1u64) << 128usize
    };

    for (bit, factor) in SQRT_RATIO_FACTORS.iter().enumerate() {
        if abs_tick & (0x2 << bit) != 0 {
            ratio = mul_shift(ratio, U256::from(*factor), 128)?;
        }
    }

    if tick > 0 {
        ratio = MAX_UINT256 / ratio;
    }

    // Q128 -> Q96, rounding up so the result never undershoots the tick
    let round_up = !(ratio % (U256::from(1u64) << 32usize)).is_zero();
    let sqrt_price_x96 = (ratio >> 32usize) + U256::from(round_up as u64);

    Ok(sqrt_price_x96)
}

/// Returns the greatest tick `t` with `get_sqrt_ratio_at_tick(t) <= sqrt_price_x96`.
///
/// Fails with [`MathError::SqrtRatioOutOfRange`] outside
/// `[MIN_SQRT_RATIO, MAX_SQRT_RATIO]`.
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: U256) -> MathResult<i32> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 > MAX_SQRT_RATIO {
        return Err(MathError::SqrtRatioOutOfRange(sqrt_price_x96));
    }

    // Q128.128 ratio, at most 192 bits wide
    let ratio = sqrt_price_x96 << 32usize;
    let msb = most_significant_bit(ratio);

    // Normalize the mantissa into [2^127, 2^128)
    let mut r = if msb >= 128 {
        ratio >> (msb - 127)
    } else {
        ratio << (127 - msb)
    };

    let mut log_2 = I256::from(msb as i32 - 128) << 64u32;

    // 14 fractional bits: square, and when the square crosses 2 take the bit
    for bit in (50..64u32).rev() {
        r = wrapping_square(r) >> 127usize;
        let f = r >> 128usize;
        if !f.is_zero() {
            log_2 |= I256::ONE << bit;
            r >>= 1usize;
        }
    }

    let log_sqrt10001 = log_2 * I256::from(LOG_SQRT10001_FACTOR);

    let tick_low = ((log_sqrt10001 - I256::from(TICK_LOW_ERROR)) >> 128u32).as_i32();
    let tick_high = ((log_sqrt10001 + I256::from(TICK_HIGH_ERROR)) >> 128u32).as_i32();

    if tick_low == tick_high {
        return Ok(tick_low);
    }

    trace!("Tie-break between tick {} and {}", tick_low, tick_high);
    if get_sqrt_ratio_at_tick(tick_high)? <= sqrt_price_x96 {
        Ok(tick_high)
    } else {
        Ok(tick_low)
    }
}

/// Rounds `tick` to the nearest multiple of `spacing` (halves round up),
/// falling back to floor/ceil when the nearest multiple leaves the tick bounds.
///
/// The input is clamped into `[MIN_TICK, MAX_TICK]` first, so the result is
/// always a valid tick.
pub fn snap_tick_to_spacing(tick: i32, spacing: u32) -> i32 {
    assert!(spacing > 0, "Tick spacing must be positive.");

    let tick = i64::from(tick.clamp(MIN_TICK, MAX_TICK));
    let spacing = i64::from(spacing);

    let nearest = (2 * tick + spacing).div_euclid(2 * spacing) * spacing;
    let snapped = if nearest > i64::from(MAX_TICK) {
        tick.div_euclid(spacing) * spacing
    } else if nearest < i64::from(MIN_TICK) {
        -(-tick).div_euclid(spacing) * spacing
    } else {
        nearest
    };

    // bounded by MIN_TICK / MAX_TICK above
    snapped as i32
}

/// Lowest multiple of `spacing` that is still a valid tick.
pub fn get_min_usable_tick(spacing: u32) -> i32 {
    assert!(spacing > 0, "Tick spacing must be positive.");
    let spacing = i32::try_from(spacing).unwrap_or(i32::MAX);
    (MIN_TICK / spacing) * spacing
}

/// Highest multiple of `spacing` that is still a valid tick.
pub fn get_max_usable_tick(spacing: u32) -> i32 {
    assert!(spacing > 0, "Tick spacing must be positive.");
    let spacing = i32::try_from(spacing).unwrap_or(i32::MAX);
    (MAX_TICK / spacing) * spacing
}

/// Floating point log_1.0001(price), floored. Display only.
pub fn encode_tick(price: f64) -> MathResult<i32> {
    if !price.is_finite() || price <= 0.0 {
        return Err(MathError::invalid_input(price.to_string()));
    }
    let tick = (price.ln() / 1.0001f64.ln()).floor();
    if tick < f64::from(MIN_TICK) || tick > f64::from(MAX_TICK) {
        return Err(MathError::TickOutOfRange(tick as i32));
    }
    Ok(tick as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_seed_is_first_factor_square_root() {
        // seed^2 >> 128 lands within rounding of the bit-1 factor
        let seed = U256::from(SQRT_RATIO_ODD_SEED);
        let squared = (seed * seed) >> 128usize;
        let factor = U256::from(SQRT_RATIO_FACTORS[0]);
        let diff = if squared > factor { squared - factor } else { factor - squared };
        assert!(diff < U256::from(4u64));
    }

    #[test]
    fn tick_zero_is_exactly_q96() {
        assert_eq!(get_sqrt_ratio_at_tick(0).unwrap(), crate::constants::Q96);
        assert_eq!(get_tick_at_sqrt_ratio(crate::constants::Q96).unwrap(), 0);
    }

    #[test]
    fn snap_rounds_half_up() {
        assert_eq!(snap_tick_to_spacing(15, 10), 20);
        assert_eq!(snap_tick_to_spacing(-15, 10), -10);
        assert_eq!(snap_tick_to_spacing(14, 10), 10);
        assert_eq!(snap_tick_to_spacing(-14, 10), -10);
        assert_eq!(snap_tick_to_spacing(-16, 10), -20);
    }

    #[test]
    fn snap_falls_back_at_the_bounds() {
        assert_eq!(snap_tick_to_spacing(MAX_TICK, 60), 887220);
        assert_eq!(snap_tick_to_spacing(MIN_TICK, 60), -887220);
        assert_eq!(snap_tick_to_spacing(MAX_TICK, 200), 887200);
        assert_eq!(snap_tick_to_spacing(MIN_TICK, 10), -887270);
        assert_eq!(snap_tick_to_spacing(i32::MAX, 1), MAX_TICK);
        assert_eq!(snap_tick_to_spacing(i32::MIN, 7), get_min_usable_tick(7));
    }

    #[test]
    #[should_panic(expected = "Tick spacing must be positive.")]
    fn snap_rejects_zero_spacing() {
        snap_tick_to_spacing(10, 0);
    }

    #[test]
    fn usable_ticks_truncate_toward_zero() {
        assert_eq!(get_min_usable_tick(60), -887220);
        assert_eq!(get_max_usable_tick(60), 887220);
        assert_eq!(get_max_usable_tick(1), MAX_TICK);
    }

    #[test]
    fn encode_tick_rejects_non_positive() {
        assert!(matches!(encode_tick(0.0), Err(MathError::InvalidNumericInput(_))));
        assert!(matches!(encode_tick(-1.0), Err(MathError::InvalidNumericInput(_))));
        assert!(matches!(encode_tick(f64::NAN), Err(MathError::InvalidNumericInput(_))));
        assert_eq!(encode_tick(1.0).unwrap(), 0);
        assert_eq!(encode_tick(1.0001f64.powi(100) * 1.00000001).unwrap(), 100);
    }
}
