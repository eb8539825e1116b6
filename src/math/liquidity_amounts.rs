use ruint::aliases::U256;

use super::full_math::{checked_sub, increasing_order, mul_div};
use super::tick_math::get_sqrt_ratio_at_tick;
use crate::constants::{Q96, RESOLUTION};
use crate::error::{MathError, MathResult};

/// Sqrt ratios of both ticks, ascending.
fn ordered_range(lower_tick: i32, upper_tick: i32) -> MathResult<(U256, U256)> {
    let sqrt_ratio_a = get_sqrt_ratio_at_tick(lower_tick)?;
    let sqrt_ratio_b = get_sqrt_ratio_at_tick(upper_tick)?;
    Ok(increasing_order(sqrt_ratio_a, sqrt_ratio_b))
}

fn range_width(sqrt_ratio_a: U256, sqrt_ratio_b: U256) -> MathResult<U256> {
    if sqrt_ratio_a == sqrt_ratio_b {
        return Err(MathError::EmptyPriceRange);
    }
    checked_sub(sqrt_ratio_b, sqrt_ratio_a)
}

//
// Liquidity from amounts
//

// L = amount0 * (sqrt_a * sqrt_b / Q96) / (sqrt_b - sqrt_a)
pub fn liquidity_from_amount0(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
) -> MathResult<U256> {
    let (sqrt_ratio_a, sqrt_ratio_b) = increasing_order(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    let width = range_width(sqrt_ratio_a, sqrt_ratio_b)?;
    let intermediate = mul_div(sqrt_ratio_a, sqrt_ratio_b, Q96)?;
    mul_div(amount0, intermediate, width)
}

// L = amount1 * Q96 / (sqrt_b - sqrt_a)
pub fn liquidity_from_amount1(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount1: U256,
) -> MathResult<U256> {
    let (sqrt_ratio_a, sqrt_ratio_b) = increasing_order(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    let width = range_width(sqrt_ratio_a, sqrt_ratio_b)?;
    mul_div(amount1, Q96, width)
}

pub fn get_liquidity_for_amount0(
    lower_tick: i32,
    upper_tick: i32,
    amount0: U256,
) -> MathResult<U256> {
    let (sqrt_ratio_a, sqrt_ratio_b) = ordered_range(lower_tick, upper_tick)?;
    liquidity_from_amount0(sqrt_ratio_a, sqrt_ratio_b, amount0)
}

pub fn get_liquidity_for_amount1(
    lower_tick: i32,
    upper_tick: i32,
    amount1: U256,
) -> MathResult<U256> {
    let (sqrt_ratio_a, sqrt_ratio_b) = ordered_range(lower_tick, upper_tick)?;
    liquidity_from_amount1(sqrt_ratio_a, sqrt_ratio_b, amount1)
}

/// Largest liquidity the range can mint at the current `tick` without using
/// more than `amount0` of token0 or `amount1` of token1.
///
/// Same as [`get_liquidity_for_amounts_at_sqrt_ratio`] priced at the tick's
/// own sqrt ratio.
pub fn get_liquidity_for_amounts(
    tick: i32,
    lower_tick: i32,
    upper_tick: i32,
    amount0: U256,
    amount1: U256,
) -> MathResult<U256> {
    let sqrt_ratio_x = get_sqrt_ratio_at_tick(tick)?;
    get_liquidity_for_amounts_at_sqrt_ratio(sqrt_ratio_x, lower_tick, upper_tick, amount0, amount1)
}

/// Largest liquidity the range can mint at `sqrt_ratio_x96` without using
/// more than `amount0` of token0 or `amount1` of token1.
///
/// Below the range only token0 counts, above it only token1; inside the range
/// the smaller of the two one-sided liquidities wins. Pass the pool's actual
/// sqrt price here: it can sit anywhere between two tick sqrt ratios.
pub fn get_liquidity_for_amounts_at_sqrt_ratio(
    sqrt_ratio_x96: U256,
    lower_tick: i32,
    upper_tick: i32,
    amount0: U256,
    amount1: U256,
) -> MathResult<U256> {
    let (sqrt_ratio_a, sqrt_ratio_b) = ordered_range(lower_tick, upper_tick)?;

    if sqrt_ratio_x96 <= sqrt_ratio_a {
        liquidity_from_amount0(sqrt_ratio_a, sqrt_ratio_b, amount0)
    } else if sqrt_ratio_x96 < sqrt_ratio_b {
        let liquidity0 = liquidity_from_amount0(sqrt_ratio_x96, sqrt_ratio_b, amount0)?;
        let liquidity1 = liquidity_from_amount1(sqrt_ratio_a, sqrt_ratio_x96, amount1)?;
        Ok(liquidity0.min(liquidity1))
    } else {
        liquidity_from_amount1(sqrt_ratio_a, sqrt_ratio_b, amount1)
    }
}

//
// Amounts from liquidity
//

// amount0 = ((L << 96) * (sqrt_b - sqrt_a) / sqrt_b) / sqrt_a
pub fn get_amount0_for_liquidity(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
) -> MathResult<U256> {
    let (sqrt_ratio_a, sqrt_ratio_b) = increasing_order(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if sqrt_ratio_a.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    if liquidity.bit_len() + RESOLUTION > 256 {
        return Err(MathError::ArithmeticOverflow);
    }

    let numerator = liquidity << RESOLUTION;
    let sqrt_diff = checked_sub(sqrt_ratio_b, sqrt_ratio_a)?;
    let amount = mul_div(numerator, sqrt_diff, sqrt_ratio_b)?;
    Ok(amount / sqrt_ratio_a)
}

// amount1 = L * (sqrt_b - sqrt_a) / Q96
pub fn get_amount1_for_liquidity(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
) -> MathResult<U256> {
    let (sqrt_ratio_a, sqrt_ratio_b) = increasing_order(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    let sqrt_diff = checked_sub(sqrt_ratio_b, sqrt_ratio_a)?;
    mul_div(liquidity, sqrt_diff, Q96)
}

/// Token amounts `liquidity` represents across `[sqrt_ratio_a, sqrt_ratio_b]`
/// at the current `sqrt_ratio_x96`, returned as `(amount0, amount1)`.
pub fn get_amounts_for_liquidity(
    sqrt_ratio_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
) -> MathResult<(U256, U256)> {
    let (sqrt_ratio_a, sqrt_ratio_b) = increasing_order(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if sqrt_ratio_x96 <= sqrt_ratio_a {
        let amount0 = get_amount0_for_liquidity(sqrt_ratio_a, sqrt_ratio_b, liquidity)?;
        Ok((amount0, U256::ZERO))
    } else if sqrt_ratio_x96 < sqrt_ratio_b {
        let amount0 = get_amount0_for_liquidity(sqrt_ratio_x96, sqrt_ratio_b, liquidity)?;
        let amount1 = get_amount1_for_liquidity(sqrt_ratio_a, sqrt_ratio_x96, liquidity)?;
        Ok((amount0, amount1))
    } else {
        let amount1 = get_amount1_for_liquidity(sqrt_ratio_a, sqrt_ratio_b, liquidity)?;
        Ok((U256::ZERO, amount1))
    }
}

/// Floating point estimate of the amounts behind `liquidity`.
///
/// Loses precision on every step; only for rendering positions, never for
/// sizing a transaction.
pub fn get_token_amounts_numeric(
    liquidity: f64,
    sqrt_price_x96: f64,
    tick_lower: i32,
    tick_upper: i32,
) -> (f64, f64) {
    let sqrt_ratio_a = 1.0001f64.powi(tick_lower).sqrt();
    let sqrt_ratio_b = 1.0001f64.powi(tick_upper).sqrt();
    let sqrt_price = sqrt_price_x96 / 2f64.powi(96);
    let current_tick = (sqrt_price.powi(2).ln() / 1.0001f64.ln()).floor();

    if current_tick < f64::from(tick_lower) {
        let amount0 = liquidity * ((sqrt_ratio_b - sqrt_ratio_a) / (sqrt_ratio_a * sqrt_ratio_b));
        (amount0.floor(), 0.0)
    } else if current_tick >= f64::from(tick_upper) {
        let amount1 = liquidity * (sqrt_ratio_b - sqrt_ratio_a);
        (0.0, amount1.floor())
    } else {
        let amount0 = liquidity * ((sqrt_ratio_b - sqrt_price) / (sqrt_price * sqrt_ratio_b));
        let amount1 = liquidity * (sqrt_price - sqrt_ratio_a);
        (amount0.floor(), amount1.floor())
    }
}
