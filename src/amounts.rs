//! Human-readable amounts at the UI boundary.
//!
//! A formatted amount is what a user types or reads ("1.445", "20"); a token
//! amount is the raw integer scaled by the token's decimals (1445000 and
//! 20000000 for a 6-decimal token). Parsing here is strict so malformed input
//! never reaches the tick math.

use ruint::aliases::U256;

use crate::error::{MathError, MathResult};
use crate::math::{encode_sqrt_price, get_tick_at_sqrt_ratio, pow10, price_at_tick};

fn parse_digits(digits: &str) -> MathResult<U256> {
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).map_err(|_| MathError::ArithmeticOverflow)
}

/// Converts a formatted decimal string into a raw token amount.
///
/// Accepts ASCII digits with at most one `.`; rejects signs, exponents,
/// inner whitespace, `NaN` and more fractional digits than `decimals`.
pub fn parse_token_amount(formatted: &str, decimals: u32) -> MathResult<U256> {
    let invalid = || MathError::invalid_input(formatted);
    let trimmed = formatted.trim();

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole) || !is_digits(fraction) {
        return Err(invalid());
    }
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if fraction.len() > decimals as usize {
        return Err(invalid());
    }

    let whole_amount = parse_digits(whole)?
        .checked_mul(pow10(decimals)?)
        .ok_or(MathError::ArithmeticOverflow)?;

    // "5" with 6 decimals is 500000
    let padding = decimals - fraction.len() as u32;
    let fraction_amount = parse_digits(fraction)?
        .checked_mul(pow10(padding)?)
        .ok_or(MathError::ArithmeticOverflow)?;

    whole_amount
        .checked_add(fraction_amount)
        .ok_or(MathError::ArithmeticOverflow)
}

/// Renders a raw token amount with trailing fractional zeros trimmed.
pub fn format_token_amount(amount: U256, decimals: u32) -> String {
    let digits = amount.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    if digits.len() > decimals {
        let (whole, fraction) = digits.split_at(digits.len() - decimals);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, fraction)
        }
    } else {
        let padded = format!("{:0>width$}", digits, width = decimals);
        let fraction = padded.trim_end_matches('0');
        if fraction.is_empty() {
            "0".to_string()
        } else {
            format!("0.{}", fraction)
        }
    }
}

/// Exact token1-per-token0 price at `tick`, formatted for display.
pub fn format_price_at_tick(tick: i32, decimals0: u32, decimals1: u32) -> MathResult<String> {
    let price = price_at_tick(tick, decimals0)?;
    Ok(format_token_amount(price, decimals1))
}

/// Best-effort tick for a typed token1-per-token0 price.
///
/// Goes through [`encode_sqrt_price`], so the tick may be off by one from the
/// exact inverse of [`format_price_at_tick`].
pub fn tick_from_formatted_price(price: &str, decimals0: u32, decimals1: u32) -> MathResult<i32> {
    let raw = parse_token_amount(price, decimals1)?;
    let raw: f64 = raw
        .to_string()
        .parse()
        .map_err(|_| MathError::invalid_input(price))?;
    let ratio = raw * 10f64.powi(-(decimals0 as i32));
    get_tick_at_sqrt_ratio(encode_sqrt_price(ratio)?)
}
