use ruint::aliases::U256;
use tracing::debug;

use crate::error::{MathError, MathResult};
use crate::math::{
    get_amount0_for_liquidity, get_amount1_for_liquidity, get_amounts_for_liquidity,
    get_liquidity_for_amounts_at_sqrt_ratio, get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio,
    liquidity_from_amount0, liquidity_from_amount1, snap_tick_to_spacing,
};

/// Pool state read from chain: current price, current tick and spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolState {
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub tick_spacing: u32,
}

/// Which side of the pair the user typed an amount for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotedToken {
    Token0,
    Token1,
}

/// Liquidity and token amounts for a mint over a snapped range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionQuote {
    pub lower_tick: i32,
    pub upper_tick: i32,
    pub liquidity: u128,
    pub amount0: U256,
    pub amount1: U256,
}

fn check_spacing(tick_spacing: u32) -> MathResult<()> {
    if tick_spacing == 0 {
        return Err(MathError::invalid_input("tick spacing 0"));
    }
    Ok(())
}

impl PoolState {
    pub fn from_sqrt_price(sqrt_price_x96: U256, tick_spacing: u32) -> MathResult<Self> {
        check_spacing(tick_spacing)?;
        let tick = get_tick_at_sqrt_ratio(sqrt_price_x96)?;
        Ok(Self {
            sqrt_price_x96,
            tick,
            tick_spacing,
        })
    }

    pub fn from_tick(tick: i32, tick_spacing: u32) -> MathResult<Self> {
        check_spacing(tick_spacing)?;
        let sqrt_price_x96 = get_sqrt_ratio_at_tick(tick)?;
        Ok(Self {
            sqrt_price_x96,
            tick,
            tick_spacing,
        })
    }

    /// Orders the pair and snaps both ends onto the pool's tick spacing.
    pub fn snap_range(&self, lower_tick: i32, upper_tick: i32) -> MathResult<(i32, i32)> {
        check_spacing(self.tick_spacing)?;
        let (lower_tick, upper_tick) = if lower_tick <= upper_tick {
            (lower_tick, upper_tick)
        } else {
            (upper_tick, lower_tick)
        };

        let lower = snap_tick_to_spacing(lower_tick, self.tick_spacing);
        let upper = snap_tick_to_spacing(upper_tick, self.tick_spacing);
        if lower == upper {
            return Err(MathError::EmptyPriceRange);
        }
        Ok((lower, upper))
    }

    /// Sizes a mint over `[lower_tick, upper_tick]` from the amounts the user
    /// is willing to deposit.
    ///
    /// Both liquidity and amounts are priced at `sqrt_price_x96`, which can
    /// sit anywhere between the sqrt ratios of `tick` and `tick + 1`.
    /// Liquidity must fit in `u128`; the returned amounts are what that
    /// liquidity consumes, never more than the inputs.
    pub fn quote_position(
        &self,
        lower_tick: i32,
        upper_tick: i32,
        amount0: U256,
        amount1: U256,
    ) -> MathResult<PositionQuote> {
        let (lower_tick, upper_tick) = self.snap_range(lower_tick, upper_tick)?;

        let liquidity = get_liquidity_for_amounts_at_sqrt_ratio(
            self.sqrt_price_x96,
            lower_tick,
            upper_tick,
            amount0,
            amount1,
        )?;
        let liquidity = u128::try_from(liquidity).map_err(|_| MathError::ArithmeticOverflow)?;

        let (used0, used1) = get_amounts_for_liquidity(
            self.sqrt_price_x96,
            get_sqrt_ratio_at_tick(lower_tick)?,
            get_sqrt_ratio_at_tick(upper_tick)?,
            U256::from(liquidity),
        )?;

        debug!(
            "Quoted [{}, {}] at tick {}: liquidity {}, amounts ({}, {})",
            lower_tick, upper_tick, self.tick, liquidity, used0, used1
        );

        Ok(PositionQuote {
            lower_tick,
            upper_tick,
            liquidity,
            amount0: used0,
            amount1: used1,
        })
    }

    /// Amount of the other token a deposit of `amount` of `side` needs.
    ///
    /// Outside the range only one token is deposited, so the paired amount
    /// is zero.
    pub fn pair_amount(
        &self,
        lower_tick: i32,
        upper_tick: i32,
        side: QuotedToken,
        amount: U256,
    ) -> MathResult<U256> {
        let (lower_tick, upper_tick) = self.snap_range(lower_tick, upper_tick)?;
        let sqrt_ratio_lower = get_sqrt_ratio_at_tick(lower_tick)?;
        let sqrt_ratio_upper = get_sqrt_ratio_at_tick(upper_tick)?;
        let sqrt_price = self.sqrt_price_x96;
        if sqrt_price <= sqrt_ratio_lower || sqrt_price >= sqrt_ratio_upper {
            return Ok(U256::ZERO);
        }

        match side {
            QuotedToken::Token0 => {
                let liquidity = liquidity_from_amount0(sqrt_price, sqrt_ratio_upper, amount)?;
                get_amount1_for_liquidity(sqrt_ratio_lower, sqrt_price, liquidity)
            }
            QuotedToken::Token1 => {
                let liquidity = liquidity_from_amount1(sqrt_ratio_lower, sqrt_price, amount)?;
                get_amount0_for_liquidity(sqrt_price, sqrt_ratio_upper, liquidity)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_spacing_is_rejected() {
        assert!(matches!(
            PoolState::from_tick(0, 0),
            Err(MathError::InvalidNumericInput(_))
        ));
    }

    #[test]
    fn snap_range_orders_and_snaps() {
        let pool = PoolState::from_tick(0, 10).unwrap();
        assert_eq!(pool.snap_range(104, -96).unwrap(), (-100, 100));
        assert_eq!(pool.snap_range(1, 3), Err(MathError::EmptyPriceRange));
    }

    #[test]
    fn out_of_range_pairs_to_zero() {
        let pool = PoolState::from_tick(500, 10).unwrap();
        let paired = pool
            .pair_amount(-100, 100, QuotedToken::Token1, U256::from(1_000u64))
            .unwrap();
        assert_eq!(paired, U256::ZERO);
    }
}
