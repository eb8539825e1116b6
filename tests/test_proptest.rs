// Property-based tests for the tick and liquidity math.
// Run with: cargo test --test test_proptest

use clmm_quote::position::PoolState;
use clmm_quote::*;
use proptest::prelude::*;

// ============================================================
// TICK MATH PROPERTIES
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Property: tick -> sqrt ratio -> tick is the identity
    #[test]
    fn prop_tick_round_trip(tick in MIN_TICK..=MAX_TICK) {
        let sqrt_ratio = get_sqrt_ratio_at_tick(tick).unwrap();
        prop_assert_eq!(get_tick_at_sqrt_ratio(sqrt_ratio).unwrap(), tick);
    }

    /// Property: sqrt ratio strictly increases with the tick
    #[test]
    fn prop_sqrt_ratio_monotonic(tick in MIN_TICK..MAX_TICK) {
        let here = get_sqrt_ratio_at_tick(tick).unwrap();
        let next = get_sqrt_ratio_at_tick(tick + 1).unwrap();
        prop_assert!(here < next);
    }

    /// Property: any sqrt ratio in [s(t), s(t + 1)) maps back to t
    #[test]
    fn prop_tick_brackets_sqrt_ratio(tick in MIN_TICK..MAX_TICK, step in 0u64..1000) {
        let here = get_sqrt_ratio_at_tick(tick).unwrap();
        let next = get_sqrt_ratio_at_tick(tick + 1).unwrap();
        let inside = here + (next - here) * U256::from(step) / U256::from(1000u64);
        prop_assert_eq!(get_tick_at_sqrt_ratio(inside).unwrap(), tick);
    }

    /// Property: snapping lands on a usable multiple and is idempotent
    #[test]
    fn prop_snap_is_usable(tick in any::<i32>(), spacing in 1u32..=16384) {
        let snapped = snap_tick_to_spacing(tick, spacing);
        prop_assert_eq!(snapped % spacing as i32, 0);
        prop_assert!(snapped >= get_min_usable_tick(spacing));
        prop_assert!(snapped <= get_max_usable_tick(spacing));
        prop_assert_eq!(snap_tick_to_spacing(snapped, spacing), snapped);
    }
}

// ============================================================
// LIQUIDITY PROPERTIES
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: the amounts backing the computed liquidity never exceed the deposit
    #[test]
    fn prop_liquidity_inverse_bounded(
        lower in -300_000i32..300_000,
        width in 1i32..100_000,
        tick in -400_000i32..400_000,
        amount0 in any::<u64>(),
        amount1 in any::<u64>(),
    ) {
        let upper = lower + width;
        let (amount0, amount1) = (U256::from(amount0), U256::from(amount1));

        let liquidity = get_liquidity_for_amounts(tick, lower, upper, amount0, amount1).unwrap();
        prop_assert!(liquidity.bit_len() <= 160);

        let (used0, used1) = get_amounts_for_liquidity(
            get_sqrt_ratio_at_tick(tick).unwrap(),
            get_sqrt_ratio_at_tick(lower).unwrap(),
            get_sqrt_ratio_at_tick(upper).unwrap(),
            liquidity,
        ).unwrap();
        prop_assert!(used0 <= amount0);
        prop_assert!(used1 <= amount1);
    }

    /// Property: liquidity does not depend on the order of the range ticks
    #[test]
    fn prop_liquidity_symmetric(
        a in -200_000i32..200_000,
        b in -200_000i32..200_000,
        tick in -200_000i32..200_000,
        amount in 1u64..u64::MAX,
    ) {
        prop_assume!(a != b);
        let amount = U256::from(amount);
        prop_assert_eq!(
            get_liquidity_for_amounts(tick, a, b, amount, amount).unwrap(),
            get_liquidity_for_amounts(tick, b, a, amount, amount).unwrap()
        );
    }

    /// Property: a quote at a sqrt price between two ticks never asks for more than the deposit
    #[test]
    fn prop_quote_between_ticks_bounded(
        lower in -300_000i32..300_000,
        width in 1i32..100_000,
        tick in -400_000i32..400_000,
        step in 0u64..1000,
        amount0 in any::<u64>(),
        amount1 in any::<u64>(),
    ) {
        let here = get_sqrt_ratio_at_tick(tick).unwrap();
        let next = get_sqrt_ratio_at_tick(tick + 1).unwrap();
        let sqrt_price = here + (next - here) * U256::from(step) / U256::from(1000u64);
        let pool = PoolState::from_sqrt_price(sqrt_price, 1).unwrap();

        let (amount0, amount1) = (U256::from(amount0), U256::from(amount1));
        let quote = pool.quote_position(lower, lower + width, amount0, amount1).unwrap();

        let (needed0, needed1) = get_amounts_for_liquidity(
            sqrt_price,
            get_sqrt_ratio_at_tick(quote.lower_tick).unwrap(),
            get_sqrt_ratio_at_tick(quote.upper_tick).unwrap(),
            U256::from(quote.liquidity),
        ).unwrap();
        prop_assert!(needed0 <= amount0);
        prop_assert!(needed1 <= amount1);
    }
}
