use ruint::aliases::U256;

/// The lowest tick whose price is still representable.
pub const MIN_TICK: i32 = -887272;
/// The highest tick whose price is still representable.
pub const MAX_TICK: i32 = -MIN_TICK;

pub const POSSIBLE_TICKS: i32 = MAX_TICK - MIN_TICK;

/// `get_sqrt_ratio_at_tick(MIN_TICK)`
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);
/// `get_sqrt_ratio_at_tick(MAX_TICK)`, 0xfffd8963efd1fc6a506488495d951d5263988d26
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([6743328256752651558, 17280870778742802505, 4294805859, 0]);

pub const RESOLUTION: usize = 96;
/// 2^96
pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);
/// 2^192, the scale of a squared Q96 value
pub const Q192: U256 = U256::from_limbs([0, 0, 0, 1]);

/// `type(uint256).max`
pub const MAX_UINT256: U256 = U256::MAX;
