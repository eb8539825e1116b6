pub mod full_math;
pub mod liquidity_amounts;
pub mod price_math;
pub mod tick_math;

pub use liquidity_amounts::*;
pub use price_math::*;
pub use tick_math::*;
