//! Fixed-point tick, sqrt price and liquidity math for a concentrated
//! liquidity AMM, matching the on-chain contract's 256-bit arithmetic.

pub mod amounts;
pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod position;

pub use constants::*;
pub use error::{MathError, MathResult};
pub use math::*;
pub use ruint::aliases::U256;
