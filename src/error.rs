use ruint::aliases::U256;
use thiserror::Error;

/// Failures surfaced by the tick, price and liquidity math.
///
/// Every variant is fatal for the quote being computed: callers must block the
/// corresponding position or swap instead of retrying or clamping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("tick {0} is outside [MIN_TICK, MAX_TICK]")]
    TickOutOfRange(i32),

    #[error("sqrt ratio {0} is outside [MIN_SQRT_RATIO, MAX_SQRT_RATIO]")]
    SqrtRatioOutOfRange(U256),

    #[error("arithmetic over- or underflow")]
    ArithmeticOverflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("price range has zero width")]
    EmptyPriceRange,

    #[error("invalid numeric input: {0}")]
    InvalidNumericInput(String),
}

impl MathError {
    /// True for the tick and sqrt ratio bound violations.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            MathError::TickOutOfRange(_) | MathError::SqrtRatioOutOfRange(_)
        )
    }

    pub(crate) fn invalid_input(input: impl Into<String>) -> Self {
        MathError::InvalidNumericInput(input.into())
    }
}

pub type MathResult<T> = Result<T, MathError>;
