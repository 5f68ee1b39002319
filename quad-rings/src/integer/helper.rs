use crate::errors::AlgebraicError;

use num_traits::ToPrimitive;

use std::fmt::Display;

/// Narrows a widened intermediate back to the stored 64-bit width.
pub(crate) fn narrow<T: ToPrimitive + Display>(value: T) -> Result<i64, AlgebraicError> {
    value.to_i64().ok_or_else(|| {
        AlgebraicError::ArithmeticOverflow(format!("{} does not fit in 64 bits", value))
    })
}

/// Unwraps a checked 128-bit step.
pub(crate) fn widened(step: Option<i128>) -> Result<i128, AlgebraicError> {
    step.ok_or_else(|| {
        AlgebraicError::ArithmeticOverflow("intermediate result exceeds 128 bits".to_string())
    })
}
