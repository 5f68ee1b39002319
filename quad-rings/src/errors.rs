use crate::integer::RingInteger;

use std::fmt;

/// Payload of a division that is exact in the field of fractions but does not
/// land on the ring's lattice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotDivisible {
    pub dividend: RingInteger,
    pub divisor: RingInteger,
    /// Lattice points surrounding the true quotient, nearest first.
    pub bounding: Vec<RingInteger>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgebraicError {
    /// Operands live in different rings, so the result would need a ring of
    /// degree `degree` that this crate does not model.
    #[error("DegreeOverflow: {first} and {second} would need degree {degree}")]
    DegreeOverflow {
        first: Box<RingInteger>,
        second: Box<RingInteger>,
        degree: u32,
    },
    #[error("NotDivisible: {} is not divisible by {}", .0.dividend, .0.divisor)]
    NotDivisible(Box<NotDivisible>),
    /// No Euclidean GCD exists for this kind of number yet.
    #[error("UnsupportedDomain: no GCD for {first} and {second}")]
    UnsupportedDomain {
        first: Box<RingInteger>,
        second: Box<RingInteger>,
    },
    #[error("ArithmeticOverflow: {0}")]
    ArithmeticOverflow(String),
    #[error("Division of {0} by zero")]
    DivisionByZero(String),
    /// Radicand is 0, 1 or carries a square factor.
    #[error("InvalidRadicand: {0}")]
    InvalidRadicand(String),
    #[error("NotInRing: {0}")]
    NotInRing(String),
    #[error("Parse: {0}")]
    Parse(String),

    #[error("Data serialization: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AlgebraicError {
    fn from(err: serde_json::Error) -> Self {
        AlgebraicError::Serialization(err.to_string())
    }
}

impl AlgebraicError {
    pub(crate) fn degree_overflow(
        first: impl Into<RingInteger>,
        second: impl Into<RingInteger>,
        degree: u32,
    ) -> Self {
        AlgebraicError::DegreeOverflow {
            first: Box::new(first.into()),
            second: Box::new(second.into()),
            degree,
        }
    }

    pub(crate) fn overflow(operation: &str, lhs: &dyn fmt::Display, rhs: &dyn fmt::Display) -> Self {
        AlgebraicError::ArithmeticOverflow(format!(
            "{} of {} and {} exceeds the 64-bit range",
            operation, lhs, rhs
        ))
    }

    /// Names the operation and operands on an overflow raised by a helper.
    pub(crate) fn in_operation(self, operation: &str, lhs: &dyn fmt::Display, rhs: &dyn fmt::Display) -> Self {
        match self {
            AlgebraicError::ArithmeticOverflow(detail) => AlgebraicError::ArithmeticOverflow(
                format!("{} of {} and {}: {}", operation, lhs, rhs, detail),
            ),
            other => other,
        }
    }
}
