//! Rational integers wrapped as algebraic integers of degree at most one.

use super::helper::narrow;
use super::{AlgebraicInteger, Division};
use crate::errors::AlgebraicError;
use crate::render::{Format, RenderConfig};
use crate::ring::AlgebraicRing;

use num_integer::Integer;
use serde::{Deserialize, Serialize};

use std::fmt;

/// A rational integer in Z. Arithmetic is computed in 128 bits and fails
/// instead of wrapping when the result leaves the 64-bit range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnaryInteger {
    value: i64,
}

impl UnaryInteger {
    pub fn new(value: i64) -> Self {
        UnaryInteger { value }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Computes `self + addend`.
    ///
    /// # Example
    ///
    /// ```
    /// # use quad_rings::integer::UnaryInteger;
    /// let a = UnaryInteger::new(i64::MAX - 1);
    /// assert_eq!(a.plus(&UnaryInteger::new(1)).unwrap().value(), i64::MAX);
    /// assert!(a.plus(&UnaryInteger::new(2)).is_err());
    /// ```
    pub fn plus(&self, addend: &Self) -> Result<Self, AlgebraicError> {
        let sum = self.value as i128 + addend.value as i128;
        narrow(sum)
            .map(Self::new)
            .map_err(|_| AlgebraicError::overflow("Addition", self, addend))
    }

    pub fn minus(&self, subtrahend: &Self) -> Result<Self, AlgebraicError> {
        let difference = self.value as i128 - subtrahend.value as i128;
        narrow(difference)
            .map(Self::new)
            .map_err(|_| AlgebraicError::overflow("Subtraction", self, subtrahend))
    }

    pub fn times(&self, multiplicand: &Self) -> Result<Self, AlgebraicError> {
        let product = self.value as i128 * multiplicand.value as i128;
        narrow(product)
            .map(Self::new)
            .map_err(|_| AlgebraicError::overflow("Multiplication", self, multiplicand))
    }

    pub fn divides(&self, divisor: &Self) -> Result<Self, AlgebraicError> {
        self.divide_or_bound(divisor)?
            .exact_or_not_divisible(*self, *divisor)
    }

    /// Divides, returning floor and ceiling of the true quotient (nearest
    /// first, floor on a tie) when the division is inexact.
    pub fn divide_or_bound(&self, divisor: &Self) -> Result<Division<Self>, AlgebraicError> {
        if divisor.value == 0 {
            return Err(AlgebraicError::DivisionByZero(self.to_string()));
        }

        let (dividend, divisor_wide) = (self.value as i128, divisor.value as i128);
        let (floor, remainder) = dividend.div_mod_floor(&divisor_wide);
        let to_integer = |q: i128| {
            narrow(q)
                .map(Self::new)
                .map_err(|_| AlgebraicError::overflow("Division", self, divisor))
        };

        if remainder == 0 {
            return Ok(Division::Exact(to_integer(floor)?));
        }

        let (floor, ceiling) = (to_integer(floor)?, to_integer(floor + 1)?);
        // remainder / divisor is the fractional part of the quotient.
        if 2 * remainder.abs() > divisor_wide.abs() {
            Ok(Division::Inexact(vec![ceiling, floor]))
        } else {
            Ok(Division::Inexact(vec![floor, ceiling]))
        }
    }

    pub fn negate(&self) -> Result<Self, AlgebraicError> {
        narrow(-(self.value as i128)).map(Self::new)
    }

    pub fn plus_int(&self, addend: i64) -> Result<Self, AlgebraicError> {
        self.plus(&Self::new(addend))
    }

    pub fn minus_int(&self, subtrahend: i64) -> Result<Self, AlgebraicError> {
        self.minus(&Self::new(subtrahend))
    }

    pub fn times_int(&self, multiplicand: i64) -> Result<Self, AlgebraicError> {
        self.times(&Self::new(multiplicand))
    }

    pub fn divides_int(&self, divisor: i64) -> Result<Self, AlgebraicError> {
        self.divides(&Self::new(divisor))
    }
}

impl AlgebraicInteger for UnaryInteger {
    fn norm(&self) -> Result<i64, AlgebraicError> {
        Ok(self.value)
    }

    fn trace(&self) -> Result<i64, AlgebraicError> {
        Ok(self.value)
    }

    fn algebraic_degree(&self) -> u32 {
        if self.value == 0 { 0 } else { 1 }
    }

    fn ring(&self) -> AlgebraicRing {
        AlgebraicRing::Integers
    }

    fn render(&self, format: Format, _config: &RenderConfig) -> String {
        format.integer(self.value as i128)
    }
}

impl From<i64> for UnaryInteger {
    fn from(value: i64) -> Self {
        UnaryInteger::new(value)
    }
}

impl fmt::Display for UnaryInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Format::Plain, &RenderConfig::default()))
    }
}
