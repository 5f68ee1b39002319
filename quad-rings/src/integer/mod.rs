//! # Integer Module
//!
//! Algebraic integers of the rings in [`crate::ring`]. Every concrete type
//! implements [`AlgebraicInteger`]; [`RingInteger`] is the tagged union over
//! them used wherever the kind of number is only known at runtime.

pub mod bounding;
pub(crate) mod helper;
pub mod parse;
pub mod quadratic;
pub mod unary;
pub mod zeta8;

pub use quadratic::QuadraticInteger;
pub use unary::UnaryInteger;
pub use zeta8::Zeta8Integer;

use crate::errors::{AlgebraicError, NotDivisible};
use crate::render::{Format, RenderConfig};
use crate::ring::AlgebraicRing;

use serde::{Deserialize, Serialize};

use std::fmt;

/// Capabilities shared by every algebraic integer.
pub trait AlgebraicInteger: fmt::Display {
    /// Field norm down to the rationals.
    fn norm(&self) -> Result<i64, AlgebraicError>;

    /// Sum of the number and all its conjugates.
    fn trace(&self) -> Result<i64, AlgebraicError>;

    /// Degree of the minimal polynomial over Q; 0 for zero.
    fn algebraic_degree(&self) -> u32;

    fn ring(&self) -> AlgebraicRing;

    fn render(&self, format: Format, config: &RenderConfig) -> String;

    fn to_ascii_string(&self) -> String {
        self.render(Format::Ascii, &RenderConfig::default())
    }

    fn to_tex_string(&self) -> String {
        self.render(Format::Tex, &RenderConfig::default())
    }

    fn to_html_string(&self) -> String {
        self.render(Format::Html, &RenderConfig::default())
    }

    fn is_unit(&self) -> bool {
        matches!(self.norm(), Ok(1) | Ok(-1))
    }

    /// Whether the number is an element of `ring`. Rational integers belong to
    /// every ring.
    fn is_in_ring(&self, ring: &AlgebraicRing) -> bool {
        self.ring() == *ring || self.algebraic_degree() <= 1
    }
}

/// Outcome of a division attempt that does not treat an inexact quotient as
/// an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Division<T> {
    Exact(T),
    /// Lattice points around the true quotient, nearest first.
    Inexact(Vec<T>),
}

impl<T> Division<T> {
    /// Turns an inexact division into [`AlgebraicError::NotDivisible`].
    pub(crate) fn exact_or_not_divisible(
        self,
        dividend: T,
        divisor: T,
    ) -> Result<T, AlgebraicError>
    where
        T: Into<RingInteger>,
    {
        match self {
            Division::Exact(quotient) => Ok(quotient),
            Division::Inexact(bounding) => {
                Err(AlgebraicError::NotDivisible(Box::new(NotDivisible {
                    dividend: dividend.into(),
                    divisor: divisor.into(),
                    bounding: bounding.into_iter().map(Into::into).collect(),
                })))
            }
        }
    }
}

/// Any algebraic integer this crate can represent.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum RingInteger {
    Unary(UnaryInteger),
    Quadratic(QuadraticInteger),
    Zeta8(Zeta8Integer),
}

/// Both operands moved into one common representation.
enum Pair {
    Unary(UnaryInteger, UnaryInteger),
    Quadratic(QuadraticInteger, QuadraticInteger),
    Zeta8(Zeta8Integer, Zeta8Integer),
}

impl RingInteger {
    fn as_dyn(&self) -> &dyn AlgebraicInteger {
        match self {
            RingInteger::Unary(n) => n,
            RingInteger::Quadratic(q) => q,
            RingInteger::Zeta8(z) => z,
        }
    }

    /// Promotes the operands to the smaller ring containing both.
    fn unify(&self, other: &RingInteger) -> Result<Pair, AlgebraicError> {
        use RingInteger::*;

        let embed = |quadratic: &QuadraticInteger| {
            Zeta8Integer::try_from(quadratic).map_err(|_| {
                AlgebraicError::degree_overflow(*self, *other, 2 * 4)
            })
        };

        Ok(match (self, other) {
            (Unary(a), Unary(b)) => Pair::Unary(*a, *b),
            (Unary(a), Quadratic(b)) => Pair::Quadratic(
                QuadraticInteger::rational(a.value(), b.quadratic_ring()),
                *b,
            ),
            (Quadratic(a), Unary(b)) => Pair::Quadratic(
                *a,
                QuadraticInteger::rational(b.value(), a.quadratic_ring()),
            ),
            (Quadratic(a), Quadratic(b)) => Pair::Quadratic(*a, *b),
            (Unary(a), Zeta8(b)) => Pair::Zeta8(Zeta8Integer::from_integer(a.value()), *b),
            (Zeta8(a), Unary(b)) => Pair::Zeta8(*a, Zeta8Integer::from_integer(b.value())),
            (Quadratic(a), Zeta8(b)) => Pair::Zeta8(embed(a)?, *b),
            (Zeta8(a), Quadratic(b)) => Pair::Zeta8(*a, embed(b)?),
            (Zeta8(a), Zeta8(b)) => Pair::Zeta8(*a, *b),
        })
    }

    pub fn plus(&self, addend: &RingInteger) -> Result<RingInteger, AlgebraicError> {
        match self.unify(addend)? {
            Pair::Unary(a, b) => a.plus(&b).map(Into::into),
            Pair::Quadratic(a, b) => a.plus(&b).map(Into::into),
            Pair::Zeta8(a, b) => a.plus(&b).map(Into::into),
        }
    }

    pub fn minus(&self, subtrahend: &RingInteger) -> Result<RingInteger, AlgebraicError> {
        match self.unify(subtrahend)? {
            Pair::Unary(a, b) => a.minus(&b).map(Into::into),
            Pair::Quadratic(a, b) => a.minus(&b).map(Into::into),
            Pair::Zeta8(a, b) => a.minus(&b).map(Into::into),
        }
    }

    pub fn times(&self, multiplicand: &RingInteger) -> Result<RingInteger, AlgebraicError> {
        match self.unify(multiplicand)? {
            Pair::Unary(a, b) => a.times(&b).map(Into::into),
            Pair::Quadratic(a, b) => a.times(&b).map(Into::into),
            Pair::Zeta8(a, b) => a.times(&b).map(Into::into),
        }
    }

    /// Exact division; fails with [`AlgebraicError::NotDivisible`] when the
    /// quotient is not a lattice point.
    pub fn divides(&self, divisor: &RingInteger) -> Result<RingInteger, AlgebraicError> {
        match self.unify(divisor)? {
            Pair::Unary(a, b) => a.divides(&b).map(Into::into),
            Pair::Quadratic(a, b) => a.divides(&b).map(Into::into),
            Pair::Zeta8(a, b) => a.divides(&b).map(Into::into),
        }
    }

    pub fn plus_int(&self, addend: i64) -> Result<RingInteger, AlgebraicError> {
        self.plus(&addend.into())
    }

    pub fn minus_int(&self, subtrahend: i64) -> Result<RingInteger, AlgebraicError> {
        self.minus(&subtrahend.into())
    }

    pub fn times_int(&self, multiplicand: i64) -> Result<RingInteger, AlgebraicError> {
        self.times(&multiplicand.into())
    }

    pub fn divides_int(&self, divisor: i64) -> Result<RingInteger, AlgebraicError> {
        self.divides(&divisor.into())
    }

    pub fn negate(&self) -> Result<RingInteger, AlgebraicError> {
        match self {
            RingInteger::Unary(n) => n.negate().map(Into::into),
            RingInteger::Quadratic(q) => q.negate().map(Into::into),
            RingInteger::Zeta8(z) => z.negate().map(Into::into),
        }
    }
}

impl AlgebraicInteger for RingInteger {
    fn norm(&self) -> Result<i64, AlgebraicError> {
        self.as_dyn().norm()
    }

    fn trace(&self) -> Result<i64, AlgebraicError> {
        self.as_dyn().trace()
    }

    fn algebraic_degree(&self) -> u32 {
        self.as_dyn().algebraic_degree()
    }

    fn ring(&self) -> AlgebraicRing {
        self.as_dyn().ring()
    }

    fn render(&self, format: Format, config: &RenderConfig) -> String {
        self.as_dyn().render(format, config)
    }

    fn is_in_ring(&self, ring: &AlgebraicRing) -> bool {
        self.as_dyn().is_in_ring(ring)
    }
}

impl fmt::Display for RingInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_dyn(), f)
    }
}

impl From<UnaryInteger> for RingInteger {
    fn from(n: UnaryInteger) -> Self {
        RingInteger::Unary(n)
    }
}

impl From<QuadraticInteger> for RingInteger {
    fn from(q: QuadraticInteger) -> Self {
        RingInteger::Quadratic(q)
    }
}

impl From<Zeta8Integer> for RingInteger {
    fn from(z: Zeta8Integer) -> Self {
        RingInteger::Zeta8(z)
    }
}

impl From<i64> for RingInteger {
    fn from(n: i64) -> Self {
        RingInteger::Unary(UnaryInteger::new(n))
    }
}
