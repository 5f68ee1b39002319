//! Algebraic integers of a quadratic ring.

use super::bounding::{FieldQuotient, snap_to_lattice};
use super::helper::{narrow, widened};
use super::{AlgebraicInteger, Division};
use crate::errors::AlgebraicError;
use crate::render::{Format, RenderConfig, join_terms};
use crate::ring::{AlgebraicRing, QuadraticRing};

use serde::{Deserialize, Serialize};

use std::fmt;

/// The number (regular + surd·√d)/denominator of the ring of integers of Q(√d).
///
/// The denominator is 2 only in rings with d ≡ 1 (mod 4) and only when both
/// parts are odd; every constructor normalizes to that minimal form, so the
/// derived equality and hash compare the normalized tuple.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "QuadraticParts", into = "QuadraticParts")]
pub struct QuadraticInteger {
    regular: i64,
    surd: i64,
    denominator: i64,
    ring: QuadraticRing,
}

/// Unvalidated wire form of a [`QuadraticInteger`].
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
struct QuadraticParts {
    regular: i64,
    surd: i64,
    denominator: i64,
    radicand: i64,
}

impl QuadraticInteger {
    /// Create regular + surd·√d.
    pub fn new(regular: i64, surd: i64, ring: QuadraticRing) -> Self {
        QuadraticInteger {
            regular,
            surd,
            denominator: 1,
            ring,
        }
    }

    /// Create (regular + surd·√d)/denominator.
    ///
    /// # Errors
    ///
    /// Returns `AlgebraicError::NotInRing` if the value is not an algebraic
    /// integer of `ring`, and `AlgebraicError::DivisionByZero` for a zero
    /// denominator.
    ///
    /// # Example
    ///
    /// ```
    /// # use quad_rings::integer::QuadraticInteger;
    /// # use quad_rings::ring::QuadraticRing;
    /// let eisenstein = QuadraticRing::try_with(-3).unwrap();
    /// let omega = QuadraticInteger::with_denominator(-1, 1, 2, eisenstein).unwrap();
    /// assert_eq!(omega.denominator(), 2);
    ///
    /// // (4 + 2√−3)/2 is stored as 2 + √−3.
    /// let reduced = QuadraticInteger::with_denominator(4, 2, 2, eisenstein).unwrap();
    /// assert_eq!(reduced, QuadraticInteger::new(2, 1, eisenstein));
    ///
    /// let gaussian = QuadraticRing::try_with(-1).unwrap();
    /// assert!(QuadraticInteger::with_denominator(1, 1, 2, gaussian).is_err());
    /// ```
    pub fn with_denominator(
        regular: i64,
        surd: i64,
        denominator: i64,
        ring: QuadraticRing,
    ) -> Result<Self, AlgebraicError> {
        if denominator == 0 {
            return Err(AlgebraicError::DivisionByZero(format!(
                "{} + {}\u{221a}{}",
                regular,
                surd,
                ring.radicand()
            )));
        }
        Self::from_wide(regular as i128, surd as i128, denominator as i128, ring)
    }

    pub fn rational(value: i64, ring: QuadraticRing) -> Self {
        Self::new(value, 0, ring)
    }

    pub fn zero(ring: QuadraticRing) -> Self {
        Self::new(0, 0, ring)
    }

    /// Builds (x + y√d)/den from widened parts, reducing to the minimal
    /// denominator.
    pub(crate) fn from_wide(
        x: i128,
        y: i128,
        den: i128,
        ring: QuadraticRing,
    ) -> Result<Self, AlgebraicError> {
        let sign = den.signum();
        let (x, y, den) = (
            widened(x.checked_mul(sign))?,
            widened(y.checked_mul(sign))?,
            widened(den.checked_mul(sign))?,
        );
        let Some((x, y, den)) = snap_to_lattice(x, y, den, &ring) else {
            return Err(AlgebraicError::NotInRing(format!(
                "({} + {}\u{221a}{})/{} is not an algebraic integer of {}",
                x,
                y,
                ring.radicand(),
                den,
                ring
            )));
        };
        Self::from_lattice(x, y, den, ring)
    }

    /// Builds from a triple already reduced by [`snap_to_lattice`].
    pub(crate) fn from_lattice(
        x: i128,
        y: i128,
        den: i128,
        ring: QuadraticRing,
    ) -> Result<Self, AlgebraicError> {
        Ok(QuadraticInteger {
            regular: narrow(x)?,
            surd: narrow(y)?,
            denominator: den as i64,
            ring,
        })
    }

    pub(crate) fn wide_parts(&self) -> (i128, i128, i128) {
        (
            self.regular as i128,
            self.surd as i128,
            self.denominator as i128,
        )
    }

    pub fn regular_part(&self) -> i64 {
        self.regular
    }

    pub fn surd_part(&self) -> i64 {
        self.surd
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    pub fn quadratic_ring(&self) -> QuadraticRing {
        self.ring
    }

    pub fn is_zero(&self) -> bool {
        self.regular == 0 && self.surd == 0
    }

    /// Ring both operands can be combined in. Rational values fit in any
    /// quadratic ring; irrational values from different rings do not.
    fn common_ring(&self, other: &Self) -> Result<QuadraticRing, AlgebraicError> {
        if self.ring == other.ring || other.surd == 0 {
            Ok(self.ring)
        } else if self.surd == 0 {
            Ok(other.ring)
        } else {
            Err(AlgebraicError::degree_overflow(*self, *other, 4))
        }
    }

    /// Both operands over their common denominator.
    fn over_common_denominator(&self, other: &Self) -> ((i128, i128), (i128, i128), i128) {
        let den = self.denominator.max(other.denominator) as i128;
        let (own, theirs) = (
            den / self.denominator as i128,
            den / other.denominator as i128,
        );
        (
            (self.regular as i128 * own, self.surd as i128 * own),
            (other.regular as i128 * theirs, other.surd as i128 * theirs),
            den,
        )
    }

    pub fn plus(&self, addend: &Self) -> Result<Self, AlgebraicError> {
        let ring = self.common_ring(addend)?;
        let ((x1, y1), (x2, y2), den) = self.over_common_denominator(addend);
        Self::from_wide(x1 + x2, y1 + y2, den, ring)
            .map_err(|err| err.in_operation("Sum", self, addend))
    }

    pub fn minus(&self, subtrahend: &Self) -> Result<Self, AlgebraicError> {
        let ring = self.common_ring(subtrahend)?;
        let ((x1, y1), (x2, y2), den) = self.over_common_denominator(subtrahend);
        Self::from_wide(x1 - x2, y1 - y2, den, ring)
            .map_err(|err| err.in_operation("Difference", self, subtrahend))
    }

    /// (x1 + y1√d)(x2 + y2√d) = (x1x2 + d·y1y2) + (x1y2 + x2y1)√d.
    pub fn times(&self, multiplicand: &Self) -> Result<Self, AlgebraicError> {
        let ring = self.common_ring(multiplicand)?;
        self.product_parts(multiplicand, ring)
            .and_then(|(x, y, den)| Self::from_wide(x, y, den, ring))
            .map_err(|err| err.in_operation("Product", self, multiplicand))
    }

    fn product_parts(
        &self,
        other: &Self,
        ring: QuadraticRing,
    ) -> Result<(i128, i128, i128), AlgebraicError> {
        let d = ring.radicand() as i128;
        let (x1, y1, e1) = self.wide_parts();
        let (x2, y2, e2) = other.wide_parts();
        let x = widened((y1 * y2).checked_mul(d).and_then(|t| t.checked_add(x1 * x2)))?;
        let y = widened((x1 * y2).checked_add(x2 * y1))?;
        Ok((x, y, e1 * e2))
    }

    /// Exact division on the lattice.
    ///
    /// # Errors
    ///
    /// Returns `AlgebraicError::NotDivisible` carrying the bounding lattice
    /// points when the quotient exists only in the field of fractions.
    pub fn divides(&self, divisor: &Self) -> Result<Self, AlgebraicError> {
        self.divide_or_bound(divisor)?
            .exact_or_not_divisible(*self, *divisor)
    }

    /// Divides, handing back the bounding lattice points instead of failing
    /// when the quotient is not a lattice point.
    pub fn divide_or_bound(&self, divisor: &Self) -> Result<Division<Self>, AlgebraicError> {
        let ring = self.common_ring(divisor)?;
        if divisor.is_zero() {
            return Err(AlgebraicError::DivisionByZero(self.to_string()));
        }

        self.field_division(divisor, ring)
            .map_err(|err| err.in_operation("Quotient", self, divisor))
    }

    fn field_division(
        &self,
        divisor: &Self,
        ring: QuadraticRing,
    ) -> Result<Division<Self>, AlgebraicError> {
        let quotient = FieldQuotient::of(self, divisor, ring)?;
        match quotient.lattice_point()? {
            Some(exact) => Ok(Division::Exact(exact)),
            None => Ok(Division::Inexact(quotient.bounding()?)),
        }
    }

    pub fn plus_int(&self, addend: i64) -> Result<Self, AlgebraicError> {
        self.plus(&Self::rational(addend, self.ring))
    }

    pub fn minus_int(&self, subtrahend: i64) -> Result<Self, AlgebraicError> {
        self.minus(&Self::rational(subtrahend, self.ring))
    }

    pub fn times_int(&self, multiplicand: i64) -> Result<Self, AlgebraicError> {
        self.times(&Self::rational(multiplicand, self.ring))
    }

    pub fn divides_int(&self, divisor: i64) -> Result<Self, AlgebraicError> {
        self.divides(&Self::rational(divisor, self.ring))
    }

    pub fn negate(&self) -> Result<Self, AlgebraicError> {
        let (x, y, den) = self.wide_parts();
        Self::from_lattice(-x, -y, den, self.ring)
    }

    /// The Galois conjugate (regular − surd·√d)/denominator.
    pub fn conjugate(&self) -> Result<Self, AlgebraicError> {
        let (x, y, den) = self.wide_parts();
        Self::from_lattice(x, -y, den, self.ring)
    }

    /// (real, imaginary) parts of the number under the embedding with
    /// √d > 0 for d > 0 and √d = i·√|d| for d < 0.
    pub fn numeric_parts(&self) -> (f64, f64) {
        let den = self.denominator as f64;
        let root = (self.ring.radicand() as f64).abs().sqrt();
        if self.ring.is_purely_real() {
            ((self.regular as f64 + self.surd as f64 * root) / den, 0.0)
        } else {
            (self.regular as f64 / den, self.surd as f64 * root / den)
        }
    }

    /// Absolute value, or complex modulus for imaginary rings.
    pub fn abs(&self) -> f64 {
        let (re, im) = self.numeric_parts();
        re.hypot(im)
    }

    /// Coefficients `[c0, c1, c2]` of the monic minimal polynomial
    /// c0 + c1·x + c2·x², lowest degree first.
    ///
    /// # Example
    ///
    /// ```
    /// # use quad_rings::integer::QuadraticInteger;
    /// # use quad_rings::ring::QuadraticRing;
    /// let ring = QuadraticRing::try_with(-5).unwrap();
    /// let z = QuadraticInteger::new(1, 1, ring);
    /// assert_eq!(z.min_polynomial().unwrap(), [6, -2, 1]);
    /// ```
    pub fn min_polynomial(&self) -> Result<[i64; 3], AlgebraicError> {
        match self.algebraic_degree() {
            0 => Ok([0, 1, 0]),
            1 => Ok([narrow(-(self.regular as i128))?, 1, 0]),
            _ => Ok([self.norm()?, narrow(-(self.trace()? as i128))?, 1]),
        }
    }

    pub fn min_polynomial_string(&self, format: Format) -> Result<String, AlgebraicError> {
        let terms: Vec<(i128, String)> = self
            .min_polynomial()?
            .iter()
            .enumerate()
            .rev()
            .map(|(power, &c)| (c as i128, format.variable_power(power as u32)))
            .collect();
        Ok(join_terms(format, &terms))
    }

    /// Plain rendering in θ notation (a + bθ, θ = (1 + √d)/2) for rings with
    /// half-integers; the usual rendering otherwise.
    pub fn to_string_alt(&self) -> String {
        let config = RenderConfig {
            theta_notation: true,
            ..RenderConfig::default()
        };
        self.render(Format::Plain, &config)
    }

    fn theta_terms(&self, format: Format) -> Vec<(i128, String)> {
        let (x, y, den) = self.wide_parts();
        // (x + y√d)/2 = (x − y)/2 + yθ and x + y√d = (x − y) + 2yθ.
        let (a, b) = if den == 2 { ((x - y) / 2, y) } else { (x - y, 2 * y) };
        vec![
            (a, String::new()),
            (b, format.theta(self.ring.radicand()).to_string()),
        ]
    }
}

impl AlgebraicInteger for QuadraticInteger {
    /// (regular² − d·surd²)/denominator².
    fn norm(&self) -> Result<i64, AlgebraicError> {
        let (x, y, den) = self.wide_parts();
        let d = self.ring.radicand() as i128;
        let numerator = widened((y * y).checked_mul(d).and_then(|t| (x * x).checked_sub(t)))?;
        narrow(numerator / (den * den))
    }

    fn trace(&self) -> Result<i64, AlgebraicError> {
        let (x, _, den) = self.wide_parts();
        narrow(2 * x / den)
    }

    fn algebraic_degree(&self) -> u32 {
        match (self.regular, self.surd) {
            (0, 0) => 0,
            (_, 0) => 1,
            _ => 2,
        }
    }

    fn ring(&self) -> AlgebraicRing {
        AlgebraicRing::Quadratic(self.ring)
    }

    fn render(&self, format: Format, config: &RenderConfig) -> String {
        if config.theta_notation && self.ring.has_half_integers() {
            return join_terms(format, &self.theta_terms(format));
        }

        let terms = [
            (self.regular as i128, String::new()),
            (self.surd as i128, format.radical(self.ring.radicand())),
        ];
        let body = join_terms(format, &terms);
        if self.denominator == 2 {
            format.halved(&body)
        } else {
            body
        }
    }

    fn is_in_ring(&self, ring: &AlgebraicRing) -> bool {
        match ring {
            AlgebraicRing::Quadratic(other) => *other == self.ring || self.surd == 0,
            AlgebraicRing::Zeta8 => self.surd == 0 || matches!(self.ring.radicand(), -1 | 2 | -2),
            AlgebraicRing::Integers => self.surd == 0,
        }
    }
}

impl fmt::Display for QuadraticInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Format::Plain, &RenderConfig::default()))
    }
}

impl From<QuadraticInteger> for QuadraticParts {
    fn from(value: QuadraticInteger) -> Self {
        QuadraticParts {
            regular: value.regular,
            surd: value.surd,
            denominator: value.denominator,
            radicand: value.ring.radicand(),
        }
    }
}

impl TryFrom<QuadraticParts> for QuadraticInteger {
    type Error = AlgebraicError;

    fn try_from(parts: QuadraticParts) -> Result<Self, Self::Error> {
        let ring = QuadraticRing::try_with(parts.radicand)?;
        QuadraticInteger::with_denominator(parts.regular, parts.surd, parts.denominator, ring)
    }
}
