//! Integers of the eighth cyclotomic field Q(ζ₈).
//!
//! Z[ζ₈] contains the Gaussian integers (ζ₈² = i) as well as Z[√2] and
//! Z[√−2] (√2 = ζ₈ − ζ₈³, √−2 = ζ₈ + ζ₈³), so it is the common ring in which
//! numbers from those three quadratic rings can be combined.

use super::helper::{narrow, widened};
use super::{AlgebraicInteger, Division, QuadraticInteger};
use crate::errors::AlgebraicError;
use crate::render::{Format, RenderConfig, join_terms};
use crate::ring::AlgebraicRing;

use num_bigint::BigInt;
use num_integer::Integer;
use serde::{Deserialize, Serialize};

use std::fmt;

/// a0 + a1·ζ₈ + a2·ζ₈² + a3·ζ₈³, reduced with ζ₈⁴ = −1.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Zeta8Integer {
    coefficients: [i64; 4],
}

impl Zeta8Integer {
    pub fn new(coefficients: [i64; 4]) -> Self {
        Zeta8Integer { coefficients }
    }

    pub fn from_integer(value: i64) -> Self {
        Self::new([value, 0, 0, 0])
    }

    /// The primitive eighth root of unity e^(iπ/4).
    pub fn zeta() -> Self {
        Self::new([0, 1, 0, 0])
    }

    pub fn coefficients(&self) -> [i64; 4] {
        self.coefficients
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients == [0; 4]
    }

    fn from_wide(coefficients: [i128; 4]) -> Result<Self, AlgebraicError> {
        let mut narrowed = [0i64; 4];
        for (slot, value) in narrowed.iter_mut().zip(coefficients) {
            *slot = narrow(value)?;
        }
        Ok(Self::new(narrowed))
    }

    fn wide(&self) -> [i128; 4] {
        self.coefficients.map(i128::from)
    }

    pub fn plus(&self, addend: &Self) -> Result<Self, AlgebraicError> {
        let (a, b) = (self.wide(), addend.wide());
        Self::from_wide([a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3]])
            .map_err(|err| err.in_operation("Sum", self, addend))
    }

    pub fn minus(&self, subtrahend: &Self) -> Result<Self, AlgebraicError> {
        let (a, b) = (self.wide(), subtrahend.wide());
        Self::from_wide([a[0] - b[0], a[1] - b[1], a[2] - b[2], a[3] - b[3]])
            .map_err(|err| err.in_operation("Difference", self, subtrahend))
    }

    pub fn times(&self, multiplicand: &Self) -> Result<Self, AlgebraicError> {
        self.convolve(multiplicand)
            .and_then(Self::from_wide)
            .map_err(|err| err.in_operation("Product", self, multiplicand))
    }

    /// Polynomial product modulo x⁴ + 1.
    fn convolve(&self, other: &Self) -> Result<[i128; 4], AlgebraicError> {
        let (a, b) = (self.wide(), other.wide());
        let mut product = [0i128; 4];
        for (i, j) in itertools::iproduct!(0..4, 0..4) {
            let term = a[i] * b[j];
            let k = i + j;
            product[k % 4] = if k < 4 {
                widened(product[k].checked_add(term))?
            } else {
                widened(product[k - 4].checked_sub(term))?
            };
        }
        Ok(product)
    }

    pub fn divides(&self, divisor: &Self) -> Result<Self, AlgebraicError> {
        self.divide_or_bound(divisor)?
            .exact_or_not_divisible(*self, *divisor)
    }

    /// Divides through the norm: a/b = a·σ₃(b)·σ₅(b)·σ₇(b) / N(b).
    ///
    /// An inexact quotient yields a single candidate, the lattice point
    /// obtained by rounding each coefficient to the nearest integer.
    pub fn divide_or_bound(&self, divisor: &Self) -> Result<Division<Self>, AlgebraicError> {
        if divisor.is_zero() {
            return Err(AlgebraicError::DivisionByZero(self.to_string()));
        }
        self.divide_through_norm(divisor)
            .map_err(|err| err.in_operation("Quotient", self, divisor))
    }

    fn divide_through_norm(&self, divisor: &Self) -> Result<Division<Self>, AlgebraicError> {
        let cofactor = divisor
            .galois_conjugate(3)?
            .times(&divisor.galois_conjugate(5)?)?
            .times(&divisor.galois_conjugate(7)?)?;
        let numerator = self.convolve(&cofactor)?;
        let norm = i128::from(divisor.norm()?);

        if numerator.iter().all(|c| c % norm == 0) {
            return Ok(Division::Exact(Self::from_wide(numerator.map(|c| c / norm))?));
        }

        let mut rounded = [0i128; 4];
        for (slot, c) in rounded.iter_mut().zip(numerator) {
            let doubled = widened(c.checked_mul(2).and_then(|t| t.checked_add(norm)))?;
            *slot = Integer::div_floor(&doubled, &(2 * norm));
        }
        Ok(Division::Inexact(vec![Self::from_wide(rounded)?]))
    }

    pub fn plus_int(&self, addend: i64) -> Result<Self, AlgebraicError> {
        self.plus(&Self::from_integer(addend))
    }

    pub fn minus_int(&self, subtrahend: i64) -> Result<Self, AlgebraicError> {
        self.minus(&Self::from_integer(subtrahend))
    }

    pub fn times_int(&self, multiplicand: i64) -> Result<Self, AlgebraicError> {
        self.times(&Self::from_integer(multiplicand))
    }

    pub fn divides_int(&self, divisor: i64) -> Result<Self, AlgebraicError> {
        self.divides(&Self::from_integer(divisor))
    }

    pub fn negate(&self) -> Result<Self, AlgebraicError> {
        Self::from_wide(self.wide().map(|c| -c))
    }

    /// Image under σ_k: ζ₈ ↦ ζ₈^k, for odd k.
    fn galois_conjugate(&self, k: usize) -> Result<Self, AlgebraicError> {
        let mut image = [0i128; 4];
        for (j, c) in self.wide().into_iter().enumerate() {
            let power = (j * k) % 8;
            if power < 4 {
                image[power] += c;
            } else {
                image[power - 4] -= c;
            }
        }
        Self::from_wide(image)
    }

    /// Complex conjugate, the image under ζ₈ ↦ ζ₈⁷.
    pub fn conjugate(&self) -> Result<Self, AlgebraicError> {
        self.galois_conjugate(7)
    }

    /// Real and imaginary parts, with ζ₈ = (1 + i)/√2.
    pub fn numeric_parts(&self) -> (f64, f64) {
        let [a0, a1, a2, a3] = self.coefficients.map(|c| c as f64);
        let half_root = std::f64::consts::FRAC_1_SQRT_2;
        (a0 + (a1 - a3) * half_root, a2 + (a1 + a3) * half_root)
    }

    pub fn abs(&self) -> f64 {
        let (re, im) = self.numeric_parts();
        re.hypot(im)
    }
}

impl AlgebraicInteger for Zeta8Integer {
    /// Norm to Q(i) first, then |·|² of that Gaussian number.
    fn norm(&self) -> Result<i64, AlgebraicError> {
        let [a0, a1, a2, a3] = self.coefficients.map(BigInt::from);
        let re = &a0 * &a0 - &a2 * &a2 + BigInt::from(2) * &a1 * &a3;
        let im = BigInt::from(2) * &a0 * &a2 - &a1 * &a1 + &a3 * &a3;
        narrow(&re * &re + &im * &im)
    }

    fn trace(&self) -> Result<i64, AlgebraicError> {
        narrow(4 * i128::from(self.coefficients[0]))
    }

    fn algebraic_degree(&self) -> u32 {
        match self.coefficients {
            [0, 0, 0, 0] => 0,
            [_, 0, 0, 0] => 1,
            [_, 0, _, 0] => 2,
            [_, a1, 0, a3] if a3 == a1 || a3 == -a1 => 2,
            _ => 4,
        }
    }

    fn ring(&self) -> AlgebraicRing {
        AlgebraicRing::Zeta8
    }

    fn render(&self, format: Format, _config: &RenderConfig) -> String {
        let terms: Vec<(i128, String)> = self
            .coefficients
            .iter()
            .enumerate()
            .map(|(power, &c)| {
                let unit = match power {
                    0 => String::new(),
                    p => format.zeta8_power(p as u32),
                };
                (c as i128, unit)
            })
            .collect();
        join_terms(format, &terms)
    }

    fn is_in_ring(&self, ring: &AlgebraicRing) -> bool {
        let [_, a1, a2, a3] = self.coefficients;
        match ring {
            AlgebraicRing::Zeta8 => true,
            AlgebraicRing::Integers => self.algebraic_degree() <= 1,
            AlgebraicRing::Quadratic(quadratic) => match quadratic.radicand() {
                -1 => a1 == 0 && a3 == 0,
                2 => a2 == 0 && a3 == -a1,
                -2 => a2 == 0 && a3 == a1,
                _ => self.algebraic_degree() <= 1,
            },
        }
    }
}

impl fmt::Display for Zeta8Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Format::Plain, &RenderConfig::default()))
    }
}

impl TryFrom<&QuadraticInteger> for Zeta8Integer {
    type Error = AlgebraicError;

    /// Embeds numbers of Z[i], Z[√2] and Z[√−2], and rational integers of any
    /// quadratic ring.
    fn try_from(value: &QuadraticInteger) -> Result<Self, Self::Error> {
        let (x, y) = (i128::from(value.regular_part()), i128::from(value.surd_part()));
        if y == 0 {
            return Self::from_wide([x, 0, 0, 0]);
        }
        match value.quadratic_ring().radicand() {
            -1 => Self::from_wide([x, 0, y, 0]),
            2 => Self::from_wide([x, y, 0, -y]),
            -2 => Self::from_wide([x, y, 0, y]),
            _ => Err(AlgebraicError::NotInRing(format!(
                "{} does not lie in Z[\u{3b6}\u{2088}]",
                value
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::QuadraticRing;

    #[test]
    fn test_powers_of_zeta() -> Result<(), AlgebraicError> {
        let zeta = Zeta8Integer::zeta();
        let mut power = Zeta8Integer::from_integer(1);
        for _ in 0..4 {
            power = power.times(&zeta)?;
        }
        assert_eq!(power, Zeta8Integer::from_integer(-1));
        assert_eq!(power.times(&power)?, Zeta8Integer::from_integer(1));
        Ok(())
    }

    #[test]
    fn test_norm_and_trace() -> Result<(), AlgebraicError> {
        assert_eq!(Zeta8Integer::new([1, 1, 0, 0]).norm()?, 2);
        assert_eq!(Zeta8Integer::zeta().norm()?, 1);
        assert_eq!(Zeta8Integer::from_integer(3).norm()?, 81);
        // 1 + i has norm 2 in Q(i), hence 4 in Q(ζ₈).
        assert_eq!(Zeta8Integer::new([1, 0, 1, 0]).norm()?, 4);
        assert_eq!(Zeta8Integer::new([5, 7, 1, 2]).trace()?, 20);
        assert!(Zeta8Integer::zeta().is_unit());
        Ok(())
    }

    #[test]
    fn test_division() -> Result<(), AlgebraicError> {
        let a = Zeta8Integer::new([1, 1, 0, 0]);
        let b = Zeta8Integer::new([2, 0, -1, 3]);
        let product = a.times(&b)?;
        assert_eq!(product.divides(&a)?, b);
        assert_eq!(product.divides(&b)?, a);

        let three = Zeta8Integer::from_integer(3);
        assert_eq!(
            three.divide_or_bound(&Zeta8Integer::from_integer(2))?,
            Division::Inexact(vec![Zeta8Integer::from_integer(2)])
        );
        assert!(matches!(
            three.divides(&Zeta8Integer::new([0; 4])),
            Err(AlgebraicError::DivisionByZero(_))
        ));
        Ok(())
    }

    #[test]
    fn test_degrees() {
        assert_eq!(Zeta8Integer::new([0; 4]).algebraic_degree(), 0);
        assert_eq!(Zeta8Integer::from_integer(-4).algebraic_degree(), 1);
        assert_eq!(Zeta8Integer::new([1, 0, 1, 0]).algebraic_degree(), 2);
        assert_eq!(Zeta8Integer::new([0, 1, 0, -1]).algebraic_degree(), 2);
        assert_eq!(Zeta8Integer::new([0, 1, 0, 1]).algebraic_degree(), 2);
        assert_eq!(Zeta8Integer::zeta().algebraic_degree(), 4);
    }

    #[test]
    fn test_embedding_of_quadratic_subrings() -> Result<(), AlgebraicError> {
        let root2 = QuadraticInteger::new(0, 1, QuadraticRing::try_with(2)?);
        let embedded = Zeta8Integer::try_from(&root2)?;
        assert_eq!(embedded, Zeta8Integer::new([0, 1, 0, -1]));
        assert_eq!(embedded.times(&embedded)?, Zeta8Integer::from_integer(2));
        assert!(embedded.is_in_ring(&AlgebraicRing::Quadratic(QuadraticRing::try_with(2)?)));

        let root_minus2 = QuadraticInteger::new(0, 1, QuadraticRing::try_with(-2)?);
        let embedded = Zeta8Integer::try_from(&root_minus2)?;
        assert_eq!(embedded.times(&embedded)?, Zeta8Integer::from_integer(-2));

        let root_minus5 = QuadraticInteger::new(0, 1, QuadraticRing::try_with(-5)?);
        assert!(Zeta8Integer::try_from(&root_minus5).is_err());
        Ok(())
    }

    #[test]
    fn test_conjugate_and_numeric_parts() -> Result<(), AlgebraicError> {
        let z = Zeta8Integer::new([1, 1, 0, 0]);
        let modulus = z.times(&z.conjugate()?)?;
        let (re, im) = modulus.numeric_parts();
        assert!((re - z.abs() * z.abs()).abs() < 1e-9);
        assert!(im.abs() < 1e-9);
        let (re, im) = Zeta8Integer::zeta().numeric_parts();
        assert!((re - im).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_renderings() {
        let z = Zeta8Integer::new([1, 1, 0, 0]);
        assert_eq!(z.to_ascii_string(), "1 + zeta8");
        assert_eq!(z.to_string(), "1 + \u{3b6}\u{2088}");
        let w = Zeta8Integer::new([0, 0, 1, -1]);
        assert_eq!(w.to_ascii_string(), "zeta8^2 - zeta8^3");
        assert_eq!(w.to_tex_string(), "\\zeta_8^2 - \\zeta_8^3");
        assert_eq!(Zeta8Integer::new([0; 4]).to_ascii_string(), "0");
    }
}
