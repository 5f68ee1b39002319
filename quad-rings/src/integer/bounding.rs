//! Divisibility on the lattice of a quadratic ring.
//!
//! A quotient a/b always exists in the field Q(√d). [`FieldQuotient`] holds it
//! exactly as (P + Q√d)/D and decides whether it is a lattice point of the
//! ring; when it is not, [`FieldQuotient::bounding`] lists the lattice points
//! around it as candidate quotients.

use super::QuadraticInteger;
use super::helper::widened;
use crate::errors::AlgebraicError;
use crate::ring::QuadraticRing;

use itertools::{Itertools, iproduct};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Signed;

/// Reduces (x + y√d)/den, den > 0, to a lattice point of `ring` if it is one.
///
/// Returns the minimal-denominator triple: denominator 1, or 2 with both
/// parts odd in rings with half-integers.
pub(crate) fn snap_to_lattice(
    x: i128,
    y: i128,
    den: i128,
    ring: &QuadraticRing,
) -> Option<(i128, i128, i128)> {
    if x % den == 0 && y % den == 0 {
        return Some((x / den, y / den, 1));
    }
    if ring.has_half_integers() && den % 2 == 0 {
        let half = den / 2;
        if x % half == 0 && y % half == 0 {
            let (m, n) = (x / half, y / half);
            if (m & 1) == (n & 1) {
                return Some((m, n, 2));
            }
        }
    }
    None
}

/// An element (P + Q√d)/D of Q(√d), D > 0, in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldQuotient {
    regular: i128,
    surd: i128,
    denominator: i128,
    ring: QuadraticRing,
}

impl FieldQuotient {
    /// Exact quotient `dividend / divisor` in the field of fractions, computed
    /// as dividend · conjugate(divisor) / norm(divisor).
    pub fn of(
        dividend: &QuadraticInteger,
        divisor: &QuadraticInteger,
        ring: QuadraticRing,
    ) -> Result<Self, AlgebraicError> {
        let d = ring.radicand() as i128;
        let (x1, y1, e1) = dividend.wide_parts();
        let (x2, y2, e2) = divisor.wide_parts();

        let norm_numerator = widened((y2 * y2).checked_mul(d).and_then(|t| (x2 * x2).checked_sub(t)))?;
        if norm_numerator == 0 {
            return Err(AlgebraicError::DivisionByZero(dividend.to_string()));
        }

        let regular = widened(
            (y1 * y2)
                .checked_mul(d)
                .and_then(|t| (x1 * x2).checked_sub(t))
                .and_then(|t| t.checked_mul(e2)),
        )?;
        let surd = widened(
            (y1 * x2)
                .checked_sub(x1 * y2)
                .and_then(|t| t.checked_mul(e2)),
        )?;
        let denominator = widened(norm_numerator.checked_mul(e1))?;

        let sign = denominator.signum();
        let common = regular.gcd(&surd).gcd(&denominator);
        Ok(FieldQuotient {
            regular: widened(regular.checked_mul(sign))? / common,
            surd: widened(surd.checked_mul(sign))? / common,
            denominator: widened(denominator.checked_mul(sign))? / common,
            ring,
        })
    }

    /// (P, Q, D) of the reduced quotient.
    pub fn parts(&self) -> (i128, i128, i128) {
        (self.regular, self.surd, self.denominator)
    }

    /// The quotient as a ring element when it lies on the lattice.
    pub fn lattice_point(&self) -> Result<Option<QuadraticInteger>, AlgebraicError> {
        snap_to_lattice(self.regular, self.surd, self.denominator, &self.ring)
            .map(|(x, y, den)| QuadraticInteger::from_lattice(x, y, den, self.ring))
            .transpose()
    }

    /// Up to four lattice points surrounding the quotient, nearest first.
    ///
    /// Distance is |N(q − c)|, which for imaginary rings is the squared
    /// Euclidean distance in the complex plane. Ties are ordered by ascending
    /// regular, then surd coordinate.
    pub fn bounding(&self) -> Result<Vec<QuadraticInteger>, AlgebraicError> {
        let (p, q, den) = self.parts();

        // Candidates in half-units (m + n√d)/2.
        let half_units: Vec<(i128, i128)> = if self.ring.has_half_integers() {
            let floor_m = Integer::div_floor(&widened(p.checked_mul(2))?, &den);
            floor_and_ceiling(widened(q.checked_mul(2))?, den)
                .into_iter()
                .flat_map(|n| {
                    let low = if (floor_m - n) % 2 == 0 { floor_m } else { floor_m - 1 };
                    [(low, n), (low + 2, n)]
                })
                .collect()
        } else {
            iproduct!(floor_and_ceiling(p, den), floor_and_ceiling(q, den))
                .map(|(r, s)| Ok((widened(r.checked_mul(2))?, widened(s.checked_mul(2))?)))
                .collect::<Result<_, AlgebraicError>>()?
        };

        half_units
            .into_iter()
            .map(|(m, n)| (self.distance_key(m, n), m, n))
            .sorted()
            .dedup()
            .map(|(_, m, n)| QuadraticInteger::from_wide(m, n, 2, self.ring))
            .collect()
    }

    /// |N(q − c)| scaled by (2D)² for the candidate c = (m + n√d)/2.
    fn distance_key(&self, m: i128, n: i128) -> BigInt {
        let two = BigInt::from(2);
        let den = BigInt::from(self.denominator);
        let dx = BigInt::from(self.regular) * &two - BigInt::from(m) * &den;
        let dy = BigInt::from(self.surd) * &two - BigInt::from(n) * &den;
        (&dx * &dx - BigInt::from(self.ring.radicand()) * &dy * &dy).abs()
    }
}

fn floor_and_ceiling(numerator: i128, den: i128) -> Vec<i128> {
    let (floor, remainder) = Integer::div_mod_floor(&numerator, &den);
    if remainder == 0 {
        vec![floor]
    } else {
        vec![floor, floor + 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(d: i64) -> QuadraticRing {
        QuadraticRing::try_with(d).unwrap()
    }

    #[test]
    fn test_snap_to_lattice() {
        assert_eq!(snap_to_lattice(6, -4, 2, &ring(-5)), Some((3, -2, 1)));
        assert_eq!(snap_to_lattice(3, 1, 2, &ring(-5)), None);
        assert_eq!(snap_to_lattice(3, 1, 2, &ring(-3)), Some((3, 1, 2)));
        assert_eq!(snap_to_lattice(3, 2, 2, &ring(-3)), None);
        assert_eq!(snap_to_lattice(-9, 3, 6, &ring(5)), Some((-3, 1, 2)));
    }

    #[test]
    fn test_quotient_in_lowest_terms() -> Result<(), AlgebraicError> {
        let r = ring(-5);
        let a = QuadraticInteger::new(29, 0, r);
        let b = QuadraticInteger::new(6, 4, r);
        let quotient = FieldQuotient::of(&a, &b, r)?;
        // 29 / (6 + 4√−5) = (3 − 2√−5)/2
        assert_eq!(quotient.parts(), (3, -2, 2));
        assert_eq!(quotient.lattice_point()?, None);
        Ok(())
    }

    #[test]
    fn test_bounding_square_lattice() -> Result<(), AlgebraicError> {
        let r = ring(-5);
        let quotient = FieldQuotient::of(
            &QuadraticInteger::new(29, 0, r),
            &QuadraticInteger::new(6, 4, r),
            r,
        )?;
        // 3/2 − √−5 sits midway between 1 − √−5 and 2 − √−5.
        assert_eq!(
            quotient.bounding()?,
            vec![QuadraticInteger::new(1, -1, r), QuadraticInteger::new(2, -1, r)]
        );
        Ok(())
    }

    #[test]
    fn test_bounding_four_corners() -> Result<(), AlgebraicError> {
        let r = ring(-5);
        let quotient = FieldQuotient::of(
            &QuadraticInteger::new(1, 1, r),
            &QuadraticInteger::new(2, 0, r),
            r,
        )?;
        let candidates = quotient.bounding()?;
        assert_eq!(candidates.len(), 4);
        assert_eq!(
            candidates,
            vec![
                QuadraticInteger::new(0, 0, r),
                QuadraticInteger::new(0, 1, r),
                QuadraticInteger::new(1, 0, r),
                QuadraticInteger::new(1, 1, r),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_bounding_half_integer_lattice() -> Result<(), AlgebraicError> {
        let r = ring(-3);
        // 1/2 lies midway between 0 and 1 on the real axis of O_Q(√−3).
        let quotient = FieldQuotient::of(
            &QuadraticInteger::new(1, 0, r),
            &QuadraticInteger::new(2, 0, r),
            r,
        )?;
        let candidates = quotient.bounding()?;
        assert!(candidates.len() <= 4);
        assert!(candidates.contains(&QuadraticInteger::new(0, 0, r)));
        assert!(candidates.contains(&QuadraticInteger::new(1, 0, r)));
        for candidate in &candidates {
            let lattice = snap_to_lattice(
                candidate.regular_part() as i128,
                candidate.surd_part() as i128,
                candidate.denominator() as i128,
                &r,
            );
            assert!(lattice.is_some());
        }
        Ok(())
    }
}
