//! # Euclidean GCD recovery
//!
//! The textbook Euclidean algorithm, run in a quadratic ring that may not be
//! Euclidean. Whenever a division step is inexact, the bounding lattice
//! points of the true quotient are tried in order and the first one leaving a
//! remainder of strictly smaller absolute norm is taken. If none does, the run
//! stops and reports the farthest point it reached instead of a GCD.
//!
//! The outcome carries an explicit certification flag. Its value also keeps
//! the historical sign convention: a certified GCD has a non-negative regular
//! part, an uncertified one a negative regular part.

use crate::errors::AlgebraicError;
use crate::integer::{AlgebraicInteger, Division, QuadraticInteger, RingInteger};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Result of [`euclidean_gcd`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcdOutcome {
    value: QuadraticInteger,
    certified: bool,
}

impl GcdOutcome {
    /// The GCD when certified, otherwise the last divisor the run reached.
    /// Its regular part is negative exactly when the outcome is not
    /// certified and the reached value has a nonzero regular part.
    pub fn value(&self) -> QuadraticInteger {
        self.value
    }

    /// Whether the remainders reached zero, so that `value` is a GCD.
    pub fn is_certified(&self) -> bool {
        self.certified
    }
}

/// Runs the Euclidean GCD recovery on two integers of the same ring.
///
/// # Errors
///
/// * `AlgebraicError::DegreeOverflow` if the operands come from different
///   rings. It carries both operands and the larger of their degrees and is
///   raised before any arithmetic.
/// * `AlgebraicError::UnsupportedDomain` if the operands are not quadratic
///   integers.
/// * `AlgebraicError::ArithmeticOverflow` if an intermediate value leaves the
///   64-bit range.
///
/// # Example
///
/// ```
/// # use quad_rings::euclid::euclidean_gcd;
/// # use quad_rings::integer::{QuadraticInteger, RingInteger};
/// # use quad_rings::ring::QuadraticRing;
/// let ring = QuadraticRing::try_with(-5).unwrap();
/// let a = RingInteger::from(QuadraticInteger::rational(29, ring));
/// let b = RingInteger::from(QuadraticInteger::new(6, 4, ring));
///
/// let outcome = euclidean_gcd(&a, &b).unwrap();
/// assert!(outcome.is_certified());
/// assert_eq!(outcome.value(), QuadraticInteger::new(3, 2, ring));
/// ```
pub fn euclidean_gcd(a: &RingInteger, b: &RingInteger) -> Result<GcdOutcome, AlgebraicError> {
    if a.ring() != b.ring() {
        let degree = a.algebraic_degree().max(b.algebraic_degree());
        return Err(AlgebraicError::degree_overflow(*a, *b, degree));
    }

    match (a, b) {
        (RingInteger::Quadratic(a), RingInteger::Quadratic(b)) => quadratic_gcd(a, b),
        _ => Err(AlgebraicError::UnsupportedDomain {
            first: Box::new(*a),
            second: Box::new(*b),
        }),
    }
}

/// [`euclidean_gcd`] for two quadratic integers.
///
/// # Errors
///
/// Same as [`euclidean_gcd`]. Operands from different rings give
/// `AlgebraicError::DegreeOverflow` with the larger of their degrees.
pub fn quadratic_gcd(
    a: &QuadraticInteger,
    b: &QuadraticInteger,
) -> Result<GcdOutcome, AlgebraicError> {
    if a.quadratic_ring() != b.quadratic_ring() {
        let degree = a.algebraic_degree().max(b.algebraic_degree());
        return Err(AlgebraicError::degree_overflow(*a, *b, degree));
    }

    let (mut curr_a, mut curr_b) = if abs_norm(b)? > abs_norm(a)? {
        (*b, *a)
    } else {
        (*a, *b)
    };
    let mut certified = true;

    while !curr_b.is_zero() {
        let step = remainder_step(&curr_a, &curr_b)?;
        debug!(
            "{} = {} \u{b7} q + {} ({})",
            curr_a,
            curr_b,
            step.remainder,
            if step.accepted { "accepted" } else { "no smaller remainder" }
        );
        curr_a = curr_b;
        curr_b = step.remainder;
        if !step.accepted {
            certified = false;
            break;
        }
    }

    let leading = curr_a.regular_part();
    let value = if (leading < 0 && certified) || (leading > 0 && !certified) {
        curr_a.negate()?
    } else {
        curr_a
    };
    debug!("GCD run ended at {} (certified: {})", value, certified);

    Ok(GcdOutcome { value, certified })
}

/// One division with remainder.
struct Step {
    remainder: QuadraticInteger,
    /// False when no candidate quotient shrank the norm; `remainder` is then
    /// the one left by the last candidate tried.
    accepted: bool,
}

fn remainder_step(
    dividend: &QuadraticInteger,
    divisor: &QuadraticInteger,
) -> Result<Step, AlgebraicError> {
    let candidates = match dividend.divide_or_bound(divisor)? {
        Division::Exact(quotient) => {
            return Ok(Step {
                remainder: dividend.minus(&quotient.times(divisor)?)?,
                accepted: true,
            });
        }
        Division::Inexact(candidates) => candidates,
    };

    let bound = abs_norm(divisor)?;
    let mut remainder = *dividend;
    for candidate in candidates {
        remainder = dividend.minus(&candidate.times(divisor)?)?;
        if abs_norm(&remainder)? < bound {
            return Ok(Step {
                remainder,
                accepted: true,
            });
        }
        trace!(
            "Candidate quotient {} leaves {} with norm not below {}",
            candidate, remainder, bound
        );
    }

    Ok(Step {
        remainder,
        accepted: false,
    })
}

fn abs_norm(value: &QuadraticInteger) -> Result<u64, AlgebraicError> {
    Ok(value.norm()?.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integer::{UnaryInteger, Zeta8Integer};
    use crate::ring::QuadraticRing;

    fn ring(d: i64) -> QuadraticRing {
        QuadraticRing::try_with(d).unwrap()
    }

    #[test]
    fn test_certified_gcd_in_z_sqrt_minus_5() -> Result<(), AlgebraicError> {
        let r = ring(-5);
        let outcome = quadratic_gcd(
            &QuadraticInteger::rational(29, r),
            &QuadraticInteger::new(6, 4, r),
        )?;
        assert!(outcome.is_certified());
        assert_eq!(outcome.value(), QuadraticInteger::new(3, 2, r));
        Ok(())
    }

    #[test]
    fn test_argument_order_does_not_matter() -> Result<(), AlgebraicError> {
        let r = ring(-5);
        let a = QuadraticInteger::rational(29, r);
        let b = QuadraticInteger::new(6, 4, r);
        assert_eq!(quadratic_gcd(&a, &b)?, quadratic_gcd(&b, &a)?);
        Ok(())
    }

    #[test]
    fn test_stuck_run_is_flagged() -> Result<(), AlgebraicError> {
        let r = ring(-5);
        let outcome = quadratic_gcd(
            &QuadraticInteger::rational(2, r),
            &QuadraticInteger::new(1, 1, r),
        )?;
        assert!(!outcome.is_certified());
        assert_eq!(outcome.value(), QuadraticInteger::rational(-2, r));
        Ok(())
    }

    #[test]
    fn test_gaussian_gcd() -> Result<(), AlgebraicError> {
        let r = ring(-1);
        // 9 + 7i = (2 + i)(5 + i) and 3 + 4i = (2 + i)(2 + i)
        let outcome = quadratic_gcd(
            &QuadraticInteger::new(9, 7, r),
            &QuadraticInteger::new(3, 4, r),
        )?;
        assert!(outcome.is_certified());
        assert_eq!(outcome.value().norm()?, 5);
        assert!(outcome.value().regular_part() >= 0);
        Ok(())
    }

    #[test]
    fn test_gcd_with_zero() -> Result<(), AlgebraicError> {
        let r = ring(-3);
        let omega = QuadraticInteger::with_denominator(-1, 1, 2, r)?;
        let outcome = quadratic_gcd(&QuadraticInteger::zero(r), &omega.times_int(-3)?)?;
        assert!(outcome.is_certified());
        // −3ω = (3 − 3√−3)/2 has a positive regular part already.
        assert_eq!(outcome.value(), omega.times_int(-3)?);
        Ok(())
    }

    #[test]
    fn test_different_rings_overflow_degree() {
        let a = RingInteger::from(QuadraticInteger::new(0, 1, ring(-2)));
        let b = RingInteger::from(QuadraticInteger::new(0, 1, ring(2)));
        let Err(AlgebraicError::DegreeOverflow { first, second, degree }) = euclidean_gcd(&a, &b)
        else {
            panic!("rings differ");
        };
        assert_eq!((*first, *second, degree), (a, b, 2));
    }

    #[test]
    fn test_quadratic_gcd_checks_rings_itself() {
        let a = QuadraticInteger::new(0, 1, ring(-2));
        let b = QuadraticInteger::new(0, 1, ring(2));
        let Err(AlgebraicError::DegreeOverflow { first, second, degree }) = quadratic_gcd(&a, &b)
        else {
            panic!("rings differ");
        };
        assert_eq!(
            (*first, *second, degree),
            (RingInteger::from(a), RingInteger::from(b), 2)
        );

        // A rational operand still belongs to its own ring.
        let four = QuadraticInteger::rational(4, ring(-5));
        assert!(matches!(
            quadratic_gcd(&four, &QuadraticInteger::new(1, 1, ring(-1))),
            Err(AlgebraicError::DegreeOverflow { degree: 2, .. })
        ));
    }

    #[test]
    fn test_unsupported_domains() {
        let unary = RingInteger::from(UnaryInteger::new(12));
        assert!(matches!(
            euclidean_gcd(&unary, &RingInteger::from(18)),
            Err(AlgebraicError::UnsupportedDomain { .. })
        ));
        let zeta = RingInteger::from(Zeta8Integer::zeta());
        assert!(matches!(
            euclidean_gcd(&zeta, &zeta),
            Err(AlgebraicError::UnsupportedDomain { .. })
        ));
    }
}
