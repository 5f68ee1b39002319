//! Rational-integer number theory used by the ring descriptors and offered to
//! callers: gcds, primality, squarefreeness and quadratic symbols.

use crate::errors::AlgebraicError;
use crate::ring::QuadraticRing;

use lazy_static::lazy_static;
use rand::prelude::{Rng, SeedableRng, StdRng};

const SIEVE_LIMIT: usize = 1 << 16;

lazy_static! {
    /// Primes below 2^16, enough to trial-divide anything up to 2^32 and
    /// used as the first stage for larger inputs.
    static ref SMALL_PRIMES: Vec<i64> = {
        let mut composite = vec![false; SIEVE_LIMIT];
        let mut primes = Vec::new();
        for n in 2..SIEVE_LIMIT {
            if composite[n] {
                continue;
            }
            primes.push(n as i64);
            for multiple in (n * n..SIEVE_LIMIT).step_by(n) {
                composite[multiple] = true;
            }
        }
        primes
    };
}

/// Computes the greatest common divisor of two numbers. The result is
/// unsigned so that gcd(i64::MIN, 0) = 2^63 is representable.
pub fn gcd(a: i64, b: i64) -> u64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}

/// Trial divisors for `n`: the sieved primes, then 6k ± 1 beyond the sieve.
fn trial_divisors(n: u64) -> impl Iterator<Item = u64> {
    let tail_start = SIEVE_LIMIT as u64 + 1;
    SMALL_PRIMES
        .iter()
        .map(|&p| p as u64)
        .chain(
            (tail_start / 6..)
                .flat_map(|k| [6 * k - 1, 6 * k + 1])
                .skip_while(move |&candidate| candidate < tail_start),
        )
        .take_while(move |&divisor| divisor.saturating_mul(divisor) <= n)
}

/// Tests a rational integer for primality. Negatives are prime when their
/// absolute value is.
pub fn is_prime(n: i64) -> bool {
    let n = n.unsigned_abs();
    if n < 2 {
        return false;
    }
    trial_divisors(n).all(|divisor| n % divisor != 0)
}

/// Prime factors of |n| with multiplicity, in ascending order. Empty for
/// 0 and ±1.
///
/// # Example
///
/// ```
/// # use quad_rings::number_theory::prime_factors;
/// assert_eq!(prime_factors(-360), vec![2, 2, 2, 3, 3, 5]);
/// assert!(prime_factors(1).is_empty());
/// ```
pub fn prime_factors(n: i64) -> Vec<i64> {
    let mut remaining = n.unsigned_abs();
    let mut factors = Vec::new();
    if remaining < 2 {
        return factors;
    }

    for divisor in trial_divisors(remaining) {
        if divisor.saturating_mul(divisor) > remaining {
            break;
        }
        while remaining % divisor == 0 {
            factors.push(divisor as i64);
            remaining /= divisor;
        }
    }
    if remaining > 1 {
        factors.push(remaining as i64);
    }
    factors
}

/// A number is squarefree when no prime divides it twice. Zero is not.
pub fn is_squarefree(n: i64) -> bool {
    if n == 0 {
        return false;
    }
    prime_factors(n).windows(2).all(|pair| pair[0] != pair[1])
}

/// Möbius function: 0 for non-squarefree numbers, otherwise (−1)^k for k
/// distinct prime factors.
pub fn moebius_mu(n: i64) -> i8 {
    if !is_squarefree(n) {
        return 0;
    }
    if prime_factors(n).len() % 2 == 0 { 1 } else { -1 }
}

/// Kronecker symbol (a | n), extending the Legendre and Jacobi symbols to
/// every integer n.
pub fn kronecker_symbol(a: i64, n: i64) -> i8 {
    if n == 0 {
        return if a == 1 || a == -1 { 1 } else { 0 };
    }

    let mut result: i8 = 1;
    let mut n = n as i128;
    let a = a as i128;
    if n < 0 {
        n = -n;
        if a < 0 {
            result = -result;
        }
    }

    let twos = n.trailing_zeros();
    if twos > 0 {
        if a % 2 == 0 {
            return 0;
        }
        if twos % 2 == 1 && matches!(a.rem_euclid(8), 3 | 5) {
            result = -result;
        }
        n >>= twos;
    }

    // Jacobi symbol for odd positive n.
    let mut a = a.rem_euclid(n);
    while a != 0 {
        while a % 2 == 0 {
            a /= 2;
            if matches!(n % 8, 3 | 5) {
                result = -result;
            }
        }
        std::mem::swap(&mut a, &mut n);
        if a % 4 == 3 && n % 4 == 3 {
            result = -result;
        }
        a %= n;
    }

    if n == 1 { result } else { 0 }
}

/// Class number of an imaginary quadratic field, counted as the number of
/// reduced primitive binary quadratic forms of the field's discriminant.
/// `None` for real quadratic fields.
///
/// # Errors
///
/// `AlgebraicError::ArithmeticOverflow` if the discriminant does not fit in
/// 64 bits.
pub fn class_number(ring: &QuadraticRing) -> Result<Option<u64>, AlgebraicError> {
    if ring.is_purely_real() {
        return Ok(None);
    }

    let discriminant = ring.discriminant()? as i128;
    let mut count = 0;
    let mut a: i128 = 1;
    while 3 * a * a <= -discriminant {
        for b in (1 - a)..=a {
            let numerator = b * b - discriminant;
            if numerator % (4 * a) != 0 {
                continue;
            }
            let c = numerator / (4 * a);
            if c < a || (b < 0 && a == c) {
                continue;
            }
            // |b| ≤ a ≤ c ≤ |D|, all within 64 bits.
            let content = gcd(a as i64, b as i64);
            if gcd(content as i64, c as i64) == 1 {
                count += 1;
            }
        }
        a += 1;
    }
    Ok(Some(count))
}

/// Draws a squarefree number from `2..=bound` (or `-bound..=-2` for a
/// negative bound), repeatable for the same seed.
pub fn random_squarefree(bound: i64, seed: u64) -> i64 {
    let magnitude = bound.unsigned_abs().max(2).min(i64::MAX as u64) as i64;
    let mut rng = StdRng::seed_from_u64(seed);
    loop {
        let candidate = rng.random_range(2..=magnitude);
        if is_squarefree(candidate) {
            return if bound < 0 { -candidate } else { candidate };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use num_integer::Integer;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_simple_gcd() {
        assert_eq!(gcd(1, 6), 1);
        assert_eq!(gcd(2, 6), 2);
        assert_eq!(gcd(4, 6), 2);
        assert_eq!(gcd(10, 0), 10);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(-54, 24), 6);
    }

    #[test]
    fn test_gcd_at_the_edge_of_the_range() {
        assert_eq!(gcd(i64::MIN, 0), 1 << 63);
        assert_eq!(gcd(0, i64::MIN), 1 << 63);
        assert_eq!(gcd(i64::MIN, -1), 1);
        assert_eq!(gcd(i64::MIN, i64::MIN), 1 << 63);
        assert_eq!(gcd(i64::MIN, 6), 2);
        assert_eq!(gcd(i64::MAX, i64::MIN), 1);
    }

    #[test]
    fn test_primality() {
        let primes: Vec<i64> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(is_prime(-7));
        assert!(is_prime(65_537));
        assert!(is_prime(2_147_483_647));
        assert!(!is_prime(65_537 * 65_539));
    }

    #[test]
    fn test_prime_factors_beyond_sieve() {
        assert_eq!(prime_factors(65_537 * 65_539), vec![65_537, 65_539]);
        assert_eq!(prime_factors(2 * 2_147_483_647), vec![2, 2_147_483_647]);
    }

    #[test]
    fn test_squarefree_and_moebius() {
        assert!(is_squarefree(-5));
        assert!(is_squarefree(30));
        assert!(!is_squarefree(12));
        assert!(!is_squarefree(0));
        assert_eq!(moebius_mu(1), 1);
        assert_eq!(moebius_mu(6), 1);
        assert_eq!(moebius_mu(30), -1);
        assert_eq!(moebius_mu(18), 0);
    }

    #[test]
    fn test_kronecker_symbol() {
        // Legendre symbols mod 7: squares are 1, 2, 4.
        let residues: Vec<i8> = (1..7).map(|a| kronecker_symbol(a, 7)).collect();
        assert_eq!(residues, vec![1, 1, -1, 1, -1, -1]);
        assert_eq!(kronecker_symbol(14, 7), 0);
        assert_eq!(kronecker_symbol(-20, 3), 1);
        assert_eq!(kronecker_symbol(-20, 2), 0);
        assert_eq!(kronecker_symbol(5, 2), -1);
        assert_eq!(kronecker_symbol(-7, 2), 1);
        assert_eq!(kronecker_symbol(-1, -1), -1);
        assert_eq!(kronecker_symbol(1, 0), 1);
    }

    #[test]
    fn test_class_numbers() {
        let class_of = |d| class_number(&QuadraticRing::try_with(d).unwrap());
        assert_eq!(class_of(-1), Ok(Some(1)));
        assert_eq!(class_of(-3), Ok(Some(1)));
        assert_eq!(class_of(-5), Ok(Some(2)));
        assert_eq!(class_of(-23), Ok(Some(3)));
        assert_eq!(class_of(-163), Ok(Some(1)));
        assert_eq!(class_of(2), Ok(None));
        assert!(matches!(
            class_of(-13_082_761_331_670_030 * 179),
            Err(AlgebraicError::ArithmeticOverflow(_))
        ));
    }

    #[test]
    fn test_random_squarefree_is_repeatable() {
        let first = random_squarefree(-1000, 7);
        assert_eq!(first, random_squarefree(-1000, 7));
        assert!((-1000..=-2).contains(&first));
        assert!(is_squarefree(first));
    }

    #[quickcheck]
    fn prop_gcd_divides_both_magnitudes(a: i64, b: i64) -> bool {
        let (x, y) = (a.unsigned_abs(), b.unsigned_abs());
        let g = gcd(a, b);
        g == x.gcd(&y) && (g == 0 || (x % g == 0 && y % g == 0))
    }

    #[quickcheck]
    fn prop_factors_multiply_back(n: i32) -> bool {
        let n = n as i64;
        let factors = prime_factors(n);
        factors.iter().all(|&p| is_prime(p))
            && (n.abs() < 2 || factors.iter().product::<i64>() == n.abs())
    }
}
