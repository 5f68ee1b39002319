//! Reading quadratic integers back from their plain or ASCII renderings.
//!
//! Accepted forms are sums of terms `c`, `c√d`, `c*sqrt(d)` and `c i`, with
//! either minus sign, optionally wrapped as `(…)/2`. The radical names the
//! ring, so `"3 + 2√−5"` parses into Z[√−5] without further context.

use super::QuadraticInteger;
use super::helper::{narrow, widened};
use crate::errors::AlgebraicError;
use crate::ring::QuadraticRing;

use std::str::FromStr;

/// Parts read from text before the ring is known.
#[derive(Debug, Default, PartialEq, Eq)]
struct Reading {
    regular: i128,
    surd: i128,
    denominator: i64,
    radicand: Option<i64>,
}

impl Reading {
    fn of(text: &str) -> Result<Self, AlgebraicError> {
        let cleaned: String = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == '\u{2212}' { '-' } else { c })
            .collect::<String>()
            .replace("sqrt", "\u{221a}");

        let (body, denominator) = match cleaned
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(")/2"))
        {
            Some(inner) => (inner, 2),
            None => (cleaned.as_str(), 1),
        };

        let mut reading = Reading {
            denominator,
            ..Reading::default()
        };
        reading.read_terms(&body.chars().collect::<Vec<_>>(), text)?;
        Ok(reading)
    }

    fn read_terms(&mut self, chars: &[char], text: &str) -> Result<(), AlgebraicError> {
        let fail = |reason: &str| AlgebraicError::Parse(format!("{:?}: {}", text, reason));
        if chars.is_empty() {
            return Err(fail("no terms"));
        }

        let mut pos = 0;
        while pos < chars.len() {
            let sign: i128 = match chars[pos] {
                '+' => {
                    pos += 1;
                    1
                }
                '-' => {
                    pos += 1;
                    -1
                }
                _ if pos == 0 => 1,
                other => return Err(fail(&format!("unexpected {:?}", other))),
            };

            let coefficient = read_digits(chars, &mut pos, text)?;
            if coefficient.is_some() && chars.get(pos) == Some(&'*') {
                pos += 1;
            }
            let radicand = read_radical(chars, &mut pos, text)?;

            match (coefficient, radicand) {
                (None, None) => return Err(fail("term without a number")),
                (Some(c), None) => {
                    self.regular = widened(self.regular.checked_add(sign * c))?;
                }
                (c, Some(d)) => {
                    if self.radicand.is_some_and(|known| known != d) {
                        return Err(fail("terms name different radicals"));
                    }
                    self.radicand = Some(d);
                    self.surd = widened(self.surd.checked_add(sign * c.unwrap_or(1)))?;
                }
            }
        }
        Ok(())
    }

    fn build(&self, ring: QuadraticRing) -> Result<QuadraticInteger, AlgebraicError> {
        QuadraticInteger::with_denominator(
            narrow(self.regular)?,
            narrow(self.surd)?,
            self.denominator,
            ring,
        )
    }
}

fn read_digits(chars: &[char], pos: &mut usize, text: &str) -> Result<Option<i128>, AlgebraicError> {
    let start = *pos;
    while chars.get(*pos).is_some_and(char::is_ascii_digit) {
        *pos += 1;
    }
    if start == *pos {
        return Ok(None);
    }
    let digits: String = chars[start..*pos].iter().collect();
    digits
        .parse::<i128>()
        .map(Some)
        .map_err(|err| AlgebraicError::Parse(format!("{:?}: {}", text, err)))
}

/// Reads `i`, `√d`, `√-d` or `√(d)` and returns d.
fn read_radical(chars: &[char], pos: &mut usize, text: &str) -> Result<Option<i64>, AlgebraicError> {
    let fail = |reason: &str| AlgebraicError::Parse(format!("{:?}: {}", text, reason));
    match chars.get(*pos) {
        Some('i') => {
            *pos += 1;
            Ok(Some(-1))
        }
        Some('\u{221a}') => {
            *pos += 1;
            let parenthesized = chars.get(*pos) == Some(&'(');
            if parenthesized {
                *pos += 1;
            }
            let negative = chars.get(*pos) == Some(&'-');
            if negative {
                *pos += 1;
            }
            let magnitude = read_digits(chars, pos, text)?.ok_or_else(|| fail("radical without radicand"))?;
            if parenthesized {
                if chars.get(*pos) != Some(&')') {
                    return Err(fail("unclosed radical"));
                }
                *pos += 1;
            }
            let radicand = if negative { -magnitude } else { magnitude };
            narrow(radicand).map(Some)
        }
        _ => Ok(None),
    }
}

impl QuadraticInteger {
    /// Parses `text` as an element of `ring`. Unlike [`str::parse`] this
    /// accepts purely rational input.
    ///
    /// # Example
    ///
    /// ```
    /// # use quad_rings::integer::QuadraticInteger;
    /// # use quad_rings::ring::QuadraticRing;
    /// let ring = QuadraticRing::try_with(-5).unwrap();
    /// let seven = QuadraticInteger::parse_in(ring, "7").unwrap();
    /// assert_eq!(seven, QuadraticInteger::rational(7, ring));
    /// assert!(QuadraticInteger::parse_in(ring, "1 + sqrt(2)").is_err());
    /// ```
    pub fn parse_in(ring: QuadraticRing, text: &str) -> Result<Self, AlgebraicError> {
        let reading = Reading::of(text)?;
        match reading.radicand {
            Some(d) if d != ring.radicand() => Err(AlgebraicError::Parse(format!(
                "{:?} does not belong to {}",
                text, ring
            ))),
            _ => reading.build(ring),
        }
    }
}

impl FromStr for QuadraticInteger {
    type Err = AlgebraicError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let reading = Reading::of(text)?;
        let Some(d) = reading.radicand else {
            return Err(AlgebraicError::Parse(format!(
                "{:?} names no radical, so its ring is unknown",
                text
            )));
        };
        reading.build(QuadraticRing::try_with(d)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integer::AlgebraicInteger;

    fn ring(d: i64) -> QuadraticRing {
        QuadraticRing::try_with(d).unwrap()
    }

    #[test]
    fn test_parse_plain_and_ascii() -> Result<(), AlgebraicError> {
        let expected = QuadraticInteger::new(3, -2, ring(-5));
        assert_eq!("3 \u{2212} 2\u{221a}\u{2212}5".parse::<QuadraticInteger>()?, expected);
        assert_eq!("3 - 2sqrt(-5)".parse::<QuadraticInteger>()?, expected);
        assert_eq!("3-2*\u{221a}(-5)".parse::<QuadraticInteger>()?, expected);
        assert_eq!("-2sqrt(-5) + 3".parse::<QuadraticInteger>()?, expected);
        Ok(())
    }

    #[test]
    fn test_parse_units_and_halves() -> Result<(), AlgebraicError> {
        assert_eq!("-1 + i".parse::<QuadraticInteger>()?, QuadraticInteger::new(-1, 1, ring(-1)));
        assert_eq!("sqrt(2)".parse::<QuadraticInteger>()?, QuadraticInteger::new(0, 1, ring(2)));
        let half = "(1 + 3sqrt(-7))/2".parse::<QuadraticInteger>()?;
        assert_eq!(half, QuadraticInteger::with_denominator(1, 3, 2, ring(-7))?);
        Ok(())
    }

    #[test]
    fn test_rendering_parses_back() -> Result<(), AlgebraicError> {
        let values = [
            QuadraticInteger::new(-4, 7, ring(10)),
            QuadraticInteger::with_denominator(-1, 1, 2, ring(-3))?,
            QuadraticInteger::new(0, -1, ring(-1)),
        ];
        for value in values {
            assert_eq!(value.to_string().parse::<QuadraticInteger>()?, value);
            assert_eq!(value.to_ascii_string().parse::<QuadraticInteger>()?, value);
        }
        Ok(())
    }

    #[test]
    fn test_parse_failures() {
        assert!(matches!("7".parse::<QuadraticInteger>(), Err(AlgebraicError::Parse(_))));
        assert!(matches!("".parse::<QuadraticInteger>(), Err(AlgebraicError::Parse(_))));
        assert!(matches!("1 + x".parse::<QuadraticInteger>(), Err(AlgebraicError::Parse(_))));
        assert!(matches!(
            "\u{221a}2 + \u{221a}3".parse::<QuadraticInteger>(),
            Err(AlgebraicError::Parse(_))
        ));
        assert!(matches!("sqrt(-4)".parse::<QuadraticInteger>(), Err(AlgebraicError::InvalidRadicand(_))));
        assert!(matches!(
            "(1 + sqrt(-5))/2".parse::<QuadraticInteger>(),
            Err(AlgebraicError::NotInRing(_))
        ));
    }

    #[test]
    fn test_parse_in_ring() -> Result<(), AlgebraicError> {
        let r = ring(-5);
        assert_eq!(QuadraticInteger::parse_in(r, "-12")?, QuadraticInteger::rational(-12, r));
        assert_eq!(QuadraticInteger::parse_in(r, "\u{221a}-5")?, QuadraticInteger::new(0, 1, r));
        assert!(QuadraticInteger::parse_in(r, "i").is_err());
        Ok(())
    }
}
