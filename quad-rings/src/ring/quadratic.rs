//! Descriptor of the ring of integers of a quadratic field Q(√d).

use crate::errors::AlgebraicError;
use crate::number_theory::is_squarefree;
use crate::render::{Format, RenderConfig};

use serde::{Deserialize, Serialize};

use std::fmt;

/// The ring of algebraic integers of Q(√d) for a squarefree radicand d.
///
/// When d ≡ 1 (mod 4) the ring also contains the half-integers
/// (a + b√d)/2 with a, b both odd.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct QuadraticRing {
    radicand: i64,
}

impl QuadraticRing {
    /// Create the ring for the given radicand.
    ///
    /// The radicand must be squarefree and different from 0 and 1.
    ///
    /// # Example
    ///
    /// ```
    /// # use quad_rings::ring::QuadraticRing;
    /// let ring = QuadraticRing::try_with(-5).unwrap();
    /// assert_eq!(ring.radicand(), -5);
    /// assert!(QuadraticRing::try_with(12).is_err());
    /// ```
    pub fn try_with(radicand: i64) -> Result<Self, AlgebraicError> {
        if radicand == 0 || radicand == 1 {
            return Err(AlgebraicError::InvalidRadicand(format!(
                "Radicand {} does not give a quadratic field",
                radicand
            )));
        }
        if !is_squarefree(radicand) {
            return Err(AlgebraicError::InvalidRadicand(format!(
                "Radicand {} is not squarefree",
                radicand
            )));
        }

        Ok(QuadraticRing { radicand })
    }

    pub fn radicand(&self) -> i64 {
        self.radicand
    }

    /// Whether (a + b√d)/2 with odd a, b belongs to the ring, i.e. d ≡ 1 (mod 4).
    pub fn has_half_integers(&self) -> bool {
        self.radicand.rem_euclid(4) == 1
    }

    /// Field discriminant: d when d ≡ 1 (mod 4), 4d otherwise.
    ///
    /// # Errors
    ///
    /// `AlgebraicError::ArithmeticOverflow` if 4d leaves the 64-bit range.
    ///
    /// # Example
    ///
    /// ```
    /// # use quad_rings::ring::QuadraticRing;
    /// assert_eq!(QuadraticRing::try_with(-3).unwrap().discriminant(), Ok(-3));
    /// assert_eq!(QuadraticRing::try_with(-5).unwrap().discriminant(), Ok(-20));
    /// ```
    pub fn discriminant(&self) -> Result<i64, AlgebraicError> {
        if self.has_half_integers() {
            return Ok(self.radicand);
        }
        self.radicand.checked_mul(4).ok_or_else(|| {
            AlgebraicError::ArithmeticOverflow(format!(
                "Discriminant 4\u{b7}({}) of {} does not fit in 64 bits",
                self.radicand, self
            ))
        })
    }

    pub fn is_purely_real(&self) -> bool {
        self.radicand > 0
    }

    pub fn max_algebraic_degree(&self) -> u32 {
        2
    }

    /// Renders the ring name, `Z[√d]` or `O_Q(√d)` when the ring has half-integers.
    pub fn render(&self, format: Format, config: &RenderConfig) -> String {
        let radical = format.radical(self.radicand);
        if !self.has_half_integers() {
            return format!("{}[{}]", format.integers_symbol(config), radical);
        }

        let rationals = format.rationals_symbol(config);
        match format {
            Format::Plain | Format::Ascii => format!("O_{}({})", rationals, radical),
            Format::Tex => format!("\\mathcal O_{{{}({})}}", rationals, radical),
            Format::Html => format!("<i>O</i><sub>{}({})</sub>", rationals, radical),
        }
    }

    pub fn to_ascii_string(&self) -> String {
        self.render(Format::Ascii, &RenderConfig::default())
    }

    pub fn to_tex_string(&self) -> String {
        self.render(Format::Tex, &RenderConfig::default())
    }

    pub fn to_html_string(&self) -> String {
        self.render(Format::Html, &RenderConfig::default())
    }
}

impl fmt::Display for QuadraticRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Format::Plain, &RenderConfig::default()))
    }
}

impl TryFrom<i64> for QuadraticRing {
    type Error = AlgebraicError;

    fn try_from(radicand: i64) -> Result<Self, Self::Error> {
        QuadraticRing::try_with(radicand)
    }
}

impl From<QuadraticRing> for i64 {
    fn from(ring: QuadraticRing) -> Self {
        ring.radicand
    }
}
