//! # Ring Module
//!
//! Descriptors of the rings an algebraic integer may belong to: the rational
//! integers, the ring of integers of a quadratic field, and the quartic
//! cyclotomic ring Z[ζ₈].

pub mod quadratic;

pub use quadratic::QuadraticRing;

use crate::render::{Format, RenderConfig};

use serde::{Deserialize, Serialize};

use std::fmt;

/// The closed set of rings modelled by this crate.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum AlgebraicRing {
    /// The rational integers Z.
    Integers,
    Quadratic(QuadraticRing),
    /// Z[ζ₈], ζ₈ a primitive eighth root of unity.
    Zeta8,
}

impl AlgebraicRing {
    pub fn max_algebraic_degree(&self) -> u32 {
        match self {
            AlgebraicRing::Integers => 1,
            AlgebraicRing::Quadratic(ring) => ring.max_algebraic_degree(),
            AlgebraicRing::Zeta8 => 4,
        }
    }

    pub fn is_purely_real(&self) -> bool {
        match self {
            AlgebraicRing::Integers => true,
            AlgebraicRing::Quadratic(ring) => ring.is_purely_real(),
            AlgebraicRing::Zeta8 => false,
        }
    }

    pub fn render(&self, format: Format, config: &RenderConfig) -> String {
        match self {
            AlgebraicRing::Integers => format.integers_symbol(config).to_string(),
            AlgebraicRing::Quadratic(ring) => ring.render(format, config),
            AlgebraicRing::Zeta8 => format!(
                "{}[{}]",
                format.integers_symbol(config),
                format.zeta8_power(1)
            ),
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

impl From<QuadraticRing> for AlgebraicRing {
    fn from(ring: QuadraticRing) -> Self {
        AlgebraicRing::Quadratic(ring)
    }
}

impl fmt::Display for AlgebraicRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Format::Plain, &RenderConfig::default()))
    }
}
