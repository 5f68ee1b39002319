//! Textual renderings shared by rings and ring elements.
//!
//! Every value can be written in four target formats. [`RenderConfig`] holds
//! the notation preferences; it is passed explicitly, there is no global
//! preference state.

use crate::errors::AlgebraicError;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Target format of a rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    /// Unicode minus sign and radical glyphs, e.g. `3 − 2√−5`.
    Plain,
    /// Pure ASCII, e.g. `3 - 2sqrt(-5)`.
    Ascii,
    /// TeX markup, e.g. `3 - 2\sqrt{-5}`.
    Tex,
    /// HTML entities and tags, e.g. `3 &minus; 2&radic;(&minus;5)`.
    Html,
}

/// Notation preferences for renderings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Use blackboard bold (ℤ, ℚ) instead of bold face for the number sets.
    pub blackboard_bold: bool,
    /// Write elements of rings with half-integers as `a + bθ`, θ = (1 + √d)/2.
    pub theta_notation: bool,
}

impl RenderConfig {
    /// Reads a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Example
    ///
    /// ```
    /// # use quad_rings::render::RenderConfig;
    /// let config = RenderConfig::from_json(r#"{ "theta_notation": true }"#).unwrap();
    /// assert!(config.theta_notation);
    /// assert!(!config.blackboard_bold);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, AlgebraicError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, AlgebraicError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Format {
    pub fn minus(self) -> &'static str {
        match self {
            Format::Plain => "\u{2212}",
            Format::Ascii | Format::Tex => "-",
            Format::Html => "&minus;",
        }
    }

    /// Renders a signed integer with this format's minus sign.
    pub fn integer(self, value: i128) -> String {
        if value < 0 {
            format!("{}{}", self.minus(), value.unsigned_abs())
        } else {
            value.to_string()
        }
    }

    /// Symbol for the rational integers.
    pub fn integers_symbol(self, config: &RenderConfig) -> &'static str {
        match (self, config.blackboard_bold) {
            (Format::Plain, true) => "\u{2124}",
            (Format::Plain, false) | (Format::Ascii, _) => "Z",
            (Format::Tex, true) => "\\mathbb Z",
            (Format::Tex, false) => "\\mathbf Z",
            (Format::Html, true) => "&#8484;",
            (Format::Html, false) => "<b>Z</b>",
        }
    }

    /// Symbol for the rational numbers.
    pub fn rationals_symbol(self, config: &RenderConfig) -> &'static str {
        match (self, config.blackboard_bold) {
            (Format::Plain, true) => "\u{211a}",
            (Format::Plain, false) | (Format::Ascii, _) => "Q",
            (Format::Tex, true) => "\\mathbb Q",
            (Format::Tex, false) => "\\mathbf Q",
            (Format::Html, true) => "&#8474;",
            (Format::Html, false) => "<b>Q</b>",
        }
    }

    pub fn imaginary_unit(self) -> &'static str {
        match self {
            Format::Html => "<i>i</i>",
            _ => "i",
        }
    }

    /// `√d` in this format; `i` when `d = -1`.
    pub fn radical(self, radicand: i64) -> String {
        if radicand == -1 {
            return self.imaginary_unit().to_string();
        }
        let d = self.integer(radicand as i128);
        match self {
            Format::Plain => format!("\u{221a}{}", d),
            Format::Ascii => format!("sqrt({})", d),
            Format::Tex => format!("\\sqrt{{{}}}", d),
            Format::Html if radicand < 0 => format!("&radic;({})", d),
            Format::Html => format!("&radic;{}", d),
        }
    }

    /// θ = (1 + √d)/2, written ω in the Eisenstein integers.
    pub fn theta(self, radicand: i64) -> &'static str {
        match (self, radicand == -3) {
            (Format::Plain, true) => "\u{3c9}",
            (Format::Plain, false) => "\u{3b8}",
            (Format::Ascii, true) => "omega",
            (Format::Ascii, false) => "theta",
            (Format::Tex, true) => "\\omega",
            (Format::Tex, false) => "\\theta",
            (Format::Html, true) => "&omega;",
            (Format::Html, false) => "&theta;",
        }
    }

    /// ζ₈ raised to `power` (1 to 3).
    pub fn zeta8_power(self, power: u32) -> String {
        match (self, power) {
            (Format::Plain, 1) => "\u{3b6}\u{2088}".to_string(),
            (Format::Plain, 2) => "\u{3b6}\u{2088}\u{b2}".to_string(),
            (Format::Plain, _) => "\u{3b6}\u{2088}\u{b3}".to_string(),
            (Format::Ascii, 1) => "zeta8".to_string(),
            (Format::Ascii, p) => format!("zeta8^{}", p),
            (Format::Tex, 1) => "\\zeta_8".to_string(),
            (Format::Tex, p) => format!("\\zeta_8^{}", p),
            (Format::Html, 1) => "&zeta;<sub>8</sub>".to_string(),
            (Format::Html, p) => format!("&zeta;<sub>8</sub><sup>{}</sup>", p),
        }
    }

    /// Indeterminate power used by minimal polynomials.
    pub fn variable_power(self, power: u32) -> String {
        match (self, power) {
            (_, 0) => String::new(),
            (Format::Html, 1) => "<i>x</i>".to_string(),
            (_, 1) => "x".to_string(),
            (Format::Plain, 2) => "x\u{b2}".to_string(),
            (Format::Html, p) => format!("<i>x</i><sup>{}</sup>", p),
            (_, p) => format!("x^{}", p),
        }
    }

    /// Wraps a multi-term numerator over the denominator 2.
    pub fn halved(self, numerator: &str) -> String {
        match self {
            Format::Tex => format!("\\frac{{{}}}{{2}}", numerator),
            _ => format!("({})/2", numerator),
        }
    }
}

/// Joins `(coefficient, unit)` terms into a signed sum.
///
/// Zero terms are skipped, unit coefficients are elided in front of a
/// non-empty unit, and an all-zero sum renders as `0`.
pub(crate) fn join_terms(format: Format, terms: &[(i128, String)]) -> String {
    let rendered = terms
        .iter()
        .filter(|(coefficient, _)| *coefficient != 0)
        .enumerate()
        .map(|(position, (coefficient, unit))| {
            let magnitude = coefficient.unsigned_abs();
            let body = match (magnitude, unit.is_empty()) {
                (1, false) => unit.clone(),
                (_, true) => magnitude.to_string(),
                (_, false) => format!("{}{}", magnitude, unit),
            };
            match (position, *coefficient < 0) {
                (0, false) => body,
                (0, true) => format!("{}{}", format.minus(), body),
                (_, false) => format!(" + {}", body),
                (_, true) => format!(" {} {}", format.minus(), body),
            }
        })
        .join("");

    if rendered.is_empty() {
        "0".to_string()
    } else {
        rendered
    }
}
