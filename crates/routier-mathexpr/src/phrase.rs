// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Phrase-recognition pass for spoken math.
//!
//! Runs on the lowercased original text before sanitization, so wordings
//! like "square root of 16" are answered directly instead of being
//! stripped down to a bare "16". No match falls through to the
//! operator pipeline.

use std::sync::LazyLock;

use regex::Regex;

static SQUARE_ROOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:square\s+root|sqrt)\s*(?:of)?\s*\(?\s*([0-9]+(?:\.[0-9]+)?)").unwrap()
});

static CUBE_ROOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:cube|cubic)\s+root\s*(?:of)?\s*\(?\s*([0-9]+(?:\.[0-9]+)?)").unwrap()
});

// Requires whitespace before the marker; a bare "2^3" is left to the
// operator pipeline, which computes the same result.
static POWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s+(?:to\s+the\s+power\s+of|\^)\s*([0-9]+(?:\.[0-9]+)?)")
        .unwrap()
});

// Inverted phrasing: "power of E for B" computes B^E.
static POWER_INVERTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"power\s+of\s*([0-9]+(?:\.[0-9]+)?)\s*(?:for\s*)?([0-9]+(?:\.[0-9]+)?)").unwrap()
});

/// Try the phrase patterns in order; `None` means no phrase matched and
/// the operator pipeline should run.
pub fn phrase_eval(lowered: &str) -> Option<f64> {
    if let Some(caps) = SQUARE_ROOT.captures(lowered) {
        let n: f64 = caps[1].parse().ok()?;
        return Some(n.sqrt());
    }

    if let Some(caps) = CUBE_ROOT.captures(lowered) {
        let n: f64 = caps[1].parse().ok()?;
        return Some(n.cbrt());
    }

    if let Some(caps) = POWER.captures(lowered) {
        let base: f64 = caps[1].parse().ok()?;
        let exponent: f64 = caps[2].parse().ok()?;
        return Some(base.powf(exponent));
    }

    if let Some(caps) = POWER_INVERTED.captures(lowered) {
        let exponent: f64 = caps[1].parse().ok()?;
        let base: f64 = caps[2].parse().ok()?;
        return Some(base.powf(exponent));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_square_root_phrases() {
        assert_eq!(phrase_eval("square root of 16"), Some(4.0));
        assert_eq!(phrase_eval("what is the square root of 16?"), Some(4.0));
        assert_eq!(phrase_eval("sqrt 25"), Some(5.0));
        assert_eq!(phrase_eval("sqrt(25)"), Some(5.0));
    }

    #[test]
    fn recognizes_cube_root_phrases() {
        assert_eq!(phrase_eval("cube root of 27"), Some(3.0));
        assert_eq!(phrase_eval("cubic root of 8"), Some(2.0));
    }

    #[test]
    fn recognizes_power_phrases() {
        assert_eq!(phrase_eval("2 to the power of 10"), Some(1024.0));
        assert_eq!(phrase_eval("2 ^ 3"), Some(8.0));
    }

    #[test]
    fn recognizes_inverted_power_phrases() {
        assert_eq!(phrase_eval("power of 2 for 5"), Some(25.0));
    }

    #[test]
    fn spelled_operands_do_not_match() {
        assert_eq!(phrase_eval("square root of sixteen"), None);
        assert_eq!(phrase_eval("2 + 2"), None);
        assert_eq!(phrase_eval("what is the weather"), None);
    }

    #[test]
    fn bare_caret_without_spacing_falls_through() {
        assert_eq!(phrase_eval("2^3"), None);
    }
}
