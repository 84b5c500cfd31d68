// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic query classifier.
//!
//! Routes a query to exactly one tool. The precedence order is
//! behaviorally significant: weather keywords are checked before the math
//! heuristics so that "what's the temperature, 5 or 10 degrees?" is not
//! misrouted to math, and math is checked before the generation fallback
//! so cheap deterministic computations never cost a remote call.

use routier_core::ToolKind;
use tracing::debug;

/// Keywords that route a query to the weather tool.
pub(crate) const WEATHER_KEYWORDS: &[&str] =
    &["weather", "temperature", "forecast", "rain", "snow", "wind"];

/// Spelled-out operators that route to math even without digits.
const MATH_KEYWORDS: &[&str] = &["plus", "minus", "times", "divided by"];

/// Phrases that signal spoken math when a digit is present.
const MATH_PHRASES: &[&str] = &[
    "square root",
    "sqrt",
    "cube root",
    "cubic root",
    "to the power of",
    "power of",
    "^",
];

/// Arithmetic operator characters.
const OPERATOR_CHARS: &[char] = &['+', '-', '*', '/', '%', '^'];

/// Classify a query into a tool. Total and deterministic: every input maps
/// to exactly one [`ToolKind`], defaulting to generation.
pub fn classify(query: &str) -> ToolKind {
    let lowered = query.trim().to_lowercase();

    let tool = if WEATHER_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        ToolKind::Weather
    } else if is_math_query(&lowered) {
        ToolKind::Math
    } else {
        ToolKind::Generation
    };

    debug!(tool = %tool, "classified query");
    tool
}

/// Math heuristics, in order: a pure expression, a digit plus an operator
/// character, a spelled-out operator keyword, or a math phrase next to a
/// digit.
fn is_math_query(lowered: &str) -> bool {
    if is_pure_expression(lowered) {
        return true;
    }

    let has_digit = lowered.chars().any(|c| c.is_ascii_digit());
    let has_operator = lowered.chars().any(|c| OPERATOR_CHARS.contains(&c));
    if has_digit && has_operator {
        return true;
    }

    if MATH_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return true;
    }

    has_digit && MATH_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

/// A non-empty query made only of expression characters, e.g. "2+2".
fn is_pure_expression(lowered: &str) -> bool {
    !lowered.is_empty() && lowered.chars().all(routier_mathexpr::is_expr_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_keywords_route_to_weather() {
        assert_eq!(
            classify("What's the weather like today in Paris?"),
            ToolKind::Weather
        );
        assert_eq!(classify("current temperature in Oslo"), ToolKind::Weather);
        assert_eq!(classify("will it rain tomorrow"), ToolKind::Weather);
        assert_eq!(classify("FORECAST for Lima"), ToolKind::Weather);
    }

    #[test]
    fn weather_wins_over_math_signals() {
        // Contains digits and an operator-free math shape, but the weather
        // keyword takes precedence.
        assert_eq!(
            classify("what's the temperature, 5 or 10 degrees?"),
            ToolKind::Weather
        );
        assert_eq!(classify("is 20 degrees of wind + rain bad"), ToolKind::Weather);
    }

    #[test]
    fn digit_and_operator_route_to_math() {
        assert_eq!(classify("What is 42 * 7?"), ToolKind::Math);
        assert_eq!(classify("calculate 10 / 2"), ToolKind::Math);
    }

    #[test]
    fn pure_expressions_route_to_math() {
        assert_eq!(classify("2+2"), ToolKind::Math);
        assert_eq!(classify(" (6 * 7) % 5 "), ToolKind::Math);
    }

    #[test]
    fn spelled_out_operators_route_to_math() {
        assert_eq!(classify("two plus two"), ToolKind::Math);
        assert_eq!(classify("nine divided by three"), ToolKind::Math);
    }

    #[test]
    fn math_phrases_with_digits_route_to_math() {
        assert_eq!(classify("square root of 16"), ToolKind::Math);
        assert_eq!(classify("what is 2 to the power of 10"), ToolKind::Math);
    }

    #[test]
    fn math_phrases_without_digits_do_not_route_to_math() {
        assert_eq!(classify("explain what a square root is"), ToolKind::Generation);
    }

    #[test]
    fn everything_else_routes_to_generation() {
        assert_eq!(
            classify("Who is the president of France?"),
            ToolKind::Generation
        );
        assert_eq!(classify("tell me a story"), ToolKind::Generation);
        assert_eq!(classify(""), ToolKind::Generation);
    }

    #[test]
    fn digits_without_operators_route_to_generation() {
        assert_eq!(classify("I have 2 cats"), ToolKind::Generation);
    }

    #[test]
    fn classification_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(classify("What is 42 * 7?"), ToolKind::Math);
        }
    }
}
