// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Safe arithmetic evaluation for untrusted free text.
//!
//! The pipeline: an optional phrase pass ("square root of 16"), then
//! sanitize to the expression character set, tokenize, parse into an
//! [`ast::Expr`] tree, reduce over the whitelisted operator table, and
//! format. Nothing outside numeric literals and the six operators is
//! representable, so the evaluator cannot be coaxed into running
//! anything else.
//!
//! Two entry points:
//! - [`evaluate`] is lenient: foreign characters are dropped, suitable for
//!   natural-language queries ("what is 2 + 2?").
//! - [`evaluate_strict`] rejects the first foreign character, suitable for
//!   input that is supposed to already be an expression.

pub mod ast;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod phrase;

use thiserror::Error;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use lexer::is_expr_char;

/// Classified evaluation failure. Never panics; every malformed input maps
/// to one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathError {
    /// Input was empty after sanitization or grammatically invalid.
    #[error("invalid math expression: {0}")]
    Parse(String),

    /// Strict mode found a character outside the expression set.
    #[error("unsupported character '{0}' in expression")]
    UnsupportedCharacter(char),

    /// Division or modulo by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The operation has no finite real result.
    #[error("arithmetic domain error: {0}")]
    Domain(String),
}

/// Evaluate free text leniently: phrase pass first, then the sanitized
/// operator pipeline.
pub fn evaluate(text: &str) -> Result<String, MathError> {
    let lowered = text.trim().to_lowercase();

    if let Some(value) = phrase::phrase_eval(&lowered) {
        return finish(value);
    }

    evaluate_sanitized(&lexer::sanitize(&lowered))
}

/// Evaluate an expression strictly: any character outside the expression
/// set fails with [`MathError::UnsupportedCharacter`].
pub fn evaluate_strict(text: &str) -> Result<String, MathError> {
    let trimmed = text.trim();
    lexer::check_strict(trimmed)?;
    evaluate_sanitized(trimmed)
}

fn evaluate_sanitized(expr: &str) -> Result<String, MathError> {
    if expr.trim().is_empty() {
        return Err(MathError::Parse("no math expression found".into()));
    }

    let tokens = lexer::tokenize(expr)?;
    let tree = parser::parse(&tokens)?;
    let value = eval::eval(&tree)?;
    finish(value)
}

fn finish(value: f64) -> Result<String, MathError> {
    if !value.is_finite() {
        return Err(MathError::Domain("result is out of range".into()));
    }
    Ok(eval::format_number(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_basic_arithmetic() {
        assert_eq!(evaluate("2 + 2").unwrap(), "4");
        assert_eq!(evaluate("6 * 7").unwrap(), "42");
        assert_eq!(evaluate("10 / 2").unwrap(), "5");
        assert_eq!(evaluate("2 ^ 3").unwrap(), "8");
    }

    #[test]
    fn evaluates_natural_language_wrapping() {
        assert_eq!(evaluate("what is 2 + 2?").unwrap(), "4");
        assert_eq!(evaluate("Calculate (1 + 2) * 3 please").unwrap(), "9");
    }

    #[test]
    fn evaluates_phrase_math() {
        assert_eq!(evaluate("square root of 16").unwrap(), "4");
        assert_eq!(evaluate("cube root of 27").unwrap(), "3");
        assert_eq!(evaluate("2 to the power of 10").unwrap(), "1024");
        assert_eq!(evaluate("power of 2 for 5").unwrap(), "25");
    }

    #[test]
    fn fractional_results_keep_their_decimals() {
        assert_eq!(evaluate("5 / 2").unwrap(), "2.5");
        assert_eq!(evaluate("1 / 4").unwrap(), "0.25");
    }

    #[test]
    fn malformed_input_is_a_parse_error() {
        assert!(matches!(evaluate("2 +"), Err(MathError::Parse(_))));
        assert!(matches!(evaluate(""), Err(MathError::Parse(_))));
        assert!(matches!(evaluate("hello there"), Err(MathError::Parse(_))));
    }

    #[test]
    fn division_by_zero_is_classified() {
        assert_eq!(evaluate("10 / 0"), Err(MathError::DivisionByZero));
        assert_eq!(evaluate("7 % 0"), Err(MathError::DivisionByZero));
    }

    #[test]
    fn strict_mode_rejects_foreign_characters() {
        assert_eq!(evaluate_strict("2 + 2").unwrap(), "4");
        assert_eq!(
            evaluate_strict("what is 2 + 2"),
            Err(MathError::UnsupportedCharacter('w'))
        );
    }

    #[test]
    fn evaluation_is_deterministic() {
        let first = evaluate("3.1 * 3").unwrap();
        let second = evaluate("3.1 * 3").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn huge_powers_are_domain_errors_not_infinities() {
        let err = evaluate("10 ^ 400").unwrap_err();
        assert!(matches!(err, MathError::Domain(_)));
    }

    #[test]
    fn error_messages_read_well() {
        assert_eq!(
            evaluate("hello").unwrap_err().to_string(),
            "invalid math expression: no math expression found"
        );
        assert_eq!(
            evaluate("10 / 0").unwrap_err().to_string(),
            "division by zero"
        );
    }
}
