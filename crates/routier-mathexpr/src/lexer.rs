// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sanitization and tokenization.
//!
//! Input arrives as free text. Lenient sanitization keeps only the
//! expression character set and drops everything else, so natural-language
//! tokens never reach the parser. Strict checking instead rejects the
//! first character outside the set, for callers that pass a bare
//! expression rather than a sentence.

use std::fmt;

use crate::MathError;

/// The complete expression character set.
const ALLOWED: &str = "0123456789+-*/%^(). ";

/// Whether `c` belongs to the expression character set.
pub fn is_expr_char(c: char) -> bool {
    ALLOWED.contains(c)
}

/// Keep only expression characters, silently dropping the rest.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| is_expr_char(*c)).collect()
}

/// Reject the first character outside the expression character set.
pub fn check_strict(text: &str) -> Result<(), MathError> {
    match text.chars().find(|c| !is_expr_char(*c)) {
        Some(c) => Err(MathError::UnsupportedCharacter(c)),
        None => Ok(()),
    }
}

/// A lexical token of the expression grammar. `Caret` is the power
/// operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::Caret => write!(f, "^"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

/// Tokenize sanitized expression text.
///
/// Number literals are maximal runs of digits and decimal points; a run
/// that does not parse as a number (for example `1.2.3`) is a parse
/// failure, not a panic.
pub fn tokenize(input: &str) -> Result<Vec<Token>, MathError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            ' ' => {}
            '+' => tokens.push(Token::Plus),
            '-' => tokens.push(Token::Minus),
            '*' => tokens.push(Token::Star),
            '/' => tokens.push(Token::Slash),
            '%' => tokens.push(Token::Percent),
            '^' => tokens.push(Token::Caret),
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            '0'..='9' | '.' => {
                let mut end = start + c.len_utf8();
                while let Some(&(next, d)) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        end = next + d.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let lexeme = &input[start..end];
                let value = lexeme
                    .parse::<f64>()
                    .map_err(|_| MathError::Parse(format!("invalid number '{lexeme}'")))?;
                tokens.push(Token::Number(value));
            }
            other => {
                return Err(MathError::Parse(format!("unexpected character '{other}'")));
            }
        }
    }

    Ok(tokens)
}
