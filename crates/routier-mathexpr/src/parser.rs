// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recursive-descent parser over the token stream.
//!
//! Grammar, loosest to tightest:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := unary (('*' | '/' | '%') unary)*
//! unary      := ('+' | '-') unary | power
//! power      := primary ('^' unary)?
//! primary    := NUMBER | '(' expression ')'
//! ```
//!
//! `^` is right-associative and binds tighter than a leading sign, so
//! `-2^2` parses as `-(2^2)` and `2^-3` is accepted.

use crate::MathError;
use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::lexer::Token;

/// Parse a complete token stream into an expression tree.
pub fn parse(tokens: &[Token]) -> Result<Expr, MathError> {
    if tokens.is_empty() {
        return Err(MathError::Parse("no math expression found".into()));
    }

    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.expression()?;
    if let Some(trailing) = parser.peek() {
        return Err(MathError::Parse(format!("unexpected token '{trailing}'")));
    }
    Ok(expr)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expression(&mut self) -> Result<Expr, MathError> {
        let mut node = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.term()?;
            node = Expr::binary(op, node, rhs);
        }
        Ok(node)
    }

    fn term(&mut self) -> Result<Expr, MathError> {
        let mut node = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::Percent) => BinaryOp::Mod,
                _ => break,
            };
            self.advance();
            let rhs = self.unary()?;
            node = Expr::binary(op, node, rhs);
        }
        Ok(node)
    }

    fn unary(&mut self) -> Result<Expr, MathError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                let operand = self.unary()?;
                Ok(Expr::unary(UnaryOp::Neg, operand))
            }
            Some(Token::Plus) => {
                self.advance();
                let operand = self.unary()?;
                Ok(Expr::unary(UnaryOp::Pos, operand))
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, MathError> {
        let base = self.primary()?;
        if let Some(Token::Caret) = self.peek() {
            self.advance();
            let exponent = self.unary()?;
            return Ok(Expr::binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, MathError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::LParen) => {
                let inner = self.expression()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    Some(other) => Err(MathError::Parse(format!(
                        "expected ')', found '{other}'"
                    ))),
                    None => Err(MathError::Parse("missing closing parenthesis".into())),
                }
            }
            Some(other) => Err(MathError::Parse(format!("unexpected token '{other}'"))),
            None => Err(MathError::Parse("unexpected end of input".into())),
        }
    }
}
