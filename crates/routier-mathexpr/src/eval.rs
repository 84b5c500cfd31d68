// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Total reduction of an expression tree over the fixed operator table.

use crate::MathError;
use crate::ast::{BinaryOp, Expr, UnaryOp};

/// Reduce a tree to a number.
///
/// Division and modulo by zero are classified failures. A power operation
/// producing a non-real result (negative base with fractional exponent)
/// is a domain failure rather than a NaN leaking into the output.
pub fn eval(expr: &Expr) -> Result<f64, MathError> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Unary { op, operand } => {
            let value = eval(operand)?;
            Ok(match op {
                UnaryOp::Neg => -value,
                UnaryOp::Pos => value,
            })
        }
        Expr::Binary { op, left, right } => {
            let lhs = eval(left)?;
            let rhs = eval(right)?;
            match op {
                BinaryOp::Add => Ok(lhs + rhs),
                BinaryOp::Sub => Ok(lhs - rhs),
                BinaryOp::Mul => Ok(lhs * rhs),
                BinaryOp::Div => {
                    if rhs == 0.0 {
                        Err(MathError::DivisionByZero)
                    } else {
                        Ok(lhs / rhs)
                    }
                }
                BinaryOp::Mod => {
                    if rhs == 0.0 {
                        Err(MathError::DivisionByZero)
                    } else {
                        Ok(lhs % rhs)
                    }
                }
                BinaryOp::Pow => {
                    let value = lhs.powf(rhs);
                    if value.is_nan() && !lhs.is_nan() && !rhs.is_nan() {
                        Err(MathError::Domain(
                            "fractional power of a negative number".into(),
                        ))
                    } else {
                        Ok(value)
                    }
                }
            }
        }
    }
}

/// Render a finite result: integral values without a fractional part,
/// everything else in shortest round-trip decimal form. Negative zero
/// renders as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}
