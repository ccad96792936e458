// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Binary and unary operators.

use std::cmp::Ordering;

use cascade_ast::expr::{BinOp, UnaryOp};

use crate::value::Value;

use super::{Interpreter, RuntimeError};

/// Both operands converted to their common numeric kind.
enum Numeric {
    Int(i32, i32),
    Long(i64, i64),
    Float(f32, f32),
    Double(f64, f64),
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Int(n) => Some(i64::from(*n)),
        Value::Long(n) => Some(*n),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Int(n) => Some(f64::from(*n)),
        Value::Long(n) => Some(*n as f64),
        Value::Float(n) => Some(f64::from(*n)),
        Value::Double(n) => Some(*n),
        _ => None,
    }
}

/// int with int stays int, long absorbs int, float with float stays float,
/// anything else widens to double.
fn promote(left: &Value, right: &Value) -> Option<Numeric> {
    Some(match (left, right) {
        (Value::Int(a), Value::Int(b)) => Numeric::Int(*a, *b),
        (Value::Int(_) | Value::Long(_), Value::Int(_) | Value::Long(_)) => {
            Numeric::Long(as_i64(left)?, as_i64(right)?)
        }
        (Value::Float(a), Value::Float(b)) => Numeric::Float(*a, *b),
        _ => Numeric::Double(as_f64(left)?, as_f64(right)?),
    })
}

fn invalid(op: BinOp, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::InvalidOperands {
        op: op.symbol(),
        left: left.type_name(),
        right: right.type_name(),
    }
}

// Comparison and logical operators never reach the arithmetic helpers.
fn integer_arith(op: BinOp, a: i64, b: i64) -> Result<i64, RuntimeError> {
    match op {
        BinOp::Add => Ok(a.wrapping_add(b)),
        BinOp::Sub => Ok(a.wrapping_sub(b)),
        BinOp::Mul => Ok(a.wrapping_mul(b)),
        BinOp::Div if b == 0 => Err(RuntimeError::DivisionByZero),
        BinOp::Div => Ok(a.wrapping_div(b)),
        BinOp::Mod if b == 0 => Err(RuntimeError::DivisionByZero),
        BinOp::Mod => Ok(a.wrapping_rem(b)),
        _ => Ok((a as f64).powf(b as f64) as i64),
    }
}

fn float_arith(op: BinOp, a: f64, b: f64) -> f64 {
    match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => a / b,
        BinOp::Mod => a % b,
        _ => a.powf(b),
    }
}

fn ordered(op: BinOp, ordering: Option<Ordering>) -> bool {
    match (op, ordering) {
        (_, None) => false,
        (BinOp::Lt, Some(o)) => o.is_lt(),
        (BinOp::Le, Some(o)) => o.is_le(),
        (BinOp::Gt, Some(o)) => o.is_gt(),
        (_, Some(o)) => o.is_ge(),
    }
}

impl Interpreter {
    pub(super) fn eval_binop(op: BinOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
        match op {
            BinOp::Eq => Ok(Value::Bool(left.loosely_equals(&right))),
            BinOp::Ne => Ok(Value::Bool(!left.loosely_equals(&right))),
            BinOp::And | BinOp::Or | BinOp::Xor => match (&left, &right) {
                (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(match op {
                    BinOp::And => *a && *b,
                    BinOp::Or => *a || *b,
                    _ => a ^ b,
                })),
                _ => Err(invalid(op, &left, &right)),
            },
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                let ordering = match promote(&left, &right).ok_or_else(|| invalid(op, &left, &right))? {
                    Numeric::Int(a, b) => Some(a.cmp(&b)),
                    Numeric::Long(a, b) => Some(a.cmp(&b)),
                    Numeric::Float(a, b) => a.partial_cmp(&b),
                    Numeric::Double(a, b) => a.partial_cmp(&b),
                };
                Ok(Value::Bool(ordered(op, ordering)))
            }
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod | BinOp::Pow => {
                Self::eval_arithmetic(op, left, right)
            }
        }
    }

    fn eval_arithmetic(op: BinOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
        if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
            if op != BinOp::Add {
                return Err(invalid(op, &left, &right));
            }
            return Ok(Value::String(format!("{}{}", left, right)));
        }
        match promote(&left, &right).ok_or_else(|| invalid(op, &left, &right))? {
            // Truncating the i64 result back to 32 bits keeps wrapping semantics.
            Numeric::Int(a, b) => integer_arith(op, i64::from(a), i64::from(b)).map(|n| Value::Int(n as i32)),
            Numeric::Long(a, b) => integer_arith(op, a, b).map(Value::Long),
            Numeric::Float(a, b) => Ok(Value::Float(float_arith(op, f64::from(a), f64::from(b)) as f32)),
            Numeric::Double(a, b) => Ok(Value::Double(float_arith(op, a, b))),
        }
    }

    pub(super) fn eval_unary(op: UnaryOp, operand: Value) -> Result<Value, RuntimeError> {
        match (op, &operand) {
            (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
            (UnaryOp::Neg, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
            (UnaryOp::Neg, Value::Long(n)) => Ok(Value::Long(n.wrapping_neg())),
            (UnaryOp::Neg, Value::Float(n)) => Ok(Value::Float(-n)),
            (UnaryOp::Neg, Value::Double(n)) => Ok(Value::Double(-n)),
            _ => Err(RuntimeError::InvalidOperand {
                op: op.symbol(),
                operand: operand.type_name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binop(op: BinOp, left: Value, right: Value) -> Value {
        Interpreter::eval_binop(op, left, right).unwrap()
    }

    #[test]
    fn numeric_promotion() {
        assert!(matches!(binop(BinOp::Add, Value::Int(2), Value::Int(3)), Value::Int(5)));
        assert!(matches!(binop(BinOp::Add, Value::Int(2), Value::Long(3)), Value::Long(5)));
        assert!(matches!(binop(BinOp::Mul, Value::Float(1.5), Value::Float(2.0)), Value::Float(n) if n == 3.0));
        assert!(matches!(binop(BinOp::Add, Value::Float(1.5), Value::Int(1)), Value::Double(n) if n == 2.5));
        assert!(matches!(binop(BinOp::Sub, Value::Long(1), Value::Double(0.5)), Value::Double(n) if n == 0.5));
    }

    #[test]
    fn integer_semantics() {
        assert!(matches!(binop(BinOp::Div, Value::Int(7), Value::Int(2)), Value::Int(3)));
        assert!(matches!(binop(BinOp::Mod, Value::Int(7), Value::Int(3)), Value::Int(1)));
        assert!(matches!(binop(BinOp::Pow, Value::Int(2), Value::Int(10)), Value::Int(1024)));
        assert!(matches!(binop(BinOp::Add, Value::Int(i32::MAX), Value::Int(1)), Value::Int(i32::MIN)));
        let err = Interpreter::eval_binop(BinOp::Div, Value::Int(1), Value::Int(0)).unwrap_err();
        assert!(matches!(err, RuntimeError::DivisionByZero));
        let err = Interpreter::eval_binop(BinOp::Mod, Value::Long(1), Value::Long(0)).unwrap_err();
        assert!(matches!(err, RuntimeError::DivisionByZero));
    }

    #[test]
    fn string_mode_only_adds() {
        assert!(matches!(binop(BinOp::Add, Value::String("a".into()), Value::Int(1)), Value::String(s) if s == "a1"));
        assert!(matches!(binop(BinOp::Add, Value::Bool(true), Value::String("!".into())), Value::String(s) if s == "true!"));
        let err = Interpreter::eval_binop(BinOp::Mul, Value::String("a".into()), Value::Int(2)).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidOperands { op: "*", left: "string", right: "int" }));
    }

    #[test]
    fn arithmetic_needs_numbers() {
        let err = Interpreter::eval_binop(BinOp::Add, Value::Int(1), Value::Bool(true)).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidOperands { .. }));
        let err = Interpreter::eval_binop(BinOp::Add, Value::Null, Value::Null).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidOperands { .. }));
    }

    #[test]
    fn comparisons() {
        assert!(matches!(binop(BinOp::Lt, Value::Int(1), Value::Double(1.5)), Value::Bool(true)));
        assert!(matches!(binop(BinOp::Ge, Value::Long(2), Value::Int(2)), Value::Bool(true)));
        assert!(matches!(binop(BinOp::Gt, Value::Double(f64::NAN), Value::Double(0.0)), Value::Bool(false)));
        assert!(Interpreter::eval_binop(BinOp::Lt, Value::String("a".into()), Value::String("b".into())).is_err());
    }

    #[test]
    fn equality_is_kind_sensitive() {
        assert!(matches!(binop(BinOp::Eq, Value::Int(1), Value::Int(1)), Value::Bool(true)));
        assert!(matches!(binop(BinOp::Eq, Value::Int(1), Value::Long(1)), Value::Bool(false)));
        assert!(matches!(binop(BinOp::Ne, Value::String("1".into()), Value::Int(1)), Value::Bool(true)));
    }

    #[test]
    fn logical_operators_need_booleans() {
        assert!(matches!(binop(BinOp::Xor, Value::Bool(true), Value::Bool(true)), Value::Bool(false)));
        assert!(matches!(binop(BinOp::Or, Value::Bool(false), Value::Bool(true)), Value::Bool(true)));
        assert!(Interpreter::eval_binop(BinOp::And, Value::Bool(true), Value::Int(1)).is_err());
    }

    #[test]
    fn unary_operators() {
        assert!(matches!(Interpreter::eval_unary(UnaryOp::Not, Value::Bool(true)).unwrap(), Value::Bool(false)));
        assert!(matches!(Interpreter::eval_unary(UnaryOp::Neg, Value::Long(4)).unwrap(), Value::Long(-4)));
        let err = Interpreter::eval_unary(UnaryOp::Not, Value::Int(1)).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidOperand { op: "!", operand: "int" }));
        assert!(Interpreter::eval_unary(UnaryOp::Neg, Value::String("x".into())).is_err());
    }
}
