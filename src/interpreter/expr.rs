use tracing::trace;

use crate::{
    ast::{
        expressions::{BinaryOperator, Expr, PrefixOperator},
        types::{SourceType, Value},
    },
    errors::errors::{DynamicTypeError, RuntimeError},
};

use super::interpreter::Interpreter;

pub fn assert_num(value: Value) -> Result<f64, DynamicTypeError> {
    match value {
        Value::Num(number) => Ok(number),
        _ => Err(DynamicTypeError::Expected {
            expected: SourceType::Num,
            value,
        }),
    }
}

pub fn assert_bool(value: Value) -> Result<bool, DynamicTypeError> {
    match value {
        Value::Bool(boolean) => Ok(boolean),
        _ => Err(DynamicTypeError::Expected {
            expected: SourceType::Bool,
            value,
        }),
    }
}

pub fn assert_same_type(left: Value, right: Value) -> Result<(), DynamicTypeError> {
    if left.get_type() != right.get_type() {
        return Err(DynamicTypeError::SameType { left, right });
    }
    Ok(())
}

/// Converts a number to a 32-bit signed integer the way bitwise operators
/// expect: truncate, wrap modulo 2^32, and send NaN and infinities to 0.
pub fn to_int32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let wrapped = value.trunc().rem_euclid(4294967296.0);
    wrapped as u32 as i32
}

fn eval_numeric(operator: BinaryOperator, left: f64, right: f64) -> Value {
    match operator {
        BinaryOperator::Plus => Value::Num(left + right),
        BinaryOperator::Minus => Value::Num(left - right),
        BinaryOperator::Times => Value::Num(left * right),
        BinaryOperator::Divide => Value::Num(left / right),
        BinaryOperator::Exponent => Value::Num(left.powf(right)),
        BinaryOperator::And => Value::Num((to_int32(left) & to_int32(right)) as f64),
        BinaryOperator::Or => Value::Num((to_int32(left) | to_int32(right)) as f64),
        BinaryOperator::LessThan => Value::Bool(left < right),
        BinaryOperator::Equal => Value::Bool(left == right),
    }
}

fn eval_binary(
    operator: BinaryOperator,
    left_value: Value,
    right_value: Value,
) -> Result<Value, DynamicTypeError> {
    match operator {
        BinaryOperator::Plus
        | BinaryOperator::Minus
        | BinaryOperator::Times
        | BinaryOperator::Divide
        | BinaryOperator::Exponent => {
            let left = assert_num(left_value)?;
            let right = assert_num(right_value)?;
            Ok(eval_numeric(operator, left, right))
        }
        // The left operand picks the overload; the right one must agree.
        BinaryOperator::And | BinaryOperator::Or => match left_value {
            Value::Num(left) => {
                let right = assert_num(right_value)?;
                Ok(eval_numeric(operator, left, right))
            }
            Value::Bool(left) => {
                let right = assert_bool(right_value)?;
                Ok(Value::Bool(match operator {
                    BinaryOperator::And => left && right,
                    _ => left || right,
                }))
            }
        },
        BinaryOperator::LessThan => match (left_value, right_value) {
            (Value::Num(left), Value::Num(right)) => Ok(Value::Bool(left < right)),
            (Value::Bool(left), Value::Bool(right)) => Ok(Value::Bool(!left & right)),
            _ => Err(DynamicTypeError::SameType {
                left: left_value,
                right: right_value,
            }),
        },
        BinaryOperator::Equal => {
            assert_same_type(left_value, right_value)?;
            Ok(Value::Bool(left_value == right_value))
        }
    }
}

/// Evaluates `expr`, operands left to right before the operator applies.
pub fn eval_expr(interpreter: &mut Interpreter, expr: &Expr) -> Result<Value, RuntimeError> {
    match expr {
        Expr::Number(value) => Ok(Value::Num(*value)),
        Expr::Boolean(value) => Ok(Value::Bool(*value)),
        Expr::Symbol(name) => Ok(interpreter.scope.lookup(name)?),
        Expr::Input(ty) => {
            let value = interpreter.input.read_input(*ty)?;
            trace!(%ty, %value, "read input");
            Ok(value)
        }
        Expr::Prefix {
            operator,
            right_expr,
        } => {
            let value = eval_expr(interpreter, right_expr)?;
            match operator {
                PrefixOperator::Negate => Ok(Value::Num(-assert_num(value)?)),
                PrefixOperator::Not => Ok(Value::Bool(!assert_bool(value)?)),
            }
        }
        // No short circuit: both sides are always evaluated
        Expr::Binary {
            left,
            operator,
            right,
        } => {
            let left_value = eval_expr(interpreter, left)?;
            let right_value = eval_expr(interpreter, right)?;
            Ok(eval_binary(*operator, left_value, right_value)?)
        }
    }
}
