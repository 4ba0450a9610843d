//! Type inference for expressions.
//!
//! Inference is total: given the types of the variables in scope, every
//! well-typed expression has exactly one source type, and no code is run to
//! find it.

use crate::{
    ast::{
        expressions::{BinaryOperator, Expr, PrefixOperator},
        types::{SourceType, Value},
    },
    errors::errors::{StaticError, StaticTypeError},
    scope::scope::StaticScope,
};

/// Fails unless `actual` is `expected`.
pub fn assert_type(expected: SourceType, actual: SourceType) -> Result<(), StaticError> {
    if expected != actual {
        return Err(StaticTypeError::TypeMismatch { expected, actual }.into());
    }
    Ok(())
}

/// Returns the natural type of a literal value.
pub fn infer_value_type(value: &Value) -> SourceType {
    value.get_type()
}

fn infer_infix_expr_type(
    operand_type: SourceType,
    result_type: SourceType,
    scope: &StaticScope,
    left: &Expr,
    right: &Expr,
) -> Result<SourceType, StaticError> {
    let left_type = infer_expr_type(scope, left)?;
    let right_type = infer_expr_type(scope, right)?;

    assert_type(operand_type, left_type)?;
    assert_type(operand_type, right_type)?;

    Ok(result_type)
}

fn infer_prefix_expr_type(
    operand_type: SourceType,
    result_type: SourceType,
    scope: &StaticScope,
    right_expr: &Expr,
) -> Result<SourceType, StaticError> {
    let ty = infer_expr_type(scope, right_expr)?;
    assert_type(operand_type, ty)?;
    Ok(result_type)
}

/// Infers the source type of `expr`, failing with a scope error on unbound
/// names and a type mismatch on ill-typed operators.
pub fn infer_expr_type(scope: &StaticScope, expr: &Expr) -> Result<SourceType, StaticError> {
    match expr {
        Expr::Number(_) => Ok(SourceType::Num),
        Expr::Boolean(_) => Ok(SourceType::Bool),
        Expr::Symbol(name) => Ok(scope.lookup(name)?),
        // Never performs the read
        Expr::Input(ty) => Ok(*ty),
        Expr::Prefix {
            operator,
            right_expr,
        } => match operator {
            PrefixOperator::Negate => {
                infer_prefix_expr_type(SourceType::Num, SourceType::Num, scope, right_expr)
            }
            PrefixOperator::Not => {
                infer_prefix_expr_type(SourceType::Bool, SourceType::Bool, scope, right_expr)
            }
        },
        Expr::Binary {
            left,
            operator,
            right,
        } => match operator {
            BinaryOperator::Plus
            | BinaryOperator::Minus
            | BinaryOperator::Times
            | BinaryOperator::Divide
            | BinaryOperator::Exponent => {
                infer_infix_expr_type(SourceType::Num, SourceType::Num, scope, left, right)
            }
            // Either type, as long as both sides agree
            BinaryOperator::LessThan | BinaryOperator::Equal => {
                let left_type = infer_expr_type(scope, left)?;
                let right_type = infer_expr_type(scope, right)?;
                assert_type(left_type, right_type)?;
                Ok(SourceType::Bool)
            }
            // Logical on booleans first, bitwise on numbers otherwise.
            BinaryOperator::And | BinaryOperator::Or => {
                infer_infix_expr_type(SourceType::Bool, SourceType::Bool, scope, left, right)
                    .or_else(|_| {
                        infer_infix_expr_type(SourceType::Num, SourceType::Num, scope, left, right)
                    })
            }
        },
    }
}
