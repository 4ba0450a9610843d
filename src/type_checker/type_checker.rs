use tracing::{debug, instrument, trace};

use crate::{
    ast::{statements::Stmt, types::SourceType},
    errors::errors::{ScopeError, StaticError},
    scope::scope::StaticScope,
};

use super::infer::{assert_type, infer_expr_type, infer_value_type};

/// Typechecks a whole program in a fresh single-frame scope.
///
/// Succeeds silently; the first scoping or typing error aborts the check.
#[instrument(level = "debug", skip_all)]
pub fn type_check(program: &Stmt) -> Result<(), StaticError> {
    let mut scope = StaticScope::new();
    let result = type_check_stmt(&mut scope, program);

    match &result {
        Ok(()) => debug!("program typechecked"),
        Err(error) => debug!(%error, "program rejected"),
    }

    result
}

/// Checks `stmt` against `scope`. The scope has the same depth when this
/// returns as when it was called, whether or not the check succeeded.
pub fn type_check_stmt(scope: &mut StaticScope, stmt: &Stmt) -> Result<(), StaticError> {
    match stmt {
        Stmt::VarDecl { name, initial_expr } => {
            let initial_type = infer_expr_type(scope, initial_expr)?;
            trace!(%name, ty = %initial_type, "declared");
            scope.declare(name, initial_type)?;
        }
        Stmt::VarUpdate { name, new_expr } => {
            let var_type = scope
                .lookup(name)
                .map_err(|_| ScopeError::UndeclaredAssignment { name: name.clone() })?;
            let new_type = infer_expr_type(scope, new_expr)?;
            assert_type(var_type, new_type)?;
        }
        // Only checked for well-typedness
        Stmt::Print(expr) => {
            infer_expr_type(scope, expr)?;
        }
        Stmt::Block(body) => {
            scope.with_frame(|scope| {
                body.iter()
                    .try_for_each(|stmt| type_check_stmt(scope, stmt))
            })?;
        }
        // Both branches are checked since either may run.
        Stmt::If {
            condition,
            true_branch,
            false_branch,
        } => {
            let condition_type = infer_expr_type(scope, condition)?;
            assert_type(SourceType::Bool, condition_type)?;

            scope.with_frame(|scope| type_check_stmt(scope, true_branch))?;

            if let Some(false_branch) = false_branch {
                scope.with_frame(|scope| type_check_stmt(scope, false_branch))?;
            }
        }
        // One pass over the body covers every iteration: no type can change
        // between iterations.
        Stmt::While { condition, body } => {
            scope.with_frame(|scope| {
                let condition_type = infer_expr_type(scope, condition)?;
                assert_type(SourceType::Bool, condition_type)?;
                type_check_stmt(scope, body)
            })?;
        }
        Stmt::Switch {
            focus,
            value_cases,
            default_case,
        } => {
            let focus_type = infer_expr_type(scope, focus)?;

            for (value, body) in value_cases.iter() {
                assert_type(focus_type, infer_value_type(value))?;
                scope.with_frame(|scope| type_check_stmt(scope, body))?;
            }

            if let Some(default_case) = default_case {
                scope.with_frame(|scope| type_check_stmt(scope, default_case))?;
            }
        }
    }

    Ok(())
}
