use tracing::trace;

use crate::{ast::statements::Stmt, errors::errors::RuntimeError};

use super::{expr::eval_expr, interpreter::Interpreter};

pub fn execute_stmt(interpreter: &mut Interpreter, stmt: &Stmt) -> Result<(), RuntimeError> {
    match stmt {
        Stmt::VarDecl { name, initial_expr } => {
            let initial_value = eval_expr(interpreter, initial_expr)?;
            interpreter.scope.declare(name, initial_value)?;
        }
        Stmt::VarUpdate { name, new_expr } => {
            let new_value = eval_expr(interpreter, new_expr)?;
            interpreter.scope.update(name, new_value)?;
        }
        Stmt::Print(expr) => {
            let value = eval_expr(interpreter, expr)?;
            interpreter.output.print_line(&value);
        }
        Stmt::Block(body) => {
            interpreter.in_frame(|interpreter| {
                body.iter()
                    .try_for_each(|stmt| execute_stmt(interpreter, stmt))
            })?;
        }
        Stmt::If {
            condition,
            true_branch,
            false_branch,
        } => {
            interpreter.in_frame(|interpreter| {
                if eval_expr(interpreter, condition)?.is_truthy() {
                    execute_stmt(interpreter, true_branch)
                } else if let Some(false_branch) = false_branch {
                    execute_stmt(interpreter, false_branch)
                } else {
                    Ok(())
                }
            })?;
        }
        // One frame for the whole loop, shared by every iteration.
        Stmt::While { condition, body } => {
            interpreter.in_frame(|interpreter| {
                while eval_expr(interpreter, condition)?.is_truthy() {
                    execute_stmt(interpreter, body)?;
                }
                Ok(())
            })?;
        }
        Stmt::Switch {
            focus,
            value_cases,
            default_case,
        } => {
            interpreter.in_frame(|interpreter| {
                let focus_value = eval_expr(interpreter, focus)?;
                match value_cases.get(&focus_value) {
                    Some(body) => {
                        trace!(%focus_value, "switch matched case");
                        execute_stmt(interpreter, body)
                    }
                    None => match default_case {
                        Some(default_case) => {
                            trace!(%focus_value, "switch fell through to default");
                            execute_stmt(interpreter, default_case)
                        }
                        None => Ok(()),
                    },
                }
            })?;
        }
    }

    Ok(())
}
