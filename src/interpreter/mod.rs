//! Tree-walking execution module.
//!
//! This module runs a statement tree against a dynamic scope. It handles:
//!
//! - Evaluation of expressions with runtime type assertions
//! - Execution of statements (declarations, updates, printing, control flow)
//! - Frame management mirroring the typechecker's
//! - The injected input and output capabilities

pub mod expr;
pub mod interpreter;
pub mod runtime;
pub mod stmt;

#[cfg(test)]
mod tests;
