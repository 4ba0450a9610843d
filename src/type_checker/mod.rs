//! Type checking and semantic analysis module.
//!
//! This module performs the static pass over the AST. It:
//!
//! - Infers the source type of every expression
//! - Verifies that operators, conditions, assignments and switch cases agree
//!   on types
//! - Resolves variable references against a static scope stack
//! - Rejects duplicate declarations and assignments to undeclared names
//!
//! Nothing is executed here; `input` expressions are typed by their
//! annotation alone.

pub mod infer;
pub mod type_checker;
