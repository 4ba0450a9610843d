//! Parser module for building the statement tree.
//!
//! This module transforms a stream of tokens into a `Stmt` tree. It uses a
//! Pratt parser for expressions and handles:
//!
//! - Statement parsing (declarations, updates, printing, control flow)
//! - Expression parsing (binary and prefix operators, literals, input)
//! - Switch case labels, folded into ordered case maps
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
