//! Error types and error handling for the interpreter.
//!
//! This module defines the error types used throughout the pipeline.
//! It includes:
//!
//! - Positioned syntax errors raised by the lexer and parser
//! - Scope errors shared by the static and dynamic passes
//! - Static and dynamic type errors
//! - Input capability errors
//! - Error names and tips used when rendering failures

pub mod errors;
