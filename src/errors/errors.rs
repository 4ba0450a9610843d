use std::fmt::Display;

use thiserror::Error;

use crate::{
    ast::types::{SourceType, Value},
    Position,
};

/// A lexing or parsing failure, pinned to a position in the source.
#[derive(Debug, Clone)]
pub struct SyntaxError {
    internal_error: SyntaxErrorImpl,
    position: Position,
}

impl SyntaxError {
    pub fn new(error_impl: SyntaxErrorImpl, position: Position) -> Self {
        SyntaxError {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &SyntaxErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            SyntaxErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            SyntaxErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            SyntaxErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            SyntaxErrorImpl::NumberParseError { .. } => "NumberParseError",
            SyntaxErrorImpl::UnknownType { .. } => "UnknownType",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            SyntaxErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            SyntaxErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            SyntaxErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            SyntaxErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            SyntaxErrorImpl::UnknownType { type_ } => ErrorTip::Suggestion(format!(
                "Unknown type `{}` found, expected `num` or `bool`",
                type_
            )),
        }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position.0)
    }
}

impl std::error::Error for SyntaxError {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
}

/// Raised by the scope model; shared by both passes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScopeError {
    #[error("duplicate variable definition: {name}")]
    DuplicateDeclaration { name: String },
    #[error("assignment to undeclared variable name: {name}")]
    UndeclaredAssignment { name: String },
    #[error("name is not in scope: {name}")]
    UndefinedName { name: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StaticTypeError {
    #[error("expected type {expected}, got type {actual}")]
    TypeMismatch {
        expected: SourceType,
        actual: SourceType,
    },
}

/// Raised by the evaluator when a runtime value has the wrong tag for an
/// operator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DynamicTypeError {
    #[error("expected {expected}, got {value}")]
    Expected { expected: SourceType, value: Value },
    #[error("expected same types, got {left} and {right}")]
    SameType { left: Value, right: Value },
}

/// Failures of the input capability.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("input closed while waiting for a value of type {expected}")]
    Closed { expected: SourceType },
    #[error("failed to read input: {message}")]
    Io { message: String },
    #[error("expected input of type {expected}, got {value}")]
    Mismatch { expected: SourceType, value: Value },
}

impl From<std::io::Error> for InputError {
    fn from(error: std::io::Error) -> Self {
        InputError::Io {
            message: error.to_string(),
        }
    }
}

/// Everything that can reject a program before execution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StaticError {
    #[error(transparent)]
    Scope(#[from] ScopeError),
    #[error(transparent)]
    Type(#[from] StaticTypeError),
}

impl StaticError {
    pub fn get_error_name(&self) -> &str {
        match self {
            StaticError::Scope(_) => "ScopeError",
            StaticError::Type(_) => "StaticTypeError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        ErrorTip::Suggestion(self.to_string())
    }
}

/// Everything that can abort a running program.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error(transparent)]
    Scope(#[from] ScopeError),
    #[error(transparent)]
    Type(#[from] DynamicTypeError),
    #[error(transparent)]
    Input(#[from] InputError),
}

impl RuntimeError {
    pub fn get_error_name(&self) -> &str {
        match self {
            RuntimeError::Scope(_) => "ScopeError",
            RuntimeError::Type(_) => "DynamicTypeError",
            RuntimeError::Input(_) => "InputError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        ErrorTip::Suggestion(self.to_string())
    }
}

/// Any failure of the whole pipeline, from source text to finished run.
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Static(#[from] StaticError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    pub fn get_error_name(&self) -> &str {
        match self {
            Error::Syntax(error) => error.get_error_name(),
            Error::Static(error) => error.get_error_name(),
            Error::Runtime(error) => error.get_error_name(),
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match self {
            Error::Syntax(error) => error.get_tip(),
            Error::Static(error) => error.get_tip(),
            Error::Runtime(error) => error.get_tip(),
        }
    }

    /// Source position, known only for syntax errors.
    pub fn get_position(&self) -> Option<&Position> {
        match self {
            Error::Syntax(error) => Some(error.get_position()),
            _ => None,
        }
    }
}
