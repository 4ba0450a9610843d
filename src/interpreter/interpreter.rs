//! Interpreter state and the execution entry point.
//!
//! The interpreter walks the statement tree directly. It owns the dynamic
//! scope for one run and borrows the host's input and output capabilities.

use tracing::{debug, instrument};

use crate::{
    ast::statements::Stmt, errors::errors::RuntimeError, scope::scope::DynamicScope,
};

use super::{
    runtime::{InputSource, OutputSink},
    stmt::execute_stmt,
};

/// The state of one program run.
///
/// # Lifetime Parameters
///
/// * `'a` - Lifetime of the borrowed input and output capabilities
pub struct Interpreter<'a> {
    /// Values of the variables currently in scope
    pub scope: DynamicScope,
    /// Source of `input<T>` values
    pub input: &'a mut dyn InputSource,
    /// Destination of `print` statements
    pub output: &'a mut dyn OutputSink,
}

impl<'a> Interpreter<'a> {
    /// Creates an interpreter with a fresh single-frame scope.
    pub fn new(input: &'a mut dyn InputSource, output: &'a mut dyn OutputSink) -> Self {
        Interpreter {
            scope: DynamicScope::new(),
            input,
            output,
        }
    }

    /// Runs `f` inside a fresh frame, popping it on success and on failure.
    pub fn in_frame<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, RuntimeError>,
    ) -> Result<R, RuntimeError> {
        self.scope.push_frame();
        let result = f(self);
        self.scope.pop_frame();
        result
    }
}

/// Executes a whole program in a fresh single-frame scope.
///
/// Any scope, dynamic type or input error aborts the run; output already
/// printed stays printed.
#[instrument(level = "debug", skip_all)]
pub fn execute(
    program: &Stmt,
    input: &mut dyn InputSource,
    output: &mut dyn OutputSink,
) -> Result<(), RuntimeError> {
    let mut interpreter = Interpreter::new(input, output);
    let result = execute_stmt(&mut interpreter, program);

    match &result {
        Ok(()) => debug!("program finished"),
        Err(error) => debug!(%error, "program aborted"),
    }

    result
}
