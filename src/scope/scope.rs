use std::collections::HashMap;

use tracing::trace;

use crate::{
    ast::types::{SourceType, Value},
    errors::errors::ScopeError,
};

/// One lexical level: variable name to entry.
pub type Frame<T> = HashMap<String, T>;

/// A stack of frames, shared in shape by both passes.
///
/// `T` is the payload stored per variable: a [`SourceType`] while
/// typechecking and a [`Value`] while executing. The global frame is held
/// apart from the pushed frames, so it can never be popped.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope<T> {
    global: Frame<T>,
    frames: Vec<Frame<T>>,
}

/// Scope used by the typechecker.
pub type StaticScope = Scope<SourceType>;

/// Scope used by the interpreter.
pub type DynamicScope = Scope<Value>;

impl<T: Clone> Scope<T> {
    /// Creates a scope holding a single empty global frame.
    pub fn new() -> Self {
        Scope {
            global: Frame::new(),
            frames: Vec::new(),
        }
    }

    /// Number of frames currently on the stack, global frame included.
    pub fn depth(&self) -> usize {
        self.frames.len() + 1
    }

    pub fn push_frame(&mut self) {
        self.frames.push(Frame::new());
        trace!(depth = self.depth(), "pushed frame");
    }

    /// Removes the innermost frame.
    ///
    /// # Panics
    ///
    /// Panics if no frame was pushed: every pop must be paired with a
    /// [`Scope::push_frame`].
    pub fn pop_frame(&mut self) {
        if self.frames.pop().is_none() {
            panic!("pop_frame without a matching push_frame");
        }
        trace!(depth = self.depth(), "popped frame");
    }

    /// Runs `f` inside a fresh frame. The frame is popped whether `f` succeeds
    /// or fails, so the depth after the call always equals the depth before.
    pub fn with_frame<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push_frame();
        let result = f(self);
        self.pop_frame();
        result
    }

    /// Finds the innermost binding of `name`.
    pub fn lookup(&self, name: &str) -> Result<T, ScopeError> {
        self.frames
            .iter()
            .rev()
            .chain(std::iter::once(&self.global))
            .find_map(|frame| frame.get(name))
            .cloned()
            .ok_or_else(|| ScopeError::UndefinedName {
                name: name.to_string(),
            })
    }

    /// Binds `name` in the innermost frame. Shadowing a binding of an outer
    /// frame is allowed; redeclaring within the same frame is not.
    pub fn declare(&mut self, name: &str, entry: T) -> Result<(), ScopeError> {
        let frame = self.innermost_frame();
        if frame.contains_key(name) {
            return Err(ScopeError::DuplicateDeclaration {
                name: name.to_string(),
            });
        }

        frame.insert(name.to_string(), entry);
        Ok(())
    }

    fn innermost_frame(&mut self) -> &mut Frame<T> {
        self.frames.last_mut().unwrap_or(&mut self.global)
    }
}

// A variable's type never changes once declared, so only the dynamic scope
// supports updates.
impl Scope<Value> {
    /// Overwrites the innermost binding of `name`.
    pub fn update(&mut self, name: &str, entry: Value) -> Result<(), ScopeError> {
        match self
            .frames
            .iter_mut()
            .rev()
            .chain(std::iter::once(&mut self.global))
            .find_map(|frame| frame.get_mut(name))
        {
            Some(slot) => {
                *slot = entry;
                Ok(())
            }
            None => Err(ScopeError::UndeclaredAssignment {
                name: name.to_string(),
            }),
        }
    }
}

impl<T: Clone> Default for Scope<T> {
    fn default() -> Self {
        Scope::new()
    }
}
