//! Nested variable environments.
//!
//! A single generic scope stack is shared by the typechecker (which stores a
//! source type per variable) and the interpreter (which stores a value).
//! Frames are pushed when entering blocks, branches, loop bodies and switch
//! cases, and popped when leaving them.

pub mod scope;
