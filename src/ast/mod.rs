/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - expressions: Definitions for the expression tree
/// - statements: Definitions for the statement tree and switch cases
/// - types: Source types and runtime values
pub mod expressions;
pub mod statements;
pub mod types;
