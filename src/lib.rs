#![allow(clippy::module_inception)]

use std::{rc::Rc, sync::Once};

use tracing::debug;

use crate::{
    ast::statements::Stmt,
    errors::errors::{Error, ErrorTip, SyntaxError},
    interpreter::runtime::{InputSource, OutputSink},
};

pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope;
pub mod type_checker;

pub use interpreter::interpreter::execute;
pub use type_checker::type_checker::type_check;

extern crate regex;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=minilang=debug` or
/// `RUST_LOG=minilang=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(filter)
                .init();
        }
    });
}

/// A byte offset into a named source.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Tokenizes and parses `source` into a program block.
pub fn parse_source(source: &str, file: Option<String>) -> Result<Stmt, SyntaxError> {
    let tokens = lexer::lexer::tokenize(source, file)?;
    debug!(tokens = tokens.len(), "tokenized source");
    parser::parser::parse(tokens)
}

/// Parses and typechecks `source`.
pub fn check_source(source: &str, file: Option<String>) -> Result<Stmt, Error> {
    let program = parse_source(source, file)?;
    type_check(&program)?;
    Ok(program)
}

/// Parses, typechecks and runs `source` against the given capabilities.
pub fn run_source(
    source: &str,
    file: Option<String>,
    input: &mut dyn InputSource,
    output: &mut dyn OutputSink,
) -> Result<(), Error> {
    let program = check_source(source, file)?;
    execute(&program, input, output)?;
    Ok(())
}

/// Finds the line containing byte offset `position`.
///
/// Returns the 1-based line number, the line's text and the offset within
/// that line, or `None` when `position` is past the end of `source`.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;
    let mut start = 0;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line.to_string(), pos - start));
        }

        start = end;
    }

    None
}

/// Renders `error` for a terminal. Syntax errors point into the source line:
///
/// ```text
/// Error: UnexpectedToken (Unexpected token: `print`, did you miss a semicolon?)
/// -> main.ml
///    |
/// 20 | print x
///    | --------^
/// ```
pub fn format_error(error: &Error, source: &str, file: &str) -> String {
    let mut out = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}\n", error.get_error_name())
    } else {
        format!("Error: {} ({})\n", error.get_error_name(), error.get_tip())
    };
    out.push_str(&format!("-> {}\n", file));

    let Some(position) = error.get_position() else {
        return out;
    };

    // Errors at end of input point one past the last character
    let (line, line_text, line_pos) =
        get_line_at_position(source, position.0).unwrap_or_else(|| {
            let text = source.lines().last().unwrap_or("").to_string();
            let column = text.len();
            (source.lines().count().max(1), text, column)
        });

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

/// Prints `error` to stderr.
pub fn display_error(error: &Error, source: &str, file: &str) {
    eprint!("{}", format_error(error, source, file));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.len() - string.trim_start_matches([' ', '\t']).len();
    (String::from(&string[start..]), start)
}
