//! Host capabilities used while executing a program.
//!
//! The interpreter never touches stdin/stdout directly: `input<T>` goes
//! through an [`InputSource`] and `print` goes through an [`OutputSink`].
//! The binary wires these to the terminal; tests use the scripted
//! `VecDeque<Value>` source and the capturing `Vec<Value>` sink.

use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{
    ast::types::{SourceType, Value},
    errors::errors::InputError,
};

/// Supplies values for `input<T>` expressions.
///
/// A successful read returns a value whose type is exactly `ty`. Reads may
/// block.
pub trait InputSource {
    fn read_input(&mut self, ty: SourceType) -> Result<Value, InputError>;
}

/// Receives the values of `print` statements, in execution order.
pub trait OutputSink {
    fn print_line(&mut self, value: &Value);
}

lazy_static! {
    // Number literal spelling, optionally negated, plus the infinities.
    static ref NUMBER_INPUT: Regex = Regex::new("^-?([0-9]+(\\.[0-9]+)?|Infinity)$").unwrap();
}

/// Parses user-entered text as a value of type `ty`.
///
/// Numbers use the literal spelling with an optional leading `-`, or
/// `Infinity`/`-Infinity`. Exponents, `inf` and `NaN` are rejected.
pub fn parse_input_text(text: &str, ty: SourceType) -> Option<Value> {
    let text = text.trim();
    match ty {
        SourceType::Num => {
            if !NUMBER_INPUT.is_match(text) {
                return None;
            }
            match text {
                "Infinity" => Some(Value::Num(f64::INFINITY)),
                "-Infinity" => Some(Value::Num(f64::NEG_INFINITY)),
                _ => text.parse::<f64>().ok().map(Value::Num),
            }
        }
        SourceType::Bool => match text {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
    }
}

/// Line-based input that prompts on `prompt` and keeps asking until a valid
/// value of the requested type is entered.
pub struct LineInput<R: BufRead, W: Write> {
    reader: R,
    prompt: W,
}

impl<R: BufRead, W: Write> LineInput<R, W> {
    pub fn new(reader: R, prompt: W) -> Self {
        LineInput { reader, prompt }
    }
}

impl LineInput<io::StdinLock<'static>, io::Stderr> {
    /// Reads from stdin, prompting on stderr so prompts never mix with program
    /// output.
    pub fn stdin() -> Self {
        LineInput::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> InputSource for LineInput<R, W> {
    fn read_input(&mut self, ty: SourceType) -> Result<Value, InputError> {
        loop {
            write!(self.prompt, "Enter a value of type {}. ", ty)?;
            self.prompt.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(InputError::Closed { expected: ty });
            }

            match parse_input_text(&line, ty) {
                Some(value) => return Ok(value),
                None => trace!(text = line.trim(), %ty, "rejected input"),
            }
        }
    }
}

/// Prints each value on its own line of stdout.
#[derive(Debug, Default)]
pub struct StdoutOutput;

impl OutputSink for StdoutOutput {
    fn print_line(&mut self, value: &Value) {
        println!("{}", value);
    }
}

impl InputSource for VecDeque<Value> {
    fn read_input(&mut self, ty: SourceType) -> Result<Value, InputError> {
        match self.pop_front() {
            Some(value) if value.get_type() == ty => Ok(value),
            Some(value) => Err(InputError::Mismatch { expected: ty, value }),
            None => Err(InputError::Closed { expected: ty }),
        }
    }
}

impl OutputSink for Vec<Value> {
    fn print_line(&mut self, value: &Value) {
        self.push(*value);
    }
}
