use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("declare", TokenKind::Declare);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("switch", TokenKind::Switch);
        map.insert("case", TokenKind::Case);
        map.insert("default", TokenKind::Default);
        map.insert("input", TokenKind::Input);
        map.insert("print", TokenKind::Print);
        map.insert("num", TokenKind::TypeName);
        map.insert("bool", TokenKind::TypeName);
        map.insert("true", TokenKind::Boolean);
        map.insert("false", TokenKind::Boolean);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    Boolean,
    Identifier,
    TypeName,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !

    Less,
    Greater,

    Or,
    And,

    Semicolon,
    Colon,

    Plus,
    Dash,
    Slash,
    Star,
    Caret,

    // Reserved
    Declare,
    If,
    Else,
    While,
    Switch,
    Case,
    Default,
    Input,
    Print,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Number | TokenKind::Boolean | TokenKind::Identifier | TokenKind::TypeName => {
                write!(f, "{} ({})", self.kind, self.value)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}
