use std::fmt::Display;

use super::{expressions::Expr, types::Value};

/// Value Cases
///
/// The literal-keyed cases of a switch statement, in source order.
/// Inserting a key that is already present replaces that case's body in place,
/// so the last case written for a value wins and each key appears once.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueCases {
    entries: Vec<(Value, Stmt)>,
}

impl ValueCases {
    pub fn new() -> Self {
        ValueCases { entries: vec![] }
    }

    /// Adds a case, overriding any earlier case with the same key.
    pub fn insert(&mut self, value: Value, body: Stmt) {
        match self.entries.iter_mut().find(|(key, _)| key.same_key(&value)) {
            Some(entry) => entry.1 = body,
            None => self.entries.push((value, body)),
        }
    }

    pub fn get(&self, value: &Value) -> Option<&Stmt> {
        self.entries
            .iter()
            .find(|(key, _)| key.same_key(value))
            .map(|(_, body)| body)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Value, Stmt)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Value, Stmt)> for ValueCases {
    fn from_iter<I: IntoIterator<Item = (Value, Stmt)>>(iter: I) -> Self {
        let mut cases = ValueCases::new();
        for (value, body) in iter {
            cases.insert(value, body);
        }
        cases
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl {
        name: String,
        initial_expr: Expr,
    },
    VarUpdate {
        name: String,
        new_expr: Expr,
    },
    Print(Expr),
    Block(Vec<Stmt>),
    If {
        condition: Expr,
        true_branch: Box<Stmt>,
        false_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    Switch {
        focus: Expr,
        value_cases: ValueCases,
        default_case: Option<Box<Stmt>>,
    },
}

impl Stmt {
    fn fmt_indented(&self, f: &mut std::fmt::Formatter<'_>, indent_level: usize) -> std::fmt::Result {
        let indent = "  ".repeat(indent_level);
        match self {
            Stmt::VarDecl { name, initial_expr } => {
                write!(f, "{}declare {} = {};", indent, name, initial_expr)
            }
            Stmt::VarUpdate { name, new_expr } => write!(f, "{}{} = {};", indent, name, new_expr),
            Stmt::Print(expr) => write!(f, "{}print {};", indent, expr),
            Stmt::Block(body) => {
                writeln!(f, "{}{{", indent)?;
                for stmt in body {
                    stmt.fmt_indented(f, indent_level + 1)?;
                    writeln!(f)?;
                }
                write!(f, "{}}}", indent)
            }
            Stmt::If {
                condition,
                true_branch,
                false_branch,
            } => {
                writeln!(f, "{}if ({})", indent, condition)?;
                true_branch.fmt_indented(f, indent_level + 1)?;
                if let Some(false_branch) = false_branch {
                    writeln!(f)?;
                    writeln!(f, "{}else", indent)?;
                    false_branch.fmt_indented(f, indent_level + 1)?;
                }
                Ok(())
            }
            Stmt::While { condition, body } => {
                writeln!(f, "{}while ({})", indent, condition)?;
                body.fmt_indented(f, indent_level + 1)
            }
            Stmt::Switch {
                focus,
                value_cases,
                default_case,
            } => {
                writeln!(f, "{}switch ({}) {{", indent, focus)?;
                for (value, body) in value_cases.iter() {
                    writeln!(f, "{}  case {}:", indent, value)?;
                    body.fmt_indented(f, indent_level + 2)?;
                    writeln!(f)?;
                }
                if let Some(default_case) = default_case {
                    writeln!(f, "{}  default:", indent)?;
                    default_case.fmt_indented(f, indent_level + 2)?;
                    writeln!(f)?;
                }
                write!(f, "{}}}", indent)
            }
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_indented(f, 0)
    }
}
