use std::fmt::Display;

use super::types::SourceType;

/// Binary operators.
///
/// `And`/`Or` are overloaded over both source types: logical on booleans,
/// bitwise on numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Times,
    Divide,
    Exponent,
    And,
    Or,
    LessThan,
    Equal,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Times => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Exponent => "^",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::LessThan => "<",
            BinaryOperator::Equal => "==",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixOperator {
    Negate,
    Not,
}

impl PrefixOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            PrefixOperator::Negate => "-",
            PrefixOperator::Not => "!",
        }
    }
}

/// Expression
///
/// Every interior node owns its operands exclusively.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // LITERALS
    Number(f64),
    Boolean(bool),

    /// Variable reference.
    Symbol(String),
    /// Reads a value of the given type from the host at runtime.
    Input(SourceType),

    // COMPLEX
    Binary {
        left: Box<Expr>,
        operator: BinaryOperator,
        right: Box<Expr>,
    },
    Prefix {
        operator: PrefixOperator,
        right_expr: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(left: Expr, operator: BinaryOperator, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn prefix(operator: PrefixOperator, right_expr: Expr) -> Self {
        Expr::Prefix {
            operator,
            right_expr: Box::new(right_expr),
        }
    }

    pub fn symbol(name: &str) -> Self {
        Expr::Symbol(String::from(name))
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Number(value) => write!(f, "{}", super::types::Value::Num(*value)),
            Expr::Boolean(value) => write!(f, "{}", value),
            Expr::Symbol(name) => write!(f, "{}", name),
            Expr::Input(ty) => write!(f, "input<{}>", ty),
            Expr::Binary {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator.symbol(), right),
            Expr::Prefix {
                operator,
                right_expr,
            } => write!(f, "({} {})", operator.symbol(), right_expr),
        }
    }
}
