use std::fmt::Display;

/// Source Type
///
/// A type in the interpreted language. The language has exactly two, and
/// their names double as the tags of the literal leaves in the AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    Num,
    Bool,
}

impl SourceType {
    /// Resolves a type keyword (`num`, `bool`) into a source type.
    pub fn from_name(name: &str) -> Option<SourceType> {
        match name {
            "num" => Some(SourceType::Num),
            "bool" => Some(SourceType::Bool),
            _ => None,
        }
    }
}

impl Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceType::Num => write!(f, "num"),
            SourceType::Bool => write!(f, "bool"),
        }
    }
}

/// Value
///
/// A runtime value. Only produced by evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Num(f64),
    Bool(bool),
}

impl Value {
    /// Returns the natural source type of the value.
    pub fn get_type(&self) -> SourceType {
        match self {
            Value::Num(_) => SourceType::Num,
            Value::Bool(_) => SourceType::Bool,
        }
    }

    /// Truthiness used by `if` and `while` conditions. Numbers are truthy
    /// unless zero or NaN.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Num(value) => *value != 0.0 && !value.is_nan(),
            Value::Bool(value) => *value,
        }
    }

    /// Key equality used by switch cases.
    ///
    /// Unlike `==`, NaN is the same key as NaN. A number is never the same key
    /// as a boolean.
    pub fn same_key(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Num(left), Value::Num(right)) => {
                left == right || (left.is_nan() && right.is_nan())
            }
            (Value::Bool(left), Value::Bool(right)) => left == right,
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Num(value) if value.is_infinite() => {
                if value.is_sign_positive() {
                    write!(f, "Infinity")
                } else {
                    write!(f, "-Infinity")
                }
            }
            // -0 prints as 0
            Value::Num(value) if *value == 0.0 => write!(f, "0"),
            Value::Num(value) => write!(f, "{}", value),
            Value::Bool(value) => write!(f, "{}", value),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Num(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}
