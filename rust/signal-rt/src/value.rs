//! Runtime values carried by reactors.
//!
//! The compiler's data types (`Bool`, `Integer`, `Float`, `Text`) only exist
//! as types until a literal is lowered; from that point on every reactor in
//! the graph passes concrete `Value`s around. Keeping this as one enum
//! (rather than a generic reactor over `T`) is what lets the translator hand
//! out a single, object-safe `ReactorBuilder` trait for every built-in.

use std::fmt;

/// A single runtime value flowing through the reactor graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl Value {
    /// Adds two values of like kind. Panics on mismatched operands: by the
    /// time a reactor graph is built, the type checker has already proven
    /// the operands agree, so a mismatch here is a translator bug.
    pub fn add(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Value::Int(a + b),
            (Value::Float(a), Value::Float(b)) => Value::Float(a + b),
            (Value::Text(a), Value::Text(b)) => Value::Text(format!("{a}{b}")),
            _ => panic!("add: mismatched operand types {self:?} / {other:?}"),
        }
    }

    pub fn subtract(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Value::Int(a - b),
            (Value::Float(a), Value::Float(b)) => Value::Float(a - b),
            _ => panic!("subtract: mismatched operand types {self:?} / {other:?}"),
        }
    }

    pub fn multiply(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Value::Int(a * b),
            (Value::Float(a), Value::Float(b)) => Value::Float(a * b),
            _ => panic!("multiply: mismatched operand types {self:?} / {other:?}"),
        }
    }

    pub fn divide(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Value::Int(a / b),
            (Value::Float(a), Value::Float(b)) => Value::Float(a / b),
            _ => panic!("divide: mismatched operand types {self:?} / {other:?}"),
        }
    }

    pub fn less_than(&self, other: &Value) -> Value {
        Value::Bool(self.compare(other) == std::cmp::Ordering::Less)
    }

    pub fn less_equal(&self, other: &Value) -> Value {
        Value::Bool(self.compare(other) != std::cmp::Ordering::Greater)
    }

    pub fn greater_than(&self, other: &Value) -> Value {
        Value::Bool(self.compare(other) == std::cmp::Ordering::Greater)
    }

    pub fn greater_equal(&self, other: &Value) -> Value {
        Value::Bool(self.compare(other) != std::cmp::Ordering::Less)
    }

    fn compare(&self, other: &Value) -> std::cmp::Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => {
                a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
            }
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => panic!("compare: mismatched operand types {self:?} / {other:?}"),
        }
    }

    pub fn equals(&self, other: &Value) -> Value {
        Value::Bool(self == other)
    }

    pub fn not_equals(&self, other: &Value) -> Value {
        Value::Bool(self != other)
    }

    pub fn logical_and(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Value::Bool(*a && *b),
            _ => panic!("and: mismatched operand types {self:?} / {other:?}"),
        }
    }

    pub fn logical_or(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Value::Bool(*a || *b),
            _ => panic!("or: mismatched operand types {self:?} / {other:?}"),
        }
    }

    pub fn logical_not(&self) -> Value {
        match self {
            Value::Bool(a) => Value::Bool(!a),
            _ => panic!("not: non-boolean operand {self:?}"),
        }
    }

    pub fn negate(&self) -> Value {
        match self {
            Value::Int(a) => Value::Int(-a),
            Value::Float(a) => Value::Float(-a),
            _ => panic!("negate: non-numeric operand {self:?}"),
        }
    }
}
