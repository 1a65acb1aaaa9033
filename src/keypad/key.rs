//! Keys the engine accepts and how keypad labels map to them.

use std::fmt;

use crate::calculator::Environment;
use crate::error::{CalcError, Result};

/// Binary operator keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorKey {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl OperatorKey {
    /// Text written into the expression buffer.
    pub fn buffer_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "pow",
        }
    }
}

/// Memory register keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryKey {
    /// MC
    Clear,
    /// MR
    Recall,
    /// MS
    Store,
    /// M+
    Add,
    /// M−
    Subtract,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    DecimalPoint,
    Operator(OperatorKey),
    /// A unary function name as it appears in the buffer, e.g. `sqrt`.
    Function(String),
    /// A constant name, e.g. `pi`.
    Constant(String),
    OpenParen,
    CloseParen,
    ClearAll,
    ClearLast,
    Evaluate,
    Memory(MemoryKey),
}

impl Key {
    /// Map a keypad label to a key.
    ///
    /// Function and constant names are checked against `env`.
    pub fn parse(label: &str, env: &Environment) -> Result<Self> {
        let label = label.trim();
        let key = match label {
            "." => Self::DecimalPoint,
            "+" => Self::Operator(OperatorKey::Add),
            "-" | "−" => Self::Operator(OperatorKey::Subtract),
            "*" | "×" => Self::Operator(OperatorKey::Multiply),
            "/" | "÷" => Self::Operator(OperatorKey::Divide),
            "pow" => Self::Operator(OperatorKey::Power),
            "π" => Self::Constant("pi".to_string()),
            "(" => Self::OpenParen,
            ")" => Self::CloseParen,
            "C" => Self::ClearAll,
            "CE" => Self::ClearLast,
            "=" => Self::Evaluate,
            "MC" => Self::Memory(MemoryKey::Clear),
            "MR" => Self::Memory(MemoryKey::Recall),
            "MS" => Self::Memory(MemoryKey::Store),
            "M+" => Self::Memory(MemoryKey::Add),
            "M-" | "M−" => Self::Memory(MemoryKey::Subtract),
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Self::Digit(c),
                    _ if env.is_function(label) => Self::Function(label.to_string()),
                    _ if env.is_constant(label) => Self::Constant(label.to_string()),
                    _ => return Err(CalcError::UnknownKey(label.to_string())),
                }
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(c) => write!(f, "{c}"),
            Self::DecimalPoint => f.write_str("."),
            Self::Operator(op) => f.write_str(op.buffer_symbol()),
            Self::Function(name) | Self::Constant(name) => f.write_str(name),
            Self::OpenParen => f.write_str("("),
            Self::CloseParen => f.write_str(")"),
            Self::ClearAll => f.write_str("C"),
            Self::ClearLast => f.write_str("CE"),
            Self::Evaluate => f.write_str("="),
            Self::Memory(MemoryKey::Clear) => f.write_str("MC"),
            Self::Memory(MemoryKey::Recall) => f.write_str("MR"),
            Self::Memory(MemoryKey::Store) => f.write_str("MS"),
            Self::Memory(MemoryKey::Add) => f.write_str("M+"),
            Self::Memory(MemoryKey::Subtract) => f.write_str("M-"),
        }
    }
}
