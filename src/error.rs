//! Error taxonomy shared by the operations library, the expression
//! evaluator and the keypad engine.

use thiserror::Error;

/// Every failure the calculator can report.
///
/// Library failures travel unchanged through expression evaluation; the
/// keypad engine and the text loop turn them into short display messages.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CalcError {
    /// An operation received something that is not a number.
    #[error("operand `{operand}` is not numeric")]
    InvalidOperand { operand: String },

    #[error("cannot divide by zero")]
    DivisionByZero,

    /// Argument outside the domain of the operation.
    #[error("{0}")]
    Domain(String),

    /// Malformed expression or command text.
    #[error("invalid syntax: {0}")]
    Syntax(String),

    /// Identifier not bound in the environment.
    #[error("name `{0}` is not defined")]
    Name(String),

    #[error("nothing to evaluate")]
    EmptyInput,

    /// A keypad label that maps to no key.
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

impl CalcError {
    pub(crate) fn invalid_operand(operand: impl Into<String>) -> Self {
        Self::InvalidOperand {
            operand: operand.into(),
        }
    }

    pub(crate) fn domain(message: impl Into<String>) -> Self {
        Self::Domain(message.into())
    }

    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }

    /// Short message shown on the calculator display.
    pub fn short_message(&self) -> &'static str {
        match self {
            Self::DivisionByZero => "Error: Division by zero",
            Self::Syntax(_) | Self::Name(_) => "Error: Invalid syntax",
            Self::Domain(_) | Self::InvalidOperand { .. } => "Error: Math domain/type",
            Self::EmptyInput => "Error: Nothing to evaluate",
            Self::UnknownKey(_) => "Error: Unknown key",
        }
    }
}

pub type Result<T, E = CalcError> = std::result::Result<T, E>;
