//! Expression evaluation and result formatting.
//!
//! Wraps the parser to provide a simple interface for evaluating
//! calculator expressions and formatting results for the display.

use serde::Serialize;
use tracing::debug;

use super::environment::Environment;
use super::format::format_number;
use super::parser::{Value, parse};
use crate::error::{CalcError, Result};

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CalcResult {
    /// Successful calculation.
    Success {
        /// The original expression.
        expression: String,
        /// The numeric value.
        value: f64,
        /// Formatted for display.
        display: String,
    },
    /// Evaluation failed.
    Error {
        /// The original expression.
        expression: String,
        /// Detailed error message.
        message: String,
        #[serde(skip)]
        error: CalcError,
    },
}

impl CalcResult {
    fn failure(expression: String, error: CalcError) -> Self {
        Self::Error {
            expression,
            message: error.to_string(),
            error,
        }
    }

    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string (formatted result or short error message).
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display, .. } => display,
            Self::Error { error, .. } => error.short_message(),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Success { value, .. } => Some(*value),
            Self::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&CalcError> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error, .. } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<f64> {
        match self {
            Self::Success { value, .. } => Ok(value),
            Self::Error { error, .. } => Err(error),
        }
    }
}

/// Replace every `pow` with `**`.
///
/// Plain substring replacement: a name containing `pow` is rewritten too.
pub fn rewrite_pow(expression: &str) -> String {
    expression.replace("pow", "**")
}

/// Parse and evaluate `expression` to a number.
pub fn evaluate(expression: &str, env: &Environment) -> Result<f64> {
    let rewritten = rewrite_pow(expression);
    let value = parse(&rewritten)?.eval(env)?;
    match value {
        Value::Number(n) => Ok(n),
        Value::Function(op) => Err(CalcError::invalid_operand(format!("function {op}"))),
    }
}

/// Evaluate an expression and format the outcome.
///
/// Blank input is reported as `EmptyInput`.
pub fn evaluate_expression(input: &str, env: &Environment, precision: usize) -> CalcResult {
    let expression = input.trim().to_string();
    if expression.is_empty() {
        return CalcResult::failure(expression, CalcError::EmptyInput);
    }

    match evaluate(&expression, env) {
        Ok(value) => {
            let shown = format_number(value, precision);
            debug!(%expression, result = %shown, "evaluated expression");
            CalcResult::Success {
                expression,
                value,
                display: shown,
            }
        }
        Err(error) => {
            debug!(%expression, %error, "evaluation failed");
            CalcResult::failure(expression, error)
        }
    }
}
