//! Calculator module for evaluating mathematical expressions.
//!
//! This module provides functionality to:
//! - Tokenize and parse flat infix expressions
//! - Evaluate them against a fixed environment of functions and constants
//! - Format results for display

mod environment;
mod evaluation;
mod format;
mod lexer;
mod parser;

pub use environment::{Binding, Environment};
pub use evaluation::{CalcResult, evaluate, evaluate_expression, rewrite_pow};
pub use format::{DEFAULT_PRECISION, MAX_PRECISION, format_number};
pub use parser::{BinaryOp, Expr, MAX_NESTING, Value, parse};
