//! A keypad-style calculator.
//!
//! - [`ops`]: validated numeric operations
//! - [`calculator`]: expression parsing, evaluation and formatting
//! - [`keypad`]: the key-driven input engine with a memory register
//! - [`repl`]: the line-oriented text loop

pub mod calculator;
pub mod config;
pub mod error;
pub mod keypad;
pub mod ops;
pub mod repl;

pub use calculator::{CalcResult, Environment, evaluate_expression};
pub use config::Config;
pub use error::CalcError;
pub use keypad::{Engine, Key};
pub use repl::TextLoop;
