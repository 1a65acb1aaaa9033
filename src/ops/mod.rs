//! Math operations library.
//!
//! Pure numeric functions with input validation. Every function accepts
//! anything convertible into an [`Operand`] and rejects non-numeric operands
//! with [`CalcError::InvalidOperand`] instead of coercing them.

mod operation;
#[cfg(test)]
mod proptests;

pub use operation::{Arity, Operation};

use crate::error::{CalcError, Result};

/// `tan(x)` is treated as undefined when `|cos(x)|` is at most this value.
///
/// The check is approximate: inputs just outside the tolerance around
/// `pi/2 + k*pi` produce a very large finite result.
pub const TANGENT_TOLERANCE: f64 = 1e-9;

/// A value handed to an operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Int(i64),
    Float(f64),
    /// Anything that is not a number. Always rejected.
    Text(String),
}

impl Operand {
    /// Parse user text into an operand.
    ///
    /// Integers and decimal/scientific numbers become numeric operands.
    /// Everything else, including spellings like `inf` or `nan`, stays text.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if let Ok(int) = trimmed.parse::<i64>() {
            return Self::Int(int);
        }
        let has_letters = trimmed.chars().any(|c| c.is_alphabetic() && !"eE".contains(c));
        match trimmed.parse::<f64>() {
            Ok(float) if !has_letters => Self::Float(float),
            _ => Self::Text(trimmed.to_string()),
        }
    }

    /// The numeric value, or `InvalidOperand` for text.
    pub fn value(&self) -> Result<f64> {
        match self {
            Self::Int(int) => Ok(*int as f64),
            Self::Float(float) => Ok(*float),
            Self::Text(text) => Err(CalcError::invalid_operand(text.clone())),
        }
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

/// String slices are never coerced; they always become [`Operand::Text`].
impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

fn numeric(x: impl Into<Operand>) -> Result<f64> {
    x.into().value()
}

fn numeric_pair(x: impl Into<Operand>, y: impl Into<Operand>) -> Result<(f64, f64)> {
    Ok((numeric(x)?, numeric(y)?))
}

pub fn add(x: impl Into<Operand>, y: impl Into<Operand>) -> Result<f64> {
    let (x, y) = numeric_pair(x, y)?;
    Ok(x + y)
}

pub fn subtract(x: impl Into<Operand>, y: impl Into<Operand>) -> Result<f64> {
    let (x, y) = numeric_pair(x, y)?;
    Ok(x - y)
}

pub fn multiply(x: impl Into<Operand>, y: impl Into<Operand>) -> Result<f64> {
    let (x, y) = numeric_pair(x, y)?;
    Ok(x * y)
}

/// Fails with `DivisionByZero` when the divisor is exactly zero.
pub fn divide(x: impl Into<Operand>, y: impl Into<Operand>) -> Result<f64> {
    let (x, y) = numeric_pair(x, y)?;
    if !Operation::Divide.is_defined_for(&[x, y]) {
        return Err(CalcError::DivisionByZero);
    }
    Ok(x / y)
}

/// Real exponentiation. Negative bases with fractional exponents yield NaN.
pub fn power(x: impl Into<Operand>, y: impl Into<Operand>) -> Result<f64> {
    let (x, y) = numeric_pair(x, y)?;
    Ok(x.powf(y))
}

pub fn square_root(x: impl Into<Operand>) -> Result<f64> {
    let x = numeric(x)?;
    if !Operation::SquareRoot.is_defined_for(&[x]) {
        return Err(CalcError::domain(
            "cannot calculate square root of a negative number",
        ));
    }
    Ok(x.sqrt())
}

pub fn log_natural(x: impl Into<Operand>) -> Result<f64> {
    let x = numeric(x)?;
    ensure_log_domain(Operation::LogNatural, x)?;
    Ok(x.ln())
}

pub fn log_base10(x: impl Into<Operand>) -> Result<f64> {
    let x = numeric(x)?;
    ensure_log_domain(Operation::LogBase10, x)?;
    Ok(x.log10())
}

fn ensure_log_domain(op: Operation, x: f64) -> Result<()> {
    if !op.is_defined_for(&[x]) {
        return Err(CalcError::domain(
            "cannot calculate logarithm of a non-positive number",
        ));
    }
    Ok(())
}

/// Sine of `x` in radians.
pub fn sine(x: impl Into<Operand>) -> Result<f64> {
    Ok(numeric(x)?.sin())
}

/// Cosine of `x` in radians.
pub fn cosine(x: impl Into<Operand>) -> Result<f64> {
    Ok(numeric(x)?.cos())
}

/// Tangent of `x` in radians, undefined where `cos(x)` is within
/// [`TANGENT_TOLERANCE`] of zero.
pub fn tangent(x: impl Into<Operand>) -> Result<f64> {
    tangent_with_tolerance(x, TANGENT_TOLERANCE)
}

/// Tangent with an explicit singularity tolerance.
pub fn tangent_with_tolerance(x: impl Into<Operand>, tolerance: f64) -> Result<f64> {
    let x = numeric(x)?;
    if !Operation::Tangent.is_defined_with_tolerance(&[x], tolerance) {
        return Err(CalcError::domain(
            "tangent is undefined where cosine is zero (pi/2 + k*pi)",
        ));
    }
    Ok(x.tan())
}
