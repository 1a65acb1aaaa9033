//! Named operations with a fixed arity and alias set.

use std::fmt;

use super::Operand;
use crate::error::{CalcError, Result};

/// Number of arguments an operation takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

impl Arity {
    pub fn count(self) -> usize {
        match self {
            Self::Unary => 1,
            Self::Binary => 2,
        }
    }
}

/// One of the operations exposed by the library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    SquareRoot,
    LogNatural,
    LogBase10,
    Sine,
    Cosine,
    Tangent,
}

impl Operation {
    pub const ALL: [Operation; 11] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
        Self::SquareRoot,
        Self::LogNatural,
        Self::LogBase10,
        Self::Sine,
        Self::Cosine,
        Self::Tangent,
    ];

    pub fn arity(self) -> Arity {
        match self {
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Power => {
                Arity::Binary
            }
            _ => Arity::Unary,
        }
    }

    /// Names under which a unary operation is callable. The first one is canonical.
    ///
    /// Binary operations have no function name; see [`Operation::symbols`].
    pub fn names(self) -> &'static [&'static str] {
        match self {
            Self::SquareRoot => &["sqrt"],
            Self::LogNatural => &["log", "ln"],
            Self::LogBase10 => &["log10"],
            Self::Sine => &["sin"],
            Self::Cosine => &["cos"],
            Self::Tangent => &["tan"],
            _ => &[],
        }
    }

    /// Operator spellings accepted by the text loop for binary operations.
    pub fn symbols(self) -> &'static [&'static str] {
        match self {
            Self::Add => &["+", "add"],
            Self::Subtract => &["-", "−", "subtract"],
            Self::Multiply => &["*", "×", "multiply"],
            Self::Divide => &["/", "÷", "divide"],
            Self::Power => &["^", "**", "pow", "power"],
            _ => &[],
        }
    }

    /// Resolve a unary function name such as `ln` or `sqrt`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.names().contains(&name))
    }

    /// Resolve a binary operator spelling such as `+` or `pow`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbols().contains(&symbol))
    }

    /// Whether the operation is defined for the given numeric arguments.
    ///
    /// Uses the default tangent tolerance.
    pub fn is_defined_for(self, args: &[f64]) -> bool {
        self.is_defined_with_tolerance(args, super::TANGENT_TOLERANCE)
    }

    /// Domain predicate shared by every operation in the library.
    pub(crate) fn is_defined_with_tolerance(self, args: &[f64], tolerance: f64) -> bool {
        match (self, args) {
            (Self::Divide, [_, y]) => *y != 0.0,
            (Self::SquareRoot, [x]) => *x >= 0.0,
            (Self::LogNatural | Self::LogBase10, [x]) => *x > 0.0,
            (Self::Tangent, [x]) => x.cos().abs() > tolerance,
            _ => args.len() == self.arity().count(),
        }
    }

    /// Apply the operation to its arguments.
    ///
    /// A wrong argument count is reported as `InvalidOperand`.
    pub fn apply(self, args: &[Operand]) -> Result<f64> {
        self.apply_with_tolerance(args, super::TANGENT_TOLERANCE)
    }

    pub(crate) fn apply_with_tolerance(self, args: &[Operand], tolerance: f64) -> Result<f64> {
        let expected = self.arity().count();
        if args.len() != expected {
            return Err(CalcError::invalid_operand(format!(
                "{self} takes {expected} argument(s) but {} were given",
                args.len()
            )));
        }
        let x = args[0].clone();
        match self {
            Self::Add => super::add(x, args[1].clone()),
            Self::Subtract => super::subtract(x, args[1].clone()),
            Self::Multiply => super::multiply(x, args[1].clone()),
            Self::Divide => super::divide(x, args[1].clone()),
            Self::Power => super::power(x, args[1].clone()),
            Self::SquareRoot => super::square_root(x),
            Self::LogNatural => super::log_natural(x),
            Self::LogBase10 => super::log_base10(x),
            Self::Sine => super::sine(x),
            Self::Cosine => super::cosine(x),
            Self::Tangent => super::tangent_with_tolerance(x, tolerance),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .names()
            .first()
            .or_else(|| self.symbols().last())
            .copied()
            .unwrap_or("?");
        f.write_str(name)
    }
}
