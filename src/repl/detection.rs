//! Command detection for the text loop.
//!
//! Determines which of the recognized line shapes a line of user input
//! has and extracts the operation and its operands.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{CalcError, Result};
use crate::ops::{Operand, Operation};

lazy_static! {
    /// `<function-name> <number>`
    static ref UNARY_LINE: Regex = Regex::new(
        r"^([A-Za-z][A-Za-z0-9]*)\s+(\S+)$"
    ).unwrap();

    /// `<number> <symbol> <operand>` with a numeric left operand, so an
    /// exponent sign such as `1e+5` stays part of the number.
    static ref NUMBER_SYMBOL_LINE: Regex = Regex::new(
        r"^([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)\s*(\*\*|[-+*/^×÷−])\s*(\S+)$"
    ).unwrap();

    /// `<operand> <symbol> <operand>`, spaces optional around the symbol.
    static ref SYMBOL_LINE: Regex = Regex::new(
        r"^(\S+?)\s*(\*\*|[-+*/^×÷−])\s*(\S+)$"
    ).unwrap();

    /// `<number> <word> <number>`, e.g. `2 pow 8`.
    static ref WORD_LINE: Regex = Regex::new(
        r"^(\S+)\s+([A-Za-z]+)\s+(\S+)$"
    ).unwrap();
}

/// A parsed line of the text loop.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Binary {
        op: Operation,
        lhs: Operand,
        rhs: Operand,
    },
    Unary {
        op: Operation,
        arg: Operand,
    },
    Quit,
}

/// Parse one input line into a command.
///
/// Operands are not validated here: text that is not a number is passed
/// through and rejected by the operation itself.
pub fn detect_command(line: &str) -> Result<Command> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Err(CalcError::EmptyInput);
    }

    if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
        return Ok(Command::Quit);
    }

    if let Some(caps) = UNARY_LINE.captures(trimmed) {
        let name = &caps[1];
        let op = Operation::from_name(name)
            .ok_or_else(|| CalcError::syntax(format!("unknown function `{name}`")))?;
        return Ok(Command::Unary {
            op,
            arg: Operand::parse(&caps[2]),
        });
    }

    let binary = NUMBER_SYMBOL_LINE
        .captures(trimmed)
        .or_else(|| SYMBOL_LINE.captures(trimmed))
        .or_else(|| WORD_LINE.captures(trimmed));
    if let Some(caps) = binary {
        let symbol = &caps[2];
        let op = Operation::from_symbol(symbol)
            .ok_or_else(|| CalcError::syntax(format!("unknown operator `{symbol}`")))?;
        return Ok(Command::Binary {
            op,
            lhs: Operand::parse(&caps[1]),
            rhs: Operand::parse(&caps[3]),
        });
    }

    Err(CalcError::syntax(format!(
        "expected `<number> <operator> <number>` or `<function> <number>`, got `{trimmed}`"
    )))
}
