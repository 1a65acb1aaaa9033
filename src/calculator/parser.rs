//! Recursive-descent parser and tree evaluator.
//!
//! Precedence, loosest first: `+ -`, `* /`, unary `+ -`, `**` (right
//! associative), call. `-2 ** 2` is `-(2 ** 2)` and `2 ** -1` is allowed.
//!
//! Runs of `+ -` or `* /` are kept flat so long chains evaluate in a loop.
//! Everything that nests (parentheses, signs, exponents, call trailers) is
//! limited to [`MAX_NESTING`] levels.

use super::environment::{Binding, Environment};
use super::lexer::{Token, TokenKind, tokenize};
use crate::error::{CalcError, Result};
use crate::ops::{self, Operand, Operation};

/// Deepest nesting accepted before the expression is rejected as malformed.
pub const MAX_NESTING: usize = 200;

/// Left-associative binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn additive(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Add),
            TokenKind::Minus => Some(Self::Sub),
            _ => None,
        }
    }

    fn multiplicative(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Star => Some(Self::Mul),
            TokenKind::Slash => Some(Self::Div),
            _ => None,
        }
    }

    fn apply(self, x: f64, y: f64) -> Result<f64> {
        match self {
            Self::Add => ops::add(x, y),
            Self::Sub => ops::subtract(x, y),
            Self::Mul => ops::multiply(x, y),
            Self::Div => ops::divide(x, y),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Name(String),
    Negate(Box<Expr>),
    /// Unary plus; still requires a numeric operand.
    Plus(Box<Expr>),
    /// `first op1 x1 op2 x2 ...` at one precedence level.
    Chain {
        first: Box<Expr>,
        rest: Vec<(BinaryOp, Expr)>,
    },
    Power {
        base: Box<Expr>,
        exponent: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
}

/// Result of evaluating a sub-expression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Function(Operation),
}

impl Value {
    fn number(self) -> Result<f64> {
        match self {
            Value::Number(n) => Ok(n),
            Value::Function(op) => Err(CalcError::invalid_operand(format!("function {op}"))),
        }
    }
}

type OperandParser<'a> = fn(&mut Parser<'a>) -> Result<Expr>;

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn current(&self) -> Option<&'a TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.current() == Some(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn unexpected(&self) -> CalcError {
        match self.tokens.get(self.pos) {
            Some(token) => CalcError::syntax(format!(
                "unexpected {:?} at {}",
                token.kind, token.span.start
            )),
            None => CalcError::syntax("unexpected end of expression"),
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(CalcError::syntax(format!(
                "expression nested deeper than {MAX_NESTING} levels"
            )));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_chain(Self::parse_term, BinaryOp::additive)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        self.parse_chain(Self::parse_unary, BinaryOp::multiplicative)
    }

    fn parse_chain(
        &mut self,
        operand: OperandParser<'a>,
        operator: fn(&TokenKind) -> Option<BinaryOp>,
    ) -> Result<Expr> {
        let first = operand(self)?;
        let mut rest = Vec::new();
        while let Some(op) = self.current().and_then(operator) {
            self.advance();
            rest.push((op, operand(self)?));
        }
        if rest.is_empty() {
            return Ok(first);
        }
        Ok(Expr::Chain {
            first: Box::new(first),
            rest,
        })
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let negate = match self.current() {
            Some(TokenKind::Minus) => true,
            Some(TokenKind::Plus) => false,
            _ => return self.parse_power(),
        };
        self.advance();
        self.enter()?;
        let operand = Box::new(self.parse_unary()?);
        self.leave();
        if negate {
            Ok(Expr::Negate(operand))
        } else {
            Ok(Expr::Plus(operand))
        }
    }

    fn parse_power(&mut self) -> Result<Expr> {
        let base = self.parse_call()?;
        if !self.eat(&TokenKind::Power) {
            return Ok(base);
        }
        self.enter()?;
        let exponent = self.parse_unary()?;
        self.leave();
        Ok(Expr::Power {
            base: Box::new(base),
            exponent: Box::new(exponent),
        })
    }

    fn parse_call(&mut self) -> Result<Expr> {
        let mut expr = self.parse_primary()?;
        let outer = self.depth;
        // each trailer wraps the callee once more
        while self.eat(&TokenKind::OpenParen) {
            self.enter()?;
            let args = self.parse_args()?;
            expr = Expr::Call {
                callee: Box::new(expr),
                args,
            };
        }
        self.depth = outer;
        Ok(expr)
    }

    /// Arguments after an opening parenthesis, through the closing one.
    fn parse_args(&mut self) -> Result<Vec<Expr>> {
        let mut args = Vec::new();
        while !self.eat(&TokenKind::CloseParen) {
            args.push(self.parse_expr()?);
            if !self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::CloseParen)?;
                break;
            }
        }
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let expr = match self.current() {
            Some(TokenKind::Number(n)) => Expr::Number(*n),
            Some(TokenKind::Identifier(name)) => Expr::Name(name.clone()),
            Some(TokenKind::OpenParen) => {
                self.advance();
                self.enter()?;
                let inner = self.parse_expr()?;
                self.leave();
                self.expect(&TokenKind::CloseParen)?;
                return Ok(inner);
            }
            _ => return Err(self.unexpected()),
        };
        self.advance();
        Ok(expr)
    }
}

/// Parse a complete expression. Trailing tokens are a syntax error.
pub fn parse(source: &str) -> Result<Expr> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(&tokens);
    let expr = parser.parse_expr()?;
    if parser.current().is_some() {
        return Err(parser.unexpected());
    }
    Ok(expr)
}

impl Expr {
    /// Evaluate left to right against `env`.
    pub fn eval(&self, env: &Environment) -> Result<Value> {
        match self {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Name(name) => match env.lookup(name) {
                Some(Binding::Constant(value)) => Ok(Value::Number(value)),
                Some(Binding::Function(op)) => Ok(Value::Function(op)),
                None => Err(CalcError::Name(name.clone())),
            },
            Expr::Negate(inner) => Ok(Value::Number(-inner.eval(env)?.number()?)),
            Expr::Plus(inner) => Ok(Value::Number(inner.eval(env)?.number()?)),
            Expr::Chain { first, rest } => {
                let mut acc = first.eval(env)?.number()?;
                for (op, operand) in rest {
                    let rhs = operand.eval(env)?.number()?;
                    acc = op.apply(acc, rhs)?;
                }
                Ok(Value::Number(acc))
            }
            Expr::Power { base, exponent } => {
                let x = base.eval(env)?.number()?;
                let y = exponent.eval(env)?.number()?;
                if x == 0.0 && y < 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(Value::Number(ops::power(x, y)?))
            }
            Expr::Call { callee, args } => {
                let op = match callee.eval(env)? {
                    Value::Function(op) => op,
                    Value::Number(n) => {
                        return Err(CalcError::invalid_operand(format!("{n} is not callable")));
                    }
                };
                let operands = args
                    .iter()
                    .map(|arg| Ok(Operand::Float(arg.eval(env)?.number()?)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::Number(env.call(op, &operands)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(source: &str) -> Result<f64> {
        parse(source)?.eval(&Environment::new())?.number()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn nested(depth: usize) -> String {
        format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2 + 3 * 4"), Ok(14.0));
        assert_eq!(eval("(2 + 3) * 4"), Ok(20.0));
        assert_eq!(eval("10 - 4 - 3"), Ok(3.0));
        assert_eq!(eval("8 / 4 / 2"), Ok(1.0));
        assert_eq!(eval("1 - 2 * 3 + 4"), Ok(-1.0));
    }

    #[test]
    fn test_power_binds_tighter_than_unary_minus() {
        assert_eq!(eval("-2 ** 2"), Ok(-4.0));
        assert_eq!(eval("2 ** 3 ** 2"), Ok(512.0));
        assert_eq!(eval("2 ** -1"), Ok(0.5));
        assert_eq!(eval("--2"), Ok(2.0));
    }

    #[test]
    fn test_functions_and_constants() {
        assert_eq!(eval("sqrt(25)"), Ok(5.0));
        assert_close(eval("log(e)").unwrap(), 1.0);
        assert_close(eval("ln(e ** 2)").unwrap(), 2.0);
        assert_close(eval("log10(1000)").unwrap(), 3.0);
        assert_close(eval("2 * sin(pi / 2)").unwrap(), 2.0);
    }

    #[test]
    fn test_library_errors_propagate() {
        assert_eq!(eval("1 / 0"), Err(CalcError::DivisionByZero));
        assert_eq!(eval("0 ** -1"), Err(CalcError::DivisionByZero));
        assert!(matches!(eval("sqrt(-1)"), Err(CalcError::Domain(_))));
        assert!(matches!(eval("tan(pi / 2)"), Err(CalcError::Domain(_))));
    }

    #[test]
    fn test_name_errors() {
        assert_eq!(eval("foo + 1"), Err(CalcError::Name("foo".into())));
        assert_eq!(eval("exp(1)"), Err(CalcError::Name("exp".into())));
    }

    #[test]
    fn test_syntax_errors() {
        for source in ["", "2 +", "(1 + 2", "1 + 2)", "2 3", "2pi", "* 3", "sqrt(4"] {
            assert!(
                matches!(eval(source), Err(CalcError::Syntax(_))),
                "{source:?} should be a syntax error"
            );
        }
    }

    #[test]
    fn test_syntax_errors_win_over_name_errors() {
        assert!(matches!(eval("foo +"), Err(CalcError::Syntax(_))));
    }

    #[test]
    fn test_type_errors_are_invalid_operands() {
        let sources = [
            "2(3)",
            "pi(2)",
            "sqrt + 1",
            "sqrt",
            "sqrt(4, 9)",
            "sqrt()",
            "sqrt(sqrt)",
        ];
        for source in sources {
            assert!(
                matches!(eval(source), Err(CalcError::InvalidOperand { .. })),
                "{source:?} should be an invalid operand"
            );
        }
    }

    #[test]
    fn test_trailing_comma_in_call() {
        assert_eq!(eval("sqrt(16,)"), Ok(4.0));
    }

    #[test]
    fn test_nesting_within_limit() {
        assert_eq!(eval(&nested(MAX_NESTING)), Ok(1.0));
        let signs = format!("{}1", "-".repeat(MAX_NESTING));
        assert_eq!(eval(&signs), Ok(1.0));
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let too_deep = [
            nested(MAX_NESTING + 1),
            nested(100_000),
            format!("{}1", "-".repeat(100_000)),
            format!("{}2", "2 ** ".repeat(100_000)),
            format!("sqrt(1){}", "(1)".repeat(100_000)),
            format!("{}1{}", "sqrt(".repeat(100_000), ")".repeat(100_000)),
        ];
        for source in &too_deep {
            assert!(
                matches!(eval(source), Err(CalcError::Syntax(_))),
                "nesting of {} characters should be rejected",
                source.len()
            );
        }
    }

    #[test]
    fn test_long_chains_evaluate() {
        assert_eq!(eval(&vec!["1"; 100_000].join(" + ")), Ok(100_000.0));
        assert_eq!(eval(&vec!["1"; 100_000].join(" * ")), Ok(1.0));
        assert_eq!(eval(&vec!["1"; 100_000].join(" - ")), Ok(-99_998.0));
    }
}
