//! Tokenizer for calculator expressions.

use std::iter::Peekable;
use std::ops::Range;
use std::str::CharIndices;

use crate::error::{CalcError, Result};

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    /// `**`
    Power,
    OpenParen,
    CloseParen,
    Comma,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    start: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            start: 0,
            tokens: Vec::new(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Character after the next one, without consuming anything.
    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next().map(|(_, c)| c)
    }

    fn pos(&mut self) -> usize {
        match self.chars.peek() {
            Some(&(i, _)) => i,
            None => self.source.len(),
        }
    }

    fn token(&mut self, kind: TokenKind) {
        let end = self.pos();
        self.tokens.push(Token {
            kind,
            span: self.start..end,
        });
    }

    fn eat_digits(&mut self) -> usize {
        let mut count = 0;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.chars.next();
            count += 1;
        }
        count
    }

    fn number(&mut self) -> Result<()> {
        let int_digits = self.eat_digits();
        let mut plain_integer = true;

        if self.peek() == Some('.') {
            self.chars.next();
            plain_integer = false;
            if self.eat_digits() == 0 && int_digits == 0 {
                return Err(CalcError::syntax(format!(
                    "lone decimal point at {}",
                    self.start
                )));
            }
        }

        // exponent only when a digit follows `e`, optionally signed
        if matches!(self.peek(), Some('e' | 'E')) {
            let exponent_follows = match self.peek_second() {
                Some(c) if c.is_ascii_digit() => true,
                Some('+' | '-') => {
                    let mut ahead = self.chars.clone();
                    ahead.nth(2).is_some_and(|(_, c)| c.is_ascii_digit())
                }
                _ => false,
            };
            if exponent_follows {
                self.chars.next();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.chars.next();
                }
                self.eat_digits();
                plain_integer = false;
            }
        }

        let end = self.pos();
        let literal = &self.source[self.start..end];
        if plain_integer && literal.starts_with('0') && literal.bytes().any(|b| b != b'0') {
            return Err(CalcError::syntax(format!(
                "leading zeros in decimal literal `{literal}`"
            )));
        }
        let value: f64 = literal
            .parse()
            .map_err(|_| CalcError::syntax(format!("invalid number `{literal}`")))?;
        self.token(TokenKind::Number(value));
        Ok(())
    }

    fn identifier(&mut self) {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.chars.next();
        }
        let end = self.pos();
        let name = self.source[self.start..end].to_string();
        self.token(TokenKind::Identifier(name));
    }

    fn run(mut self) -> Result<Vec<Token>> {
        while let Some(current) = self.peek() {
            self.start = self.pos();
            if current.is_whitespace() {
                self.chars.next();
                continue;
            }
            if current.is_ascii_digit() || current == '.' {
                self.number()?;
                continue;
            }
            if current.is_alphabetic() || current == '_' {
                self.identifier();
                continue;
            }

            self.chars.next();
            let kind = match current {
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' if self.peek() == Some('*') => {
                    self.chars.next();
                    TokenKind::Power
                }
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '(' => TokenKind::OpenParen,
                ')' => TokenKind::CloseParen,
                ',' => TokenKind::Comma,
                other => {
                    return Err(CalcError::syntax(format!(
                        "unexpected character `{other}` at {}",
                        self.start
                    )));
                }
            };
            self.token(kind);
        }
        Ok(self.tokens)
    }
}

/// Split expression text into tokens.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).run()
}
