//! The input-state machine behind the keypad.

use tracing::{debug, warn};

use super::buffer::ExpressionBuffer;
use super::key::{Key, MemoryKey, OperatorKey};
use crate::calculator::{CalcResult, DEFAULT_PRECISION, Environment, evaluate_expression};
use crate::config::Config;
use crate::error::{CalcError, Result};
use crate::ops;

/// Display text when the buffer is empty.
const ZERO: &str = "0";

/// One calculator session: expression buffer, memory register and display.
///
/// Idle, evaluated and errored states all collapse into `just_evaluated`:
/// when it is set, the next digit, function or constant starts a new
/// expression instead of extending the current one.
#[derive(Clone, Debug)]
pub struct Engine {
    buffer: ExpressionBuffer,
    memory: f64,
    just_evaluated: bool,
    display: String,
    showing_error: bool,
    /// Unrounded value of the last result while the buffer still shows it.
    last_value: Option<f64>,
    env: Environment,
    precision: usize,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_environment(Environment::new(), DEFAULT_PRECISION)
    }

    pub fn with_config(config: &Config) -> Self {
        Self::with_environment(Environment::from_config(config), config.precision)
    }

    pub fn with_environment(env: Environment, precision: usize) -> Self {
        Self {
            buffer: ExpressionBuffer::default(),
            memory: 0.0,
            just_evaluated: false,
            display: ZERO.to_string(),
            showing_error: false,
            last_value: None,
            env,
            precision,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn buffer(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    pub fn just_evaluated(&self) -> bool {
        self.just_evaluated
    }

    /// Whether the display currently shows an error message.
    pub fn is_error(&self) -> bool {
        self.showing_error
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Parse a keypad label and apply it.
    ///
    /// Unknown labels are returned as errors and leave the state untouched.
    pub fn press(&mut self, label: &str) -> Result<&str> {
        let key = Key::parse(label, &self.env)?;
        Ok(self.apply(key))
    }

    /// Apply one key and return the new display text.
    pub fn apply(&mut self, key: Key) -> &str {
        if !matches!(key, Key::Evaluate | Key::Memory(_)) {
            self.last_value = None;
        }
        match &key {
            Key::Digit(digit) => self.digit(*digit),
            Key::DecimalPoint => self.decimal_point(),
            Key::Operator(op) => self.operator(*op),
            Key::Function(name) => {
                // a typed `0` is kept as an operand
                let fresh = self.just_evaluated || self.buffer.is_empty();
                self.insert_term(&format!("{name}("), fresh);
            }
            Key::Constant(name) => self.insert_term(name, self.starts_fresh()),
            Key::OpenParen => self.paren('('),
            Key::CloseParen => self.paren(')'),
            Key::ClearAll => {
                self.buffer.clear();
                self.just_evaluated = false;
                self.refresh_display();
            }
            Key::ClearLast => {
                self.buffer.pop();
                self.just_evaluated = false;
                self.refresh_display();
            }
            Key::Evaluate => self.evaluate(),
            Key::Memory(op) => self.memory_key(*op),
        }
        debug!(%key, buffer = %self.buffer, display = %self.display, "key applied");
        &self.display
    }

    fn refresh_display(&mut self) {
        self.showing_error = false;
        self.display.clear();
        if self.buffer.is_empty() {
            self.display.push_str(ZERO);
        } else {
            self.display.push_str(self.buffer.as_str());
        }
    }

    fn starts_fresh(&self) -> bool {
        self.just_evaluated || self.buffer.is_sentinel()
    }

    fn digit(&mut self, digit: char) {
        if self.starts_fresh() {
            self.buffer.clear();
        }
        self.buffer.push(digit);
        self.just_evaluated = false;
        self.refresh_display();
    }

    fn decimal_point(&mut self) {
        if self.just_evaluated {
            self.buffer.set(".");
        } else if !self.buffer.trailing_segment_has_point() {
            self.buffer.push('.');
        }
        self.just_evaluated = false;
        self.refresh_display();
    }

    fn operator(&mut self, op: OperatorKey) {
        let negative_start = op == OperatorKey::Subtract
            && (self.buffer.is_empty() || self.buffer.ends_with_open_paren());
        if negative_start {
            self.buffer.push('-');
        } else if !self.buffer.is_empty() && !self.buffer.ends_with_operator_or_open() {
            self.buffer.push(' ');
            self.buffer.push_str(op.buffer_symbol());
            self.buffer.push(' ');
        }
        self.just_evaluated = false;
        self.refresh_display();
    }

    /// Insert a function call opener, constant or recalled value.
    ///
    /// Unless `fresh`, a `*` is inserted when the term follows a completed
    /// operand.
    fn insert_term(&mut self, text: &str, fresh: bool) {
        if fresh {
            self.buffer.set(text);
        } else {
            if !self.buffer.ends_with_operator_or_open() {
                self.buffer.push_str(" * ");
            }
            self.buffer.push_str(text);
        }
        self.just_evaluated = false;
        self.refresh_display();
    }

    fn paren(&mut self, paren: char) {
        if self.just_evaluated {
            self.buffer.clear();
        }
        self.buffer.push(paren);
        self.just_evaluated = false;
        self.refresh_display();
    }

    fn evaluate(&mut self) {
        if self.buffer.is_empty() || (self.just_evaluated && self.last_value.is_some()) {
            self.refresh_display();
            return;
        }
        match evaluate_expression(self.buffer.as_str(), &self.env, self.precision) {
            CalcResult::Success { value, display, .. } => {
                self.buffer.set(&display);
                self.last_value = Some(value);
                self.just_evaluated = true;
                self.refresh_display();
            }
            CalcResult::Error { error, .. } => self.fail(error),
        }
    }

    fn fail(&mut self, error: CalcError) {
        warn!(expression = %self.buffer, %error, "calculation failed");
        self.buffer.clear();
        self.last_value = None;
        self.just_evaluated = true;
        self.showing_error = true;
        self.display.clear();
        self.display.push_str(error.short_message());
    }

    fn memory_key(&mut self, op: MemoryKey) {
        match op {
            MemoryKey::Clear => self.memory = 0.0,
            MemoryKey::Recall => {
                // shortest text that parses back to the stored value
                let recalled = self.memory.to_string();
                self.last_value = None;
                self.insert_term(&recalled, self.starts_fresh());
            }
            MemoryKey::Store | MemoryKey::Add | MemoryKey::Subtract => {
                let updated = self.memory_operand().and_then(|value| match op {
                    MemoryKey::Add => ops::add(self.memory, value),
                    MemoryKey::Subtract => ops::subtract(self.memory, value),
                    _ => Ok(value),
                });
                match updated {
                    Ok(memory) => {
                        debug!(memory, "memory updated");
                        self.memory = memory;
                        self.just_evaluated = true;
                        self.refresh_display();
                    }
                    Err(error) => self.fail(error),
                }
            }
        }
    }

    /// Value of the buffer, or of the display when the buffer is empty.
    fn memory_operand(&self) -> Result<f64> {
        if let Some(value) = self.last_value.filter(|_| self.just_evaluated) {
            return Ok(value);
        }
        let source = if !self.buffer.is_empty() {
            self.buffer.as_str()
        } else if self.showing_error {
            return Err(CalcError::EmptyInput);
        } else {
            self.display.as_str()
        };
        evaluate_expression(source, &self.env, self.precision).into_result()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
