//! The in-progress expression text.

use std::fmt;

/// Characters that end a numeric segment.
const SEGMENT_BREAKS: &[char] = &[' ', '+', '-', '*', '/', '(', ')'];

/// Expression text exactly as shown to the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpressionBuffer(String);

impl ExpressionBuffer {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Empty, or the lone `0` shown at start-up.
    pub fn is_sentinel(&self) -> bool {
        self.0.is_empty() || self.0 == "0"
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn set(&mut self, text: &str) {
        self.0.clear();
        self.0.push_str(text);
    }

    pub fn push(&mut self, c: char) {
        self.0.push(c);
    }

    pub fn push_str(&mut self, text: &str) {
        self.0.push_str(text);
    }

    pub fn pop(&mut self) -> Option<char> {
        self.0.pop()
    }

    /// True when the text ends in a binary operator or `(`, ignoring spaces.
    pub fn ends_with_operator_or_open(&self) -> bool {
        let trimmed = self.0.trim_end();
        trimmed.ends_with(['+', '-', '*', '/', '(']) || trimmed.ends_with("pow")
    }

    pub fn ends_with_open_paren(&self) -> bool {
        self.0.ends_with('(')
    }

    /// Characters since the last space, operator or parenthesis.
    pub fn trailing_segment(&self) -> &str {
        match self.0.rfind(SEGMENT_BREAKS) {
            Some(i) => &self.0[i + 1..],
            None => &self.0,
        }
    }

    pub fn trailing_segment_has_point(&self) -> bool {
        self.trailing_segment().contains('.')
    }
}

impl fmt::Display for ExpressionBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
