//! Keypad input engine.
//!
//! Turns a stream of key presses into an expression buffer, evaluates it on
//! `=` and keeps a single memory register.

mod buffer;
mod engine;
mod key;

pub use buffer::ExpressionBuffer;
pub use engine::Engine;
pub use key::{Key, MemoryKey, OperatorKey};
