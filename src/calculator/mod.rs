//! Expression engine for the keypad calculator.
//!
//! This module provides functionality to:
//! - Tokenize expression text
//! - Convert infix tokens to postfix with the shunting-yard algorithm
//! - Evaluate postfix tokens to a number
//! - Format results for display

mod error;
mod evaluation;
mod format;
mod postfix;
mod token;
mod tokenizer;

pub use error::{EvalError, Malformed};
pub use evaluation::{compile, evaluate_expression, evaluate_postfix};
pub use format::{DisplayConfig, format_plain, format_value};
pub use postfix::to_postfix;
pub use token::{Operator, Token, render_tokens};
pub use tokenizer::{tokenize, trim_trailing_operator};
