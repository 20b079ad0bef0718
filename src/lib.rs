//! A keypad calculator: an infix expression engine plus the state machine
//! that turns key presses into expression edits and evaluations.

pub mod calculator;
pub mod config;
pub mod session;

pub use calculator::{EvalError, Operator};
pub use session::{Calculator, Key, PendingOperation};
