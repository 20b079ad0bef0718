//! Read-only view of a calculator session for front ends.

use super::{Calculator, PendingOperation};
use crate::calculator::{DisplayConfig, format_value};
use serde::Serialize;

/// A copy of the session state at one point in time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    /// Last successfully computed value.
    pub result: f64,
    /// The expression being entered, empty after `=`.
    pub expression: String,
    pub memory: f64,
    pub pending: PendingOperation,
}

impl Snapshot {
    pub fn from_calculator(calc: &Calculator) -> Self {
        Self {
            result: calc.current_result(),
            expression: calc.expression().to_string(),
            memory: calc.memory(),
            pending: calc.pending(),
        }
    }

    /// Text shown on the display: the expression while one is being
    /// entered, the result otherwise.
    pub fn display_text(&self, config: &DisplayConfig) -> String {
        let expression = self.expression.trim();
        if expression.is_empty() {
            format_value(self.result, config)
        } else {
            expression.to_string()
        }
    }

    /// One-line status: display text plus the memory register when set.
    pub fn status_line(&self, config: &DisplayConfig) -> String {
        let display = self.display_text(config);
        if self.memory == 0.0 {
            display
        } else {
            format!("{}  [M {}]", display, format_value(self.memory, config))
        }
    }
}
