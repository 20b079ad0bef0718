//! Calculator session state driven by key presses.
//!
//! The session owns the expression buffer, the last result, the pending
//! operation and the memory register. Every action either completes or
//! leaves the state exactly as it was.

mod key;
mod snapshot;

pub use key::{Key, KeyError, parse_keys};
pub use snapshot::Snapshot;

use crate::calculator::{
    EvalError, Malformed, Operator, compile, evaluate_expression, evaluate_postfix,
    trim_trailing_operator,
};

/// Whether an operator is waiting for its right-hand operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PendingOperation {
    #[default]
    Idle,
    AwaitingOperand { previous: f64, operator: Operator },
}

/// A calculator session.
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    result: f64,
    expression: String,
    pending: PendingOperation,
    memory: f64,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last successfully computed value.
    pub fn current_result(&self) -> f64 {
        self.result
    }

    /// Text of the expression being entered.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    pub fn pending(&self) -> PendingOperation {
        self.pending
    }

    /// Apply a single key press.
    pub fn press(&mut self, key: Key) -> Result<(), EvalError> {
        match key {
            Key::Digit(d) => self.press_digit(d),
            Key::DecimalPoint => self.press_decimal_point(),
            Key::LeftParen => self.press_left_paren(),
            Key::RightParen => self.press_right_paren(),
            Key::Operator(op) => self.press_operator(op)?,
            Key::Equals => {
                self.evaluate()?;
            }
            Key::ClearEntry => self.clear_entry(),
            Key::ClearAll => self.clear_all(),
            Key::SquareRoot => {
                self.square_root()?;
            }
            Key::MemoryStore => self.memory_store()?,
            Key::MemoryClear => self.memory_clear(),
            Key::MemoryRecall => self.memory_recall(),
        }
        Ok(())
    }

    /// Append a digit. Anything other than `0`-`9` is ignored.
    pub fn press_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            tracing::debug!(?digit, "ignoring non-digit key");
            return;
        }
        self.expression.push(digit);
    }

    pub fn press_decimal_point(&mut self) {
        self.expression.push('.');
    }

    pub fn press_left_paren(&mut self) {
        self.expression.push('(');
    }

    pub fn press_right_paren(&mut self) {
        self.expression.push(')');
    }

    /// Record `op` as the pending operation and append it to the buffer.
    ///
    /// A non-empty buffer is evaluated first and its value becomes both the
    /// current result and the previous operand. With an empty buffer the
    /// current result is carried into the expression instead. An operator
    /// already ending the buffer is replaced. A buffer with no operand in
    /// it, such as a lone `(`, rejects the operator.
    pub fn press_operator(&mut self, op: Operator) -> Result<(), EvalError> {
        let base = trim_trailing_operator(&self.expression);

        let (previous, base) = if base.trim().is_empty() {
            (self.result, self.result.to_string())
        } else {
            let value = operand_value(base).inspect_err(|e| {
                tracing::debug!(error = %e, "operator rejected");
            })?;
            (value, base.to_string())
        };

        self.result = previous;
        self.expression = format!("{} {} ", base, op.symbol());
        self.pending = PendingOperation::AwaitingOperand {
            previous,
            operator: op,
        };
        tracing::debug!(%op, previous, "awaiting operand");
        Ok(())
    }

    /// Evaluate the whole buffer (the `=` key).
    ///
    /// An empty buffer leaves everything untouched and returns the current
    /// result.
    pub fn evaluate(&mut self) -> Result<f64, EvalError> {
        if self.expression.trim().is_empty() {
            return Ok(self.result);
        }

        let value = evaluate_expression(&self.expression).inspect_err(|e| {
            tracing::debug!(error = %e, expression = %self.expression, "evaluation failed");
        })?;

        self.result = value;
        self.expression.clear();
        self.pending = PendingOperation::Idle;
        Ok(value)
    }

    /// Clear the expression buffer only.
    pub fn clear_entry(&mut self) {
        self.expression.clear();
    }

    /// Reset the current result to zero.
    ///
    /// The buffer, the pending operation and memory are left alone.
    pub fn clear_all(&mut self) {
        self.result = 0.0;
    }

    /// Square root of the buffer's value, or of the current result when the
    /// buffer is empty.
    pub fn square_root(&mut self) -> Result<f64, EvalError> {
        let from_buffer = !self.expression.trim().is_empty();
        let operand = if from_buffer {
            evaluate_expression(&self.expression)?
        } else {
            self.result
        };

        if operand < 0.0 {
            return Err(EvalError::NegativeSqrt);
        }

        let root = operand.sqrt();
        self.result = root;
        if from_buffer {
            self.expression.clear();
            self.pending = PendingOperation::Idle;
        }
        Ok(root)
    }

    /// Store the buffer's value, or the current result, in memory.
    pub fn memory_store(&mut self) -> Result<(), EvalError> {
        let value = if self.expression.trim().is_empty() {
            self.result
        } else {
            evaluate_expression(&self.expression)?
        };
        self.memory = value;
        tracing::debug!(memory = value, "stored memory");
        Ok(())
    }

    pub fn memory_clear(&mut self) {
        self.memory = 0.0;
    }

    /// Append the memory value to the buffer as text.
    pub fn memory_recall(&mut self) {
        self.expression.push_str(&self.memory.to_string());
    }

    /// Read-only copy of the session state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_calculator(self)
    }
}

/// Value of a non-empty buffer that must supply an operand.
fn operand_value(buffer: &str) -> Result<f64, EvalError> {
    let postfix = compile(buffer)?;
    if postfix.is_empty() {
        return Err(Malformed::MissingOperand.into());
    }
    evaluate_postfix(&postfix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_all(calc: &mut Calculator, script: &str) -> Result<(), EvalError> {
        for key in parse_keys(script).unwrap() {
            calc.press(key)?;
        }
        Ok(())
    }

    #[test]
    fn test_precedence_scenario() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "7 + 3 x 2").unwrap();
        assert_eq!(calc.expression(), "7 + 3 × 2");
        assert_eq!(calc.evaluate(), Ok(13.0));
        assert_eq!(calc.current_result(), 13.0);
        assert_eq!(calc.expression(), "");
        assert_eq!(calc.pending(), PendingOperation::Idle);
    }

    #[test]
    fn test_operator_evaluates_buffer() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "7 + 3").unwrap();
        assert_eq!(calc.current_result(), 7.0);
        calc.press_operator(Operator::Multiply).unwrap();
        assert_eq!(calc.current_result(), 10.0);
        assert_eq!(
            calc.pending(),
            PendingOperation::AwaitingOperand {
                previous: 10.0,
                operator: Operator::Multiply,
            }
        );
    }

    #[test]
    fn test_operator_replaces_trailing_operator() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "7 + -").unwrap();
        assert_eq!(calc.expression(), "7 - ");
        press_all(&mut calc, "2 =").unwrap();
        assert_eq!(calc.current_result(), 5.0);
    }

    #[test]
    fn test_operator_on_empty_buffer_continues_from_result() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "6 x 7 =").unwrap();
        calc.press_operator(Operator::Subtract).unwrap();
        assert_eq!(calc.expression(), "42 - ");
        assert_eq!(
            calc.pending(),
            PendingOperation::AwaitingOperand {
                previous: 42.0,
                operator: Operator::Subtract,
            }
        );
        press_all(&mut calc, "2 =").unwrap();
        assert_eq!(calc.current_result(), 40.0);
    }

    #[test]
    fn test_failed_operator_leaves_state() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "9 ÷ 0").unwrap();
        let before = calc.snapshot();
        assert_eq!(
            calc.press_operator(Operator::Add),
            Err(EvalError::DivisionByZero)
        );
        assert_eq!(calc.snapshot(), before);
        assert_eq!(calc.expression(), "9 ÷ 0");
    }

    #[test]
    fn test_division_by_zero_keeps_result() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "9 ÷ 0").unwrap();
        assert_eq!(calc.evaluate(), Err(EvalError::DivisionByZero));
        assert_eq!(calc.current_result(), 9.0);
        assert_eq!(calc.expression(), "9 ÷ 0");
    }

    #[test]
    fn test_evaluate_empty_is_noop() {
        let mut calc = Calculator::new();
        let before = calc.snapshot();
        assert_eq!(calc.evaluate(), Ok(0.0));
        assert_eq!(calc.snapshot(), before);
    }

    #[test]
    fn test_clear_entry_idempotent() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "12").unwrap();
        calc.clear_entry();
        assert_eq!(calc.expression(), "");
        calc.clear_entry();
        assert_eq!(calc.expression(), "");
    }

    #[test]
    fn test_clear_all_only_resets_result() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "5 MS CE 3 + 4").unwrap();
        calc.clear_all();
        assert_eq!(calc.current_result(), 0.0);
        assert_eq!(calc.expression(), "3 + 4");
        assert_eq!(calc.memory(), 5.0);
        assert!(matches!(
            calc.pending(),
            PendingOperation::AwaitingOperand { .. }
        ));
    }

    #[test]
    fn test_memory_recall_appends_text() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "4 MS CE 5 MR").unwrap();
        assert_eq!(calc.expression(), "54");
        assert_eq!(calc.memory(), 4.0);
    }

    #[test]
    fn test_memory_store_from_result() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "2.5 x 2 = MS").unwrap();
        assert_eq!(calc.memory(), 5.0);
        calc.memory_clear();
        assert_eq!(calc.memory(), 0.0);
    }

    #[test]
    fn test_memory_store_malformed_buffer() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "3 MS CE 1..2").unwrap();
        assert!(calc.memory_store().is_err());
        assert_eq!(calc.memory(), 3.0);
    }

    #[test]
    fn test_square_root() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "16").unwrap();
        assert_eq!(calc.square_root(), Ok(4.0));
        assert_eq!(calc.current_result(), 4.0);
        assert_eq!(calc.expression(), "");

        // Empty buffer works on the result and keeps the buffer empty.
        assert_eq!(calc.square_root(), Ok(2.0));
    }

    #[test]
    fn test_square_root_of_negative() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "0 - 1 = MS CE MR").unwrap();
        assert_eq!(calc.expression(), "-1");
        assert_eq!(calc.square_root(), Err(EvalError::NegativeSqrt));
        assert_eq!(calc.expression(), "-1");
        assert_eq!(calc.current_result(), -1.0);
    }

    #[test]
    fn test_parenthesised_scenario() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "( 2 + 3 ) x 4").unwrap();
        assert_eq!(calc.expression(), "(2 + 3) × 4");
        assert_eq!(calc.evaluate(), Ok(20.0));
    }

    #[test]
    fn test_non_digit_ignored() {
        let mut calc = Calculator::new();
        calc.press_digit('a');
        assert_eq!(calc.expression(), "");
    }

    #[test]
    fn test_overflow_leaves_state() {
        let mut calc = Calculator::new();
        let big = "9".repeat(200);
        for d in big.chars() {
            calc.press_digit(d);
        }
        calc.press_operator(Operator::Multiply).unwrap();
        for d in big.chars() {
            calc.press_digit(d);
        }
        let before = calc.snapshot();
        assert_eq!(calc.evaluate(), Err(EvalError::Overflow));
        assert_eq!(calc.press_operator(Operator::Add), Err(EvalError::Overflow));
        assert_eq!(calc.memory_store(), Err(EvalError::Overflow));
        assert_eq!(calc.snapshot(), before);

        // The finite result is still usable afterwards.
        calc.clear_entry();
        calc.press_operator(Operator::Add).unwrap();
        calc.press_digit('1');
        let expected = before.result + 1.0;
        assert_eq!(calc.evaluate(), Ok(expected));
        assert!(calc.current_result().is_finite());
    }

    #[test]
    fn test_square_root_of_negative_result() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "0 - 4 = - CE").unwrap();
        assert_eq!(calc.current_result(), -4.0);
        assert_eq!(calc.expression(), "");
        let before = calc.snapshot();
        assert_eq!(calc.square_root(), Err(EvalError::NegativeSqrt));
        assert_eq!(calc.snapshot(), before);
        assert_eq!(
            calc.pending(),
            PendingOperation::AwaitingOperand {
                previous: -4.0,
                operator: Operator::Subtract,
            }
        );
    }

    #[test]
    fn test_square_root_of_malformed_buffer() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "9 = 1..2").unwrap();
        let before = calc.snapshot();
        assert_eq!(
            calc.square_root(),
            Err(EvalError::MalformedExpression(Malformed::InvalidNumber(
                "1..2".to_string()
            )))
        );
        assert_eq!(calc.snapshot(), before);
        assert_eq!(calc.current_result(), 9.0);
    }

    #[test]
    fn test_operator_after_lone_paren_rejected() {
        let mut calc = Calculator::new();
        calc.press_left_paren();
        assert_eq!(
            calc.press_operator(Operator::Add),
            Err(EvalError::MalformedExpression(Malformed::MissingOperand))
        );
        assert_eq!(calc.expression(), "(");
        assert_eq!(calc.pending(), PendingOperation::Idle);

        press_all(&mut calc, "2 + 3 ) =").unwrap();
        assert_eq!(calc.current_result(), 5.0);
    }
}
