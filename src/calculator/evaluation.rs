//! Postfix evaluation and the full text-to-value pipeline.

use super::error::{EvalError, Malformed};
use super::postfix::to_postfix;
use super::token::Token;
use super::tokenizer::tokenize;

/// Tokenize expression text and convert it to postfix order.
pub fn compile(input: &str) -> Result<Vec<Token>, EvalError> {
    let tokens = tokenize(input)?;
    to_postfix(&tokens)
}

/// Evaluate expression text to a number.
///
/// Empty input evaluates to `0`.
pub fn evaluate_expression(input: &str) -> Result<f64, EvalError> {
    let postfix = compile(input)?;
    let value = evaluate_postfix(&postfix)?;
    tracing::debug!(expression = input.trim(), value, "evaluated expression");
    Ok(value)
}

/// Reduce a postfix token sequence to a single value.
///
/// The most recently pushed operand is the right-hand side of each
/// operator. Division by zero and values outside the finite `f64` range
/// fail immediately.
pub fn evaluate_postfix(tokens: &[Token]) -> Result<f64, EvalError> {
    if tokens.is_empty() {
        return Ok(0.0);
    }

    let mut stack: Vec<f64> = Vec::with_capacity(tokens.len());

    for token in tokens {
        let value = match *token {
            Token::Number(value) => value,
            Token::Operator(op) => {
                let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
                    return Err(Malformed::MissingOperand.into());
                };
                op.apply(lhs, rhs)?
            }
            // The converter never emits parentheses.
            Token::LeftParen | Token::RightParen => {
                return Err(Malformed::UnmatchedParen.into());
            }
        };
        // Non-finite values have no literal form to carry back into a buffer.
        if !value.is_finite() {
            return Err(EvalError::Overflow);
        }
        stack.push(value);
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        [] => Err(Malformed::MissingOperand.into()),
        _ => Err(Malformed::MissingOperator.into()),
    }
}
