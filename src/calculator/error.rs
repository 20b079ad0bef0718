//! Error types reported by the expression engine.

use thiserror::Error;

/// A failed evaluation.
///
/// Every variant is recoverable: callers surface it to the user and keep
/// the calculator state as it was before the failing action.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    #[error("Cannot divide by zero")]
    DivisionByZero,
    #[error("Cannot take the square root of a negative number")]
    NegativeSqrt,
    #[error("Result is out of range")]
    Overflow,
    #[error("Malformed expression: {0}")]
    MalformedExpression(#[from] Malformed),
}

/// Why an expression could not be reduced to a single value.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Malformed {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("unmatched closing parenthesis")]
    UnmatchedParen,
    #[error("operator is missing an operand")]
    MissingOperand,
    #[error("operands without an operator between them")]
    MissingOperator,
}
