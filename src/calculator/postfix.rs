//! Infix to postfix conversion with the shunting-yard algorithm.

use super::error::{EvalError, Malformed};
use super::token::Token;

/// Reorder infix tokens into postfix (reverse Polish) order.
///
/// `×` and `÷` bind tighter than `+` and `-`, and equal precedence
/// associates to the left. A `)` without a matching `(` is an error; a `(`
/// still open at the end of input is dropped.
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>, EvalError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for &token in tokens {
        match token {
            Token::Number(_) => output.push(token),
            Token::LeftParen => stack.push(token),
            Token::RightParen => loop {
                match stack.pop() {
                    Some(Token::LeftParen) => break,
                    Some(top) => output.push(top),
                    None => return Err(Malformed::UnmatchedParen.into()),
                }
            },
            Token::Operator(op) => {
                while let Some(&Token::Operator(top)) = stack.last()
                    && top.precedence() >= op.precedence()
                {
                    output.push(Token::Operator(top));
                    stack.pop();
                }
                stack.push(token);
            }
        }
    }

    while let Some(top) = stack.pop() {
        if top == Token::LeftParen {
            tracing::trace!("dropping unclosed parenthesis");
            continue;
        }
        output.push(top);
    }

    Ok(output)
}
