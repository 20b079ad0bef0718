//! Splits expression text into tokens.

use super::error::{EvalError, Malformed};
use super::token::{Operator, Token};

/// Strip any operator (and surrounding whitespace) left dangling at the end
/// of the input, e.g. right after the user pressed `+`.
pub fn trim_trailing_operator(input: &str) -> &str {
    let mut rest = input.trim_end();
    while let Some(last) = rest.chars().next_back()
        && Operator::from_char(last).is_some()
    {
        rest = rest[..rest.len() - last.len_utf8()].trim_end();
    }
    rest
}

/// Convert expression text into a token sequence.
///
/// A trailing operator is dropped first. Empty or whitespace-only input
/// yields no tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let input = trim_trailing_operator(input);
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() || c == '.' {
            literal.push(c);
            continue;
        }

        // A minus glued to a number where an operand is expected belongs to
        // the literal. Only recalled negative values produce this.
        if c == '-'
            && literal.is_empty()
            && expects_operand(tokens.last())
            && chars.peek().is_some_and(|n| n.is_ascii_digit() || *n == '.')
        {
            literal.push(c);
            continue;
        }

        flush_literal(&mut literal, &mut tokens)?;

        if c.is_whitespace() {
            continue;
        }

        let token = match c {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            _ => match Operator::from_char(c) {
                Some(op) => Token::Operator(op),
                None => return Err(Malformed::UnexpectedChar(c).into()),
            },
        };
        tokens.push(token);
    }

    flush_literal(&mut literal, &mut tokens)?;
    tracing::trace!(input, count = tokens.len(), "tokenized expression");
    Ok(tokens)
}

fn expects_operand(previous: Option<&Token>) -> bool {
    matches!(
        previous,
        None | Some(Token::Operator(_)) | Some(Token::LeftParen)
    )
}

fn flush_literal(literal: &mut String, tokens: &mut Vec<Token>) -> Result<(), EvalError> {
    if literal.is_empty() {
        return Ok(());
    }
    let value: f64 = literal
        .parse()
        .map_err(|_| Malformed::InvalidNumber(literal.clone()))?;
    tokens.push(Token::Number(value));
    literal.clear();
    Ok(())
}
