//! Keypad keys and parsing of key scripts such as `4 MS CE 5 MR`.

use crate::calculator::Operator;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single key on the calculator keypad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Key {
    Digit(char),
    DecimalPoint,
    LeftParen,
    RightParen,
    Operator(Operator),
    Equals,
    ClearEntry,
    ClearAll,
    SquareRoot,
    MemoryStore,
    MemoryClear,
    MemoryRecall,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum KeyError {
    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

lazy_static! {
    /// Matches one key label. Longer labels come first so that `CE` is not
    /// read as anything shorter.
    static ref KEY_LABEL: Regex = Regex::new(
        r"(?i)sqrt|√|MS|MC|MR|CE|AC|[0-9]|\.|[()]|[-+x×*/÷]|="
    ).unwrap();

    static ref WHOLE_KEY: Regex = Regex::new(
        r"^(?i:sqrt|√|MS|MC|MR|CE|AC|[0-9]|\.|[()]|[-+x×*/÷]|=)$"
    ).unwrap();
}

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if !WHOLE_KEY.is_match(label) {
            return Err(KeyError::UnknownKey(label.to_string()));
        }

        let key = match label.to_ascii_uppercase().as_str() {
            "SQRT" | "√" => Key::SquareRoot,
            "MS" => Key::MemoryStore,
            "MC" => Key::MemoryClear,
            "MR" => Key::MemoryRecall,
            "CE" => Key::ClearEntry,
            "AC" => Key::ClearAll,
            "." => Key::DecimalPoint,
            "(" => Key::LeftParen,
            ")" => Key::RightParen,
            "=" => Key::Equals,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Key::Digit(c),
                    (Some(c), None) => match Operator::from_char(c) {
                        Some(op) => Key::Operator(op),
                        None => return Err(KeyError::UnknownKey(label.to_string())),
                    },
                    _ => return Err(KeyError::UnknownKey(label.to_string())),
                }
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Key::Digit(d) => write!(f, "{}", d),
            Key::DecimalPoint => write!(f, "."),
            Key::LeftParen => write!(f, "("),
            Key::RightParen => write!(f, ")"),
            Key::Operator(op) => write!(f, "{}", op),
            Key::Equals => write!(f, "="),
            Key::ClearEntry => write!(f, "CE"),
            Key::ClearAll => write!(f, "AC"),
            Key::SquareRoot => write!(f, "√"),
            Key::MemoryStore => write!(f, "MS"),
            Key::MemoryClear => write!(f, "MC"),
            Key::MemoryRecall => write!(f, "MR"),
        }
    }
}

/// Split a key script into keys.
///
/// Whitespace between keys is optional and ignored. Any other text that is
/// not a key label is rejected.
pub fn parse_keys(script: &str) -> Result<Vec<Key>, KeyError> {
    let mut keys: Vec<Key> = Vec::new();
    let mut last_end = 0;

    for m in KEY_LABEL.find_iter(script) {
        check_gap(&script[last_end..m.start()])?;
        keys.push(m.as_str().parse::<Key>()?);
        last_end = m.end();
    }
    check_gap(&script[last_end..])?;

    Ok(keys)
}

fn check_gap(gap: &str) -> Result<(), KeyError> {
    let gap = gap.trim();
    if gap.is_empty() {
        Ok(())
    } else {
        Err(KeyError::UnknownKey(gap.to_string()))
    }
}
