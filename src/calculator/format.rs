//! Formatting of results for display.

use serde::Deserialize;

/// How results are rendered.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Group the integer part in threes with `,`.
    pub thousands_separator: bool,
    /// Digits kept after the decimal point before trailing zeros are trimmed.
    pub max_decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            thousands_separator: true,
            max_decimals: 10,
        }
    }
}

/// Format a value for display, honouring the display configuration.
pub fn format_value(value: f64, config: &DisplayConfig) -> String {
    if value.is_nan() {
        return "Not a Number".to_string();
    }
    if value.is_infinite() {
        let msg = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return msg.to_string();
    }

    let plain = round_trimmed(value, config.max_decimals);
    if !config.thousands_separator {
        return plain;
    }

    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, dec_part) = match digits.find('.') {
        Some(dot_pos) => digits.split_at(dot_pos),
        None => (digits, ""),
    };
    format!("{}{}{}", sign, with_separators(int_part), dec_part)
}

/// Format a value without separators (for copying or re-entry).
pub fn format_plain(value: f64, max_decimals: usize) -> String {
    format_value(
        value,
        &DisplayConfig {
            thousands_separator: false,
            max_decimals,
        },
    )
}

fn round_trimmed(value: f64, max_decimals: usize) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }

    let formatted = format!("{:.*}", max_decimals, value);
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };
    match trimmed {
        // Rounded away to nothing.
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Insert `,` every three digits of an unsigned integer string.
fn with_separators(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
