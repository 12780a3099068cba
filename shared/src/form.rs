//! Declarative form schema rendered by the client, plus the coercions applied
//! to form text when a payload is built.

use crate::id::RecordId;

/// One form control bound to a draft field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec<F> {
    pub field: F,
    pub placeholder: &'static str,
    pub input: Input,
    pub required: bool,
    pub value: String,
}

impl<F> FieldSpec<F> {
    pub fn new(field: F, placeholder: &'static str, input: Input, value: impl Into<String>) -> Self {
        FieldSpec {
            field,
            placeholder,
            input,
            required: true,
            value: value.into(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Text,
    Email,
    Number { min: Option<i32>, max: Option<i32> },
    Date,
    /// `empty` labels the blank option; `None` means the select has no blank option.
    Select { empty: Option<&'static str>, choices: Vec<Choice> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Choice {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Integer from form text, reading leading digits the way a number input is
/// usually parsed (`"10"` and `"10.5"` give 10). Anything else is `None`.
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Number from form text; empty or malformed text is `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Text for an optional numeric field; `None` shows as an empty input.
pub fn number_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Selector value for an optional reference; `None` selects the empty option.
pub fn choice_text(id: Option<&RecordId>) -> String {
    id.map(ToString::to_string).unwrap_or_default()
}

pub(crate) fn optional_text(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_take_leading_digits() {
        assert_eq!(parse_int("10"), Some(10));
        assert_eq!(parse_int(" 10.5 "), Some(10));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("horas"), None);
    }

    #[test]
    fn numbers_are_optional() {
        assert_eq!(parse_number("7.5"), Some(7.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(number_text(Some(8.0)), "8");
        assert_eq!(number_text(None), "");
    }

    #[test]
    fn choice_text_keeps_the_id_text() {
        assert_eq!(choice_text(Some(&RecordId::from(7))), "7");
        assert_eq!(choice_text(Some(&RecordId::from("b2"))), "b2");
        assert_eq!(choice_text(None), "");
    }
}
