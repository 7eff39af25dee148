// File: src/validation/validators.rs
// Purpose: Basic checks shared by inline rules, validators and constraints

use regex::Regex;
use once_cell::sync::Lazy;

use crate::result::BindingResult;
use crate::value::Value;

/// Email shape check.
///
/// The character before the top-level domain is a wildcard, not a literal
/// dot: anything but a line terminator is accepted there, so `a@bcom`
/// passes. Kept as-is so existing submissions keep validating the same way.
pub const EMAIL_PATTERN: &str = concat!(
    r"^[0-9a-zA-Z]([-_.]?[0-9a-zA-Z])*@[0-9a-zA-Z]([-_.]?[0-9a-zA-Z])*",
    r"[^\n\r\x{85}\x{2028}\x{2029}]",
    r"[a-zA-Z]{2,3}$"
);

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex")
});

/// Validate email shape (whole-string match)
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// True when the text has at least one non-whitespace character
pub fn has_text(value: Option<&str>) -> bool {
    value.map(|s| !s.trim().is_empty()).unwrap_or(false)
}

/// Reject `field` under `code` when its value is null or empty.
pub fn reject_if_empty(errors: &mut BindingResult, field: &str, code: &str) {
    let empty = match errors.field_value(field) {
        None | Some(Value::Null) => true,
        Some(Value::Text(s)) => s.is_empty(),
        Some(_) => false,
    };
    if empty {
        errors.reject_value(field, code);
    }
}

/// Reject `field` under `code` when its value is null, empty or only whitespace.
pub fn reject_if_empty_or_whitespace(errors: &mut BindingResult, field: &str, code: &str) {
    let blank = match errors.field_value(field) {
        None | Some(Value::Null) => true,
        Some(Value::Text(s)) => !has_text(Some(s.as_str())),
        Some(_) => false,
    };
    if blank {
        errors.reject_value(field, code);
    }
}
