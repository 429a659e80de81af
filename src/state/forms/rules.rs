//! Field rules shared by the per-form validators
//!
//! Each rule writes at most one message for its field and never overwrites a
//! message that an earlier rule already recorded.

use super::field::{FormErrors, FormValues, ValuesExt};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid regex"));

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s$.?#].[^\s]*$").expect("valid regex"));

pub const EMAIL_INVALID: &str = "Email address is invalid";

pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn is_http_url(value: &str) -> bool {
    URL_PATTERN.is_match(value)
}

pub fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Parses as a finite number strictly greater than zero
pub fn is_positive_number(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .is_ok_and(|n| n.is_finite() && n > 0.0)
}

fn fail(errors: &mut FormErrors, name: &str, message: &str) {
    errors
        .entry(name.to_string())
        .or_insert_with(|| message.to_string());
}

/// Returns true when the field has a value
pub fn required(errors: &mut FormErrors, values: &FormValues, name: &str, message: &str) -> bool {
    if values.is_blank(name) {
        fail(errors, name, message);
        false
    } else {
        true
    }
}

pub fn email(errors: &mut FormErrors, values: &FormValues, name: &str) {
    if required(errors, values, name, "Email is required") && !is_email(values.text(name)) {
        fail(errors, name, EMAIL_INVALID);
    }
}

pub fn positive_number(
    errors: &mut FormErrors,
    values: &FormValues,
    name: &str,
    missing: &str,
    invalid: &str,
) {
    if required(errors, values, name, missing) && !is_positive_number(values.text(name)) {
        fail(errors, name, invalid);
    }
}

pub fn digits(
    errors: &mut FormErrors,
    values: &FormValues,
    name: &str,
    missing: &str,
    invalid: &str,
) {
    if required(errors, values, name, missing) && !is_digits(values.text(name)) {
        fail(errors, name, invalid);
    }
}

pub fn http_url(
    errors: &mut FormErrors,
    values: &FormValues,
    name: &str,
    missing: &str,
    invalid: &str,
) {
    if required(errors, values, name, missing) && !is_http_url(values.text(name)) {
        fail(errors, name, invalid);
    }
}

pub fn min_chars(
    errors: &mut FormErrors,
    values: &FormValues,
    name: &str,
    min: usize,
    missing: &str,
    too_short: &str,
) {
    if required(errors, values, name, missing) && values.text(name).chars().count() < min {
        fail(errors, name, too_short);
    }
}
