use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value, json};
use std::borrow::Cow;
use std::str::FromStr;
use strum::VariantNames;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

use crate::model::attendance::AttendanceStatus;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern compiles"));

// dotted domain ending in an alphabetic TLD of two or more letters
static EMAIL_DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$")
        .expect("email domain pattern compiles")
});

/// `YYYY-MM-DD` that also names a real calendar day.
pub fn parse_ymd(value: &str) -> Option<NaiveDate> {
    if !DATE_SHAPE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn validate_ymd(value: &str) -> Result<(), ValidationError> {
    match parse_ymd(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("date").with_message(Cow::Borrowed("date must be YYYY-MM-DD"))),
    }
}

/// RFC syntax check plus a routable-looking domain, so `a@b` is refused.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if value.validate_email() && EMAIL_DOMAIN.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message(Cow::Borrowed("email must be a valid email")))
    }
}

pub fn validate_status(value: &str) -> Result<(), ValidationError> {
    match AttendanceStatus::from_str(value) {
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::new("enum").with_message(Cow::Owned(format!(
            "status must be one of: {}",
            AttendanceStatus::VARIANTS.join(", ")
        )))),
    }
}

/// Shapes `ValidationErrors` as `{formErrors: [], fieldErrors: {field: [messages]}}`
/// with field names in the same camelCase the JSON payloads use.
pub fn flatten(errors: &ValidationErrors) -> Value {
    let mut fields = Map::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<Value> = field_errors
            .iter()
            .map(|e| match &e.message {
                Some(message) => Value::String(message.to_string()),
                None => Value::String(format!("{} is invalid", camel_case(&field))),
            })
            .collect();
        fields.insert(camel_case(&field), Value::Array(messages));
    }

    json!({ "formErrors": [], "fieldErrors": fields })
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
