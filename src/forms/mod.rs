//! Input validation and sanitisation shared by the JSON and multipart forms.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use validator::ValidationErrors;

use crate::domain::ReferenceListQuery;

pub mod categories;
pub mod colors;
pub mod product_types;
pub mod products;
pub mod shapes;

/// Maximum length for names, slugs and SKUs.
pub const NAME_MAX_LEN: usize = 255;
pub const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Field name mapped to every message recorded against it.
///
/// This is the payload of a validation failure and is rendered verbatim as the
/// `errors` member of the response envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field error, handy for store-backed checks.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Err(self)` when any field failed.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Combine a form conversion with errors found elsewhere so the caller
    /// reports every failing field at once.
    pub fn finish<T>(result: Result<T, FieldErrors>, mut extra: FieldErrors) -> Result<T, FieldErrors> {
        match result {
            Ok(value) if extra.is_empty() => Ok(value),
            Ok(_) => Err(extra),
            Err(errors) => {
                extra.merge(errors);
                Err(extra)
            }
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for FieldErrors {}

impl From<ValidationErrors> for FieldErrors {
    fn from(value: ValidationErrors) -> Self {
        let mut errors = FieldErrors::new();
        for (field, failures) in value.field_errors() {
            let field = field.to_string();
            for failure in failures.iter() {
                let message = match &failure.message {
                    Some(message) => message.to_string(),
                    None => match (failure.code.as_ref(), failure.params.get("max")) {
                        ("length", Some(max)) => {
                            format!("The {field} may not be greater than {max} characters.")
                        }
                        ("range", _) => format!("The {field} is out of range."),
                        _ => format!("The {field} is invalid."),
                    },
                };
                errors.add(field.clone(), message);
            }
        }
        errors
    }
}

pub(crate) fn required_message(field: &str) -> String {
    format!("The {field} field is required.")
}

pub(crate) fn too_long_message(field: &str, max: usize) -> String {
    format!("The {field} may not be greater than {max} characters.")
}

/// Interpret a boolean-like literal. Only `1`, `0`, `true` and `false` are
/// accepted; surrounding whitespace is ignored.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// JSON value accepted for boolean flags: `true`, `1` or `"1"` and friends.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl FlagValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagValue::Bool(value) => Some(*value),
            FlagValue::Int(1) => Some(true),
            FlagValue::Int(0) => Some(false),
            FlagValue::Int(_) => None,
            FlagValue::Text(text) => parse_flag(text),
        }
    }
}

/// Resolve an optional flag, recording an error for unrecognised literals.
pub(crate) fn resolve_flag(
    value: Option<&FlagValue>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<bool> {
    let value = value?;
    match value.as_bool() {
        Some(flag) => Some(flag),
        None => {
            errors.add(field, format!("The {field} field must be true or false."));
            None
        }
    }
}

/// Query string accepted by the reference listings, e.g. `?is_active=1`.
#[derive(Debug, Default, Deserialize)]
pub struct ReferenceListParams {
    pub is_active: Option<String>,
}

impl ReferenceListParams {
    pub fn into_query(self) -> Result<ReferenceListQuery, FieldErrors> {
        let raw = match self.is_active {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(ReferenceListQuery::new()),
        };
        match parse_flag(&raw) {
            Some(flag) => Ok(ReferenceListQuery::new().active(flag)),
            None => Err(FieldErrors::single(
                "is_active",
                "The is_active field must be true or false.",
            )),
        }
    }
}

/// Deserialize a field so that an absent key stays `None`, an explicit `null`
/// becomes `Some(None)` and a value becomes `Some(Some(value))`.
///
/// Must be paired with `#[serde(default)]`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Validate a required name: sanitized, non-empty and within [`NAME_MAX_LEN`].
pub(crate) fn required_name(
    value: Option<&str>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    let sanitized = value.map(sanitize_inline_text).unwrap_or_default();
    if sanitized.is_empty() {
        errors.add(field, required_message(field));
        return None;
    }
    if sanitized.chars().count() > NAME_MAX_LEN {
        errors.add(field, too_long_message(field, NAME_MAX_LEN));
        return None;
    }
    Some(sanitized)
}

/// Collapse runs of whitespace into single spaces and drop control characters.
pub fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize each line and keep at most one blank line between paragraphs.
pub fn sanitize_multiline_text(input: &str) -> String {
    let mut result: Vec<String> = Vec::new();

    for line in input.lines().map(sanitize_inline_text) {
        if line.is_empty() && result.last().is_none_or(|prev| prev.is_empty()) {
            continue;
        }
        result.push(line);
    }

    while matches!(result.last(), Some(line) if line.is_empty()) {
        result.pop();
    }

    result.join("\n")
}

/// Lowercase, hyphen-separated identifier built from ASCII alphanumerics.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Parse a non-negative decimal with at most two fractional digits into
/// hundredths, e.g. `"999.99"` into `99999`.
pub fn parse_hundredths(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if fraction.len() > 2
        || !whole.chars().all(|ch| ch.is_ascii_digit())
        || !fraction.chars().all(|ch| ch.is_ascii_digit())
    {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let fraction: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };

    whole.checked_mul(100)?.checked_add(fraction)
}
