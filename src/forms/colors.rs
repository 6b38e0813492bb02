use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::color::{NewColor, UpdateColor};
use crate::forms::{
    FieldErrors, FlagValue, NAME_MAX_LEN_VALIDATOR, nullable, required_name, resolve_flag,
    sanitize_inline_text,
};

const HEX_CODE_MESSAGE: &str = "The hex_code format is invalid.";

/// `#RRGGBB` with hexadecimal digits in either case.
pub fn is_hex_code(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|ch| ch.is_ascii_hexdigit())
}

fn validate_hex_code(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || is_hex_code(trimmed) {
        return Ok(());
    }
    Err(ValidationError::new("hex_code").with_message(Cow::Borrowed(HEX_CODE_MESSAGE)))
}

fn normalized_hex(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// JSON body accepted by `POST /api/colors`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateColorForm {
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_hex_code"))]
    pub hex_code: Option<String>,
    pub is_active: Option<FlagValue>,
}

impl CreateColorForm {
    pub fn normalized_name(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty())
    }

    /// Validates and sanitizes the payload into a domain `NewColor`.
    pub fn into_new_color(self) -> Result<NewColor, FieldErrors> {
        let mut errors = self.validate().err().map(FieldErrors::from).unwrap_or_default();

        let name = if errors.contains("name") {
            None
        } else {
            required_name(self.name.as_deref(), "name", &mut errors)
        };
        let is_active = resolve_flag(self.is_active.as_ref(), "is_active", &mut errors);

        let Some(name) = name.filter(|_| errors.is_empty()) else {
            return Err(errors);
        };

        let mut new_color = NewColor::new(name).active(is_active.unwrap_or(true));
        if let Some(hex_code) = normalized_hex(self.hex_code.as_deref()) {
            new_color = new_color.with_hex_code(hex_code);
        }

        Ok(new_color)
    }
}

/// JSON body accepted by `PUT /api/colors/{id}`; `"hex_code": null` clears the code.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateColorForm {
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub hex_code: Option<Option<String>>,
    pub is_active: Option<FlagValue>,
}

impl UpdateColorForm {
    pub fn normalized_name(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty())
    }

    /// Validates and sanitizes the payload into a domain `UpdateColor`.
    pub fn into_update_color(self) -> Result<UpdateColor, FieldErrors> {
        let mut errors = self.validate().err().map(FieldErrors::from).unwrap_or_default();
        let mut update = UpdateColor::new();

        if let Some(raw) = self.name.as_deref()
            && !errors.contains("name")
            && let Some(name) = required_name(Some(raw), "name", &mut errors)
        {
            update = update.name(name);
        }

        if let Some(hex_code) = self.hex_code {
            match hex_code.as_deref().map(validate_hex_code) {
                Some(Err(_)) => errors.add("hex_code", HEX_CODE_MESSAGE),
                _ => update = update.hex_code(normalized_hex(hex_code.as_deref())),
            }
        }

        if let Some(is_active) = resolve_flag(self.is_active.as_ref(), "is_active", &mut errors) {
            update = update.active(is_active);
        }

        errors.into_result()?;
        Ok(update)
    }
}
