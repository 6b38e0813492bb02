use serde::Deserialize;
use validator::Validate;

use crate::domain::shape::{NewShape, UpdateShape};
use crate::forms::{
    FieldErrors, FlagValue, NAME_MAX_LEN_VALIDATOR, nullable, required_name, resolve_flag,
    sanitize_inline_text, sanitize_multiline_text,
};

/// JSON body accepted by `POST /api/shapes`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateShapeForm {
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<FlagValue>,
}

impl CreateShapeForm {
    /// Name as it would be stored, used for the uniqueness check.
    pub fn normalized_name(&self) -> Option<String> {
        normalized(self.name.as_deref())
    }

    /// Validates and sanitizes the payload into a domain `NewShape`.
    pub fn into_new_shape(self) -> Result<NewShape, FieldErrors> {
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

        let mut new_shape = NewShape::new(name).active(is_active.unwrap_or(true));
        if let Some(description) = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty())
        {
            new_shape = new_shape.with_description(description);
        }

        Ok(new_shape)
    }
}

/// JSON body accepted by `PUT /api/shapes/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateShapeForm {
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub is_active: Option<FlagValue>,
}

impl UpdateShapeForm {
    pub fn normalized_name(&self) -> Option<String> {
        normalized(self.name.as_deref())
    }

    /// Validates and sanitizes the payload into a domain `UpdateShape`.
    pub fn into_update_shape(self) -> Result<UpdateShape, FieldErrors> {
        let mut errors = self.validate().err().map(FieldErrors::from).unwrap_or_default();
        let mut update = UpdateShape::new();

        if let Some(raw) = self.name.as_deref()
            && !errors.contains("name")
            && let Some(name) = required_name(Some(raw), "name", &mut errors)
        {
            update = update.name(name);
        }

        if let Some(description) = self.description {
            update = update.description(
                description
                    .as_deref()
                    .map(sanitize_multiline_text)
                    .filter(|value| !value.is_empty()),
            );
        }

        if let Some(is_active) = resolve_flag(self.is_active.as_ref(), "is_active", &mut errors) {
            update = update.active(is_active);
        }

        errors.into_result()?;
        Ok(update)
    }
}

fn normalized(name: Option<&str>) -> Option<String> {
    name.map(sanitize_inline_text).filter(|value| !value.is_empty())
}
