use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Named color swatch with an optional `#RRGGBB` code.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Color {
    pub id: i32,
    pub name: String,
    pub hex_code: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewColor {
    pub name: String,
    pub hex_code: Option<String>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl NewColor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex_code: None,
            is_active: true,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn with_hex_code(mut self, hex_code: impl Into<String>) -> Self {
        self.hex_code = Some(hex_code.into());
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// Patch applied to an existing color; `hex_code: Some(None)` clears the code.
#[derive(Debug, Clone)]
pub struct UpdateColor {
    pub name: Option<String>,
    pub hex_code: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateColor {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateColor {
    pub fn new() -> Self {
        Self {
            name: None,
            hex_code: None,
            is_active: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn hex_code(mut self, hex_code: Option<impl Into<String>>) -> Self {
        self.hex_code = Some(hex_code.map(Into::into));
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}
