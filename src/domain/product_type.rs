use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Top-level kind of catalog item (gemstone, jewelry, accessory...).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProductType {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product type.
#[derive(Debug, Clone)]
pub struct NewProductType {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl NewProductType {
    /// Build an active product type with the current timestamp.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_active: true,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// Patch applied to an existing product type; `None` leaves a field untouched.
#[derive(Debug, Clone)]
pub struct UpdateProductType {
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProductType {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProductType {
    pub fn new() -> Self {
        Self {
            name: None,
            description: None,
            is_active: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = Some(description.map(Into::into));
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}
