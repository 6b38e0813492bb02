use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::color::{
    Color as DomainColor, NewColor as DomainNewColor, UpdateColor as DomainUpdateColor,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::colors)]
pub struct Color {
    pub id: i32,
    pub name: String,
    pub hex_code: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::colors)]
pub struct NewColor<'a> {
    pub name: &'a str,
    pub hex_code: Option<&'a str>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::colors)]
pub struct UpdateColor<'a> {
    pub name: Option<&'a str>,
    pub hex_code: Option<Option<&'a str>>,
    pub is_active: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl From<Color> for DomainColor {
    fn from(value: Color) -> Self {
        Self {
            id: value.id,
            name: value.name,
            hex_code: value.hex_code,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewColor> for NewColor<'a> {
    fn from(value: &'a DomainNewColor) -> Self {
        Self {
            name: value.name.as_str(),
            hex_code: value.hex_code.as_deref(),
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateColor> for UpdateColor<'a> {
    fn from(value: &'a DomainUpdateColor) -> Self {
        Self {
            name: value.name.as_deref(),
            hex_code: value.hex_code.as_ref().map(|inner| inner.as_deref()),
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}
