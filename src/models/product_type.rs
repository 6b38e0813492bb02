use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product_type::{
    NewProductType as DomainNewProductType, ProductType as DomainProductType,
    UpdateProductType as DomainUpdateProductType,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_types)]
pub struct ProductType {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_types)]
pub struct NewProductType<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::product_types)]
pub struct UpdateProductType<'a> {
    pub name: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub is_active: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl From<ProductType> for DomainProductType {
    fn from(value: ProductType) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProductType> for NewProductType<'a> {
    fn from(value: &'a DomainNewProductType) -> Self {
        Self {
            name: value.name.as_str(),
            description: value.description.as_deref(),
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateProductType> for UpdateProductType<'a> {
    fn from(value: &'a DomainUpdateProductType) -> Self {
        Self {
            name: value.name.as_deref(),
            description: value.description.as_ref().map(|inner| inner.as_deref()),
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}
