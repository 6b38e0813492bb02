use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub product_type_id: i32,
    pub category_id: i32,
    pub color_id: Option<i32>,
    pub shape_id: Option<i32>,
    pub price_cents: i64,
    pub stock: i32,
    pub weight: Option<f64>,
    pub weight_unit: String,
    pub purity: Option<String>,
    pub image_1: Option<String>,
    pub image_2: Option<String>,
    pub image_3: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub sku: &'a str,
    pub description: Option<&'a str>,
    pub product_type_id: i32,
    pub category_id: i32,
    pub color_id: Option<i32>,
    pub shape_id: Option<i32>,
    pub price_cents: i64,
    pub stock: i32,
    pub weight: Option<f64>,
    pub weight_unit: &'a str,
    pub purity: Option<&'a str>,
    pub image_1: Option<&'a str>,
    pub image_2: Option<&'a str>,
    pub image_3: Option<&'a str>,
    pub is_active: bool,
    pub is_featured: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub name: Option<&'a str>,
    pub sku: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub product_type_id: Option<i32>,
    pub category_id: Option<i32>,
    pub color_id: Option<Option<i32>>,
    pub shape_id: Option<Option<i32>>,
    pub price_cents: Option<i64>,
    pub stock: Option<i32>,
    pub weight: Option<Option<f64>>,
    pub weight_unit: Option<&'a str>,
    pub purity: Option<Option<&'a str>>,
    pub image_1: Option<&'a str>,
    pub image_2: Option<&'a str>,
    pub image_3: Option<&'a str>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            name: value.name,
            sku: value.sku,
            description: value.description,
            product_type_id: value.product_type_id,
            category_id: value.category_id,
            color_id: value.color_id,
            shape_id: value.shape_id,
            price_cents: value.price_cents,
            stock: value.stock,
            weight: value.weight,
            weight_unit: value.weight_unit,
            purity: value.purity,
            image_1: value.image_1,
            image_2: value.image_2,
            image_3: value.image_3,
            is_active: value.is_active,
            is_featured: value.is_featured,
            created_at: value.created_at,
            updated_at: value.updated_at,
            deleted_at: value.deleted_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        let [image_1, image_2, image_3] = &value.images;
        Self {
            name: value.name.as_str(),
            sku: value.sku.as_str(),
            description: value.description.as_deref(),
            product_type_id: value.product_type_id,
            category_id: value.category_id,
            color_id: value.color_id,
            shape_id: value.shape_id,
            price_cents: value.price_cents,
            stock: value.stock,
            weight: value.weight,
            weight_unit: value.weight_unit.as_str(),
            purity: value.purity.as_deref(),
            image_1: image_1.as_deref(),
            image_2: image_2.as_deref(),
            image_3: image_3.as_deref(),
            is_active: value.is_active,
            is_featured: value.is_featured,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        let [image_1, image_2, image_3] = &value.images;
        Self {
            name: value.name.as_deref(),
            sku: value.sku.as_deref(),
            description: value.description.as_ref().map(|inner| inner.as_deref()),
            product_type_id: value.product_type_id,
            category_id: value.category_id,
            color_id: value.color_id,
            shape_id: value.shape_id,
            price_cents: value.price_cents,
            stock: value.stock,
            weight: value.weight,
            weight_unit: value.weight_unit.as_deref(),
            purity: value.purity.as_ref().map(|inner| inner.as_deref()),
            image_1: image_1.as_deref(),
            image_2: image_2.as_deref(),
            image_3: image_3.as_deref(),
            is_active: value.is_active,
            is_featured: value.is_featured,
            updated_at: value.updated_at,
        }
    }
}
