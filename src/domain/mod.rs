use serde::Serialize;

pub mod category;
pub mod color;
pub mod product;
pub mod product_type;
pub mod shape;

use crate::domain::product::Product;

/// Filter shared by every reference-table listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceListQuery {
    /// Restrict the listing to rows whose active flag matches.
    pub is_active: Option<bool>,
}

impl ReferenceListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only return rows whose `is_active` flag equals `value`.
    pub fn active(mut self, value: bool) -> Self {
        self.is_active = Some(value);
        self
    }
}

/// A reference entity together with the live products pointing at it.
#[derive(Debug, Clone, Serialize)]
pub struct WithProducts<T> {
    #[serde(flatten)]
    pub entity: T,
    pub products: Vec<Product>,
}

impl<T> WithProducts<T> {
    pub fn new(entity: T, products: Vec<Product>) -> Self {
        Self { entity, products }
    }
}
