use chrono::{Local, NaiveDateTime};
use serde::{Serialize, Serializer};

use crate::domain::{category::Category, color::Color, product_type::ProductType, shape::Shape};
use crate::pagination::Pagination;

/// Default unit recorded for product weights.
pub const DEFAULT_WEIGHT_UNIT: &str = "grams";

/// One of the three image columns a product carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    First,
    Second,
    Third,
}

impl ImageSlot {
    pub const ALL: [ImageSlot; 3] = [ImageSlot::First, ImageSlot::Second, ImageSlot::Third];

    /// Name of the request field and table column backing the slot.
    pub fn field(self) -> &'static str {
        match self {
            ImageSlot::First => "image_1",
            ImageSlot::Second => "image_2",
            ImageSlot::Third => "image_3",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ImageSlot::First => 0,
            ImageSlot::Second => 1,
            ImageSlot::Third => 2,
        }
    }
}

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Stock keeping unit, unique across every product row.
    pub sku: String,
    /// Optional longer description shown to shoppers.
    pub description: Option<String>,
    pub product_type_id: i32,
    pub category_id: i32,
    pub color_id: Option<i32>,
    pub shape_id: Option<i32>,
    /// Price represented in the smallest currency unit (for example cents).
    #[serde(rename = "price", serialize_with = "serialize_price")]
    pub price_cents: i64,
    /// Units on hand.
    pub stock: i32,
    /// Optional weight expressed in `weight_unit`.
    pub weight: Option<f64>,
    pub weight_unit: String,
    /// Metal purity or fineness, e.g. `18K` or `925 Sterling`.
    pub purity: Option<String>,
    /// Storage paths of the product images.
    pub image_1: Option<String>,
    pub image_2: Option<String>,
    pub image_3: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Set once the product has been soft deleted.
    #[serde(skip_serializing)]
    pub deleted_at: Option<NaiveDateTime>,
}

impl Product {
    /// Storage path currently held by `slot`.
    pub fn image(&self, slot: ImageSlot) -> Option<&str> {
        match slot {
            ImageSlot::First => self.image_1.as_deref(),
            ImageSlot::Second => self.image_2.as_deref(),
            ImageSlot::Third => self.image_3.as_deref(),
        }
    }

    /// All stored image paths in slot order.
    pub fn images(&self) -> Vec<&str> {
        ImageSlot::ALL
            .iter()
            .filter_map(|slot| self.image(*slot))
            .collect()
    }
}

/// Render minor units as a two-decimal amount, e.g. `99999` as `"999.99"`.
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

fn serialize_price<S>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_price(*cents))
}

/// Product together with the reference rows it points at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,
    pub product_type: Option<ProductType>,
    pub category: Option<Category>,
    pub color: Option<Color>,
    pub shape: Option<Shape>,
}

impl ProductDetails {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            product_type: None,
            category: None,
            color: None,
            shape: None,
        }
    }
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
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
    pub images: [Option<String>; 3],
    pub is_active: bool,
    pub is_featured: bool,
    /// Timestamp captured when the product payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new active, non-featured product with the current timestamp.
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        product_type_id: i32,
        category_id: i32,
        price_cents: i64,
    ) -> Self {
        Self {
            name: name.into(),
            sku: sku.into(),
            description: None,
            product_type_id,
            category_id,
            color_id: None,
            shape_id: None,
            price_cents,
            stock: 0,
            weight: None,
            weight_unit: DEFAULT_WEIGHT_UNIT.to_string(),
            purity: None,
            images: [None, None, None],
            is_active: true,
            is_featured: false,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color_id: i32) -> Self {
        self.color_id = Some(color_id);
        self
    }

    pub fn with_shape(mut self, shape_id: i32) -> Self {
        self.shape_id = Some(shape_id);
        self
    }

    pub fn with_stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_weight(mut self, weight: f64, unit: impl Into<String>) -> Self {
        self.weight = Some(weight);
        self.weight_unit = unit.into();
        self
    }

    pub fn with_purity(mut self, purity: impl Into<String>) -> Self {
        self.purity = Some(purity.into());
        self
    }

    pub fn with_image(mut self, slot: ImageSlot, path: impl Into<String>) -> Self {
        self.images[slot.index()] = Some(path.into());
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn featured(mut self, is_featured: bool) -> Self {
        self.is_featured = is_featured;
        self
    }
}

/// Patch data applied when updating an existing product.
///
/// `None` leaves a column untouched; for nullable columns `Some(None)` clears it.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<Option<String>>,
    pub product_type_id: Option<i32>,
    pub category_id: Option<i32>,
    pub color_id: Option<Option<i32>>,
    pub shape_id: Option<Option<i32>>,
    pub price_cents: Option<i64>,
    pub stock: Option<i32>,
    pub weight: Option<Option<f64>>,
    pub weight_unit: Option<String>,
    pub purity: Option<Option<String>>,
    /// Replacement storage paths, indexed by [`ImageSlot::index`].
    pub images: [Option<String>; 3],
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self {
            name: None,
            sku: None,
            description: None,
            product_type_id: None,
            category_id: None,
            color_id: None,
            shape_id: None,
            price_cents: None,
            stock: None,
            weight: None,
            weight_unit: None,
            purity: None,
            images: [None, None, None],
            is_active: None,
            is_featured: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = Some(description.map(Into::into));
        self
    }

    pub fn product_type_id(mut self, product_type_id: i32) -> Self {
        self.product_type_id = Some(product_type_id);
        self
    }

    pub fn category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn color_id(mut self, color_id: Option<i32>) -> Self {
        self.color_id = Some(color_id);
        self
    }

    pub fn shape_id(mut self, shape_id: Option<i32>) -> Self {
        self.shape_id = Some(shape_id);
        self
    }

    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    pub fn stock(mut self, stock: i32) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn weight(mut self, weight: Option<f64>) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn weight_unit(mut self, unit: impl Into<String>) -> Self {
        self.weight_unit = Some(unit.into());
        self
    }

    pub fn purity(mut self, purity: Option<impl Into<String>>) -> Self {
        self.purity = Some(purity.map(Into::into));
        self
    }

    pub fn image(mut self, slot: ImageSlot, path: impl Into<String>) -> Self {
        self.images[slot.index()] = Some(path.into());
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn featured(mut self, is_featured: bool) -> Self {
        self.is_featured = Some(is_featured);
        self
    }
}

/// Query definition used to list live (not soft-deleted) products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    pub category_id: Option<i32>,
    pub product_type_id: Option<i32>,
    pub color_id: Option<i32>,
    pub shape_id: Option<i32>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    /// Inclusive lower price bound in cents.
    pub min_price_cents: Option<i64>,
    /// Inclusive upper price bound in cents.
    pub max_price_cents: Option<i64>,
    /// Case-insensitive substring matched against name, SKU or description.
    pub search: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn featured(mut self, is_featured: bool) -> Self {
        self.is_featured = Some(is_featured);
        self
    }

    pub fn min_price_cents(mut self, cents: i64) -> Self {
        self.min_price_cents = Some(cents);
        self
    }

    pub fn max_price_cents(mut self, cents: i64) -> Self {
        self.max_price_cents = Some(cents);
        self
    }

    /// Filter the results by a search term applied to name, SKU and description.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// Reference row whose dependent products should be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductRelation {
    ProductType(i32),
    Category(i32),
    Color(i32),
    Shape(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_price_pads_minor_units() {
        assert_eq!(format_price(99999), "999.99");
        assert_eq!(format_price(1250), "12.50");
        assert_eq!(format_price(5), "0.05");
        assert_eq!(format_price(0), "0.00");
    }

    #[test]
    fn image_slots_map_to_columns() {
        let fields: Vec<&str> = ImageSlot::ALL.iter().map(|slot| slot.field()).collect();
        assert_eq!(fields, vec!["image_1", "image_2", "image_3"]);
        assert_eq!(ImageSlot::Third.index(), 2);
    }
}
