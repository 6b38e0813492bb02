//! Reference data and demo products for local development.

use crate::domain::ReferenceListQuery;
use crate::domain::category::NewCategory;
use crate::domain::color::NewColor;
use crate::domain::product::{DEFAULT_WEIGHT_UNIT, NewProduct};
use crate::domain::product_type::NewProductType;
use crate::domain::shape::NewShape;
use crate::forms::slugify;
use crate::repository::{
    CategoryReader, CategoryWriter, ColorReader, ColorWriter, ProductReader, ProductTypeReader,
    ProductTypeWriter, ProductWriter, RepositoryError, RepositoryResult, ShapeReader, ShapeWriter,
};

/// Number of demo products the `seed` binary creates by default.
pub const DEFAULT_DEMO_PRODUCTS: usize = 50;

pub const PRODUCT_TYPES: [&str; 3] = ["Gemstone", "Jewelry", "Accessory"];
pub const CATEGORIES: [&str; 5] = ["Rings", "Necklaces", "Earrings", "Bracelets", "Loose Stones"];
pub const COLORS: [(&str, &str); 5] = [
    ("Ruby Red", "#E0115F"),
    ("Sapphire Blue", "#0F52BA"),
    ("Emerald Green", "#50C878"),
    ("Diamond White", "#FFFFFF"),
    ("Gold", "#FFD700"),
];
pub const SHAPES: [&str; 6] = ["Round", "Oval", "Princess", "Emerald", "Marquise", "Pear"];
pub const PURITIES: [&str; 5] = ["18K", "22K", "24K", "925 Sterling", "Platinum"];

const STYLES: [&str; 6] = ["Classic", "Vintage", "Royal", "Minimal", "Celestial", "Heritage"];

/// Counts of reference rows created by [`seed_reference_data`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub product_types: usize,
    pub categories: usize,
    pub colors: usize,
    pub shapes: usize,
}

/// Insert the reference taxonomies, skipping rows whose name already exists.
pub fn seed_reference_data<R>(repo: &R) -> RepositoryResult<SeedSummary>
where
    R: ProductTypeReader
        + ProductTypeWriter
        + CategoryReader
        + CategoryWriter
        + ColorReader
        + ColorWriter
        + ShapeReader
        + ShapeWriter
        + ?Sized,
{
    let mut summary = SeedSummary::default();

    for name in PRODUCT_TYPES {
        if repo.get_product_type_by_name(name)?.is_none() {
            repo.create_product_type(
                &NewProductType::new(name).with_description(format!("{name} items")),
            )?;
            summary.product_types += 1;
        }
    }

    for name in CATEGORIES {
        if repo.get_category_by_name(name)?.is_none() {
            repo.create_category(&NewCategory::new(name, slugify(name)))?;
            summary.categories += 1;
        }
    }

    for (name, hex_code) in COLORS {
        if repo.get_color_by_name(name)?.is_none() {
            repo.create_color(&NewColor::new(name).with_hex_code(hex_code))?;
            summary.colors += 1;
        }
    }

    for name in SHAPES {
        if repo.get_shape_by_name(name)?.is_none() {
            repo.create_shape(&NewShape::new(name).with_description(format!("{name} shape")))?;
            summary.shapes += 1;
        }
    }

    log::info!("Seeded reference data: {summary:?}");
    Ok(summary)
}

/// Create `count` deterministic demo products spread over the reference rows.
///
/// SKUs are `DEMO-00001` and up; products whose SKU already exists are
/// skipped. Returns how many rows were inserted.
pub fn seed_demo_products<R>(repo: &R, count: usize) -> RepositoryResult<usize>
where
    R: ProductTypeReader
        + CategoryReader
        + ColorReader
        + ShapeReader
        + ProductReader
        + ProductWriter
        + ?Sized,
{
    let all = ReferenceListQuery::new();
    let product_types = repo.list_product_types(all)?;
    let categories = repo.list_categories(all)?;
    let colors = repo.list_colors(all)?;
    let shapes = repo.list_shapes(all)?;

    if product_types.is_empty() || categories.is_empty() || colors.is_empty() || shapes.is_empty()
    {
        log::warn!("Reference data missing; seed it before demo products");
        return Err(RepositoryError::NotFound);
    }

    let mut inserted = 0;
    for index in 0..count {
        let sku = format!("DEMO-{:05}", index + 1);
        if repo.get_product_by_sku(&sku)?.is_some() {
            continue;
        }

        let product_type = &product_types[index % product_types.len()];
        let category = &categories[index % categories.len()];
        let color = &colors[(index / 2) % colors.len()];
        let shape = &shapes[(index * 5) % shapes.len()];
        let style = STYLES[index % STYLES.len()];

        let step = index as i64;
        let price_cents = 4_999 + (step * 7_919) % 495_000;
        let weight = 1.0 + ((step * 37) % 500) as f64 / 10.0;

        let product = NewProduct::new(
            format!("{style} {} {}", color.name, singular(&category.name)),
            sku,
            product_type.id,
            category.id,
            price_cents,
        )
        .with_description(format!(
            "{style} {} piece with a {} cut.",
            product_type.name.to_lowercase(),
            shape.name.to_lowercase()
        ))
        .with_color(color.id)
        .with_shape(shape.id)
        .with_stock(((step * 13) % 100) as i32)
        .with_weight(weight, DEFAULT_WEIGHT_UNIT)
        .with_purity(PURITIES[index % PURITIES.len()])
        .featured(index % 7 == 0);

        repo.create_product(&product)?;
        inserted += 1;
    }

    log::info!("Seeded {inserted} demo products");
    Ok(inserted)
}

fn singular(name: &str) -> &str {
    name.strip_suffix('s').unwrap_or(name)
}
