use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use image::ImageFormat;
use serde::Deserialize;

use crate::domain::product::{
    DEFAULT_WEIGHT_UNIT, ImageSlot, NewProduct, ProductListQuery, UpdateProduct,
};
use crate::forms::{
    FieldErrors, NAME_MAX_LEN, parse_flag, parse_hundredths, required_message,
    required_name, sanitize_inline_text, sanitize_multiline_text, too_long_message,
};
use crate::pagination::Pagination;

/// Maximum length for `weight_unit` and `purity`.
const SHORT_TEXT_MAX_LEN: usize = 50;

/// Largest accepted image, in kilobytes.
pub const MAX_IMAGE_KILOBYTES: usize = 2048;
const MAX_IMAGE_BYTES: usize = MAX_IMAGE_KILOBYTES * 1024;

/// Whether absent required fields are an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

#[derive(MultipartForm, Default)]
/// Multipart form used to create or update a product.
///
/// Every field is text; numbers and flags are parsed during validation so that
/// all failures can be reported together.
pub struct ProductForm {
    pub name: Option<Text<String>>,
    pub sku: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub product_type_id: Option<Text<String>>,
    pub category_id: Option<Text<String>>,
    pub color_id: Option<Text<String>>,
    pub shape_id: Option<Text<String>>,
    pub price: Option<Text<String>>,
    pub stock: Option<Text<String>>,
    pub weight: Option<Text<String>>,
    pub weight_unit: Option<Text<String>>,
    pub purity: Option<Text<String>>,
    pub is_active: Option<Text<String>>,
    pub is_featured: Option<Text<String>>,
    #[multipart(limit = "4MB")]
    pub image_1: Option<TempFile>,
    #[multipart(limit = "4MB")]
    pub image_2: Option<TempFile>,
    #[multipart(limit = "4MB")]
    pub image_3: Option<TempFile>,
}

/// An uploaded image that passed the type and size checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    /// Canonical extension: `jpg`, `png` or `gif`.
    pub extension: &'static str,
}

/// Typed product fields after validation.
///
/// `None` means the field was not submitted. Nullable columns use
/// `Some(None)` for "submitted empty", which clears them on update.
#[derive(Debug, Default)]
pub struct ProductInput {
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
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub images: [Option<ImageUpload>; 3],
}

impl ProductForm {
    /// Parse and validate every field, collecting all failures.
    ///
    /// The returned input only carries fields that passed; callers must check
    /// the errors before using it.
    pub fn into_input(self, mode: FormMode) -> (ProductInput, FieldErrors) {
        let mut errors = FieldErrors::new();
        let mut input = ProductInput::default();
        let required = mode == FormMode::Create;

        let name = text(self.name);
        if name.is_some() || required {
            input.name = required_name(name.as_deref(), "name", &mut errors);
        }

        let sku = text(self.sku);
        if sku.is_some() || required {
            input.sku = required_sku(sku.as_deref(), &mut errors);
        }

        input.description = text(self.description).map(|raw| {
            Some(sanitize_multiline_text(&raw)).filter(|value| !value.is_empty())
        });

        input.product_type_id = required_id(
            text(self.product_type_id),
            "product_type_id",
            required,
            &mut errors,
        );
        input.category_id =
            required_id(text(self.category_id), "category_id", required, &mut errors);
        input.color_id = optional_id(text(self.color_id), "color_id", &mut errors);
        input.shape_id = optional_id(text(self.shape_id), "shape_id", &mut errors);

        match text(self.price) {
            Some(raw) if !raw.trim().is_empty() => match parse_hundredths(&raw) {
                Some(cents) => input.price_cents = Some(cents),
                None => errors.add("price", amount_message("price")),
            },
            None if !required => {}
            _ => errors.add("price", required_message("price")),
        }

        if let Some(raw) = non_blank(text(self.stock)) {
            match raw.trim().parse::<i32>() {
                Ok(stock) if stock >= 0 => input.stock = Some(stock),
                _ => errors.add("stock", "The stock must be an integer of at least 0."),
            }
        }

        input.weight = text(self.weight).and_then(|raw| {
            if raw.trim().is_empty() {
                return Some(None);
            }
            match parse_hundredths(&raw) {
                Some(hundredths) => Some(Some(hundredths as f64 / 100.0)),
                None => {
                    errors.add("weight", amount_message("weight"));
                    None
                }
            }
        });

        if let Some(unit) = non_blank(text(self.weight_unit)).map(|raw| sanitize_inline_text(&raw)) {
            if unit.chars().count() > SHORT_TEXT_MAX_LEN {
                errors.add("weight_unit", too_long_message("weight_unit", SHORT_TEXT_MAX_LEN));
            } else {
                input.weight_unit = Some(unit);
            }
        }

        input.purity = text(self.purity).and_then(|raw| {
            let purity = sanitize_inline_text(&raw);
            if purity.chars().count() > SHORT_TEXT_MAX_LEN {
                errors.add("purity", too_long_message("purity", SHORT_TEXT_MAX_LEN));
                return None;
            }
            Some(Some(purity).filter(|value| !value.is_empty()))
        });

        input.is_active = flag(text(self.is_active), "is_active", &mut errors);
        input.is_featured = flag(text(self.is_featured), "is_featured", &mut errors);

        let uploads = [self.image_1, self.image_2, self.image_3];
        for (slot, upload) in ImageSlot::ALL.into_iter().zip(uploads) {
            if let Some(upload) = upload {
                input.images[slot.index()] = read_image(upload, slot.field(), &mut errors);
            }
        }

        (input, errors)
    }
}

impl ProductInput {
    /// Build the insert payload once validation passed; `paths` are the stored
    /// image locations per slot.
    pub fn into_new_product(self, paths: [Option<String>; 3]) -> Result<NewProduct, FieldErrors> {
        let (Some(name), Some(sku), Some(product_type_id), Some(category_id), Some(price_cents)) = (
            self.name,
            self.sku,
            self.product_type_id,
            self.category_id,
            self.price_cents,
        ) else {
            let mut errors = FieldErrors::new();
            errors.add("product", "Required product fields are missing.");
            return Err(errors);
        };

        let mut product = NewProduct::new(name, sku, product_type_id, category_id, price_cents)
            .active(self.is_active.unwrap_or(true))
            .featured(self.is_featured.unwrap_or(false))
            .with_stock(self.stock.unwrap_or(0));

        if let Some(Some(description)) = self.description {
            product = product.with_description(description);
        }
        if let Some(Some(color_id)) = self.color_id {
            product = product.with_color(color_id);
        }
        if let Some(Some(shape_id)) = self.shape_id {
            product = product.with_shape(shape_id);
        }
        let unit = self
            .weight_unit
            .unwrap_or_else(|| DEFAULT_WEIGHT_UNIT.to_string());
        match self.weight {
            Some(Some(weight)) => product = product.with_weight(weight, unit),
            _ => product.weight_unit = unit,
        }
        if let Some(Some(purity)) = self.purity {
            product = product.with_purity(purity);
        }

        product.images = paths;
        Ok(product)
    }

    /// Build the patch; only submitted fields and replaced image slots change.
    pub fn into_update_product(self, paths: [Option<String>; 3]) -> UpdateProduct {
        let mut update = UpdateProduct::new();

        if let Some(name) = self.name {
            update = update.name(name);
        }
        if let Some(sku) = self.sku {
            update = update.sku(sku);
        }
        if let Some(description) = self.description {
            update = update.description(description);
        }
        if let Some(product_type_id) = self.product_type_id {
            update = update.product_type_id(product_type_id);
        }
        if let Some(category_id) = self.category_id {
            update = update.category_id(category_id);
        }
        if let Some(color_id) = self.color_id {
            update = update.color_id(color_id);
        }
        if let Some(shape_id) = self.shape_id {
            update = update.shape_id(shape_id);
        }
        if let Some(price_cents) = self.price_cents {
            update = update.price_cents(price_cents);
        }
        if let Some(stock) = self.stock {
            update = update.stock(stock);
        }
        if let Some(weight) = self.weight {
            update = update.weight(weight);
        }
        if let Some(unit) = self.weight_unit {
            update = update.weight_unit(unit);
        }
        if let Some(purity) = self.purity {
            update = update.purity(purity);
        }
        if let Some(is_active) = self.is_active {
            update = update.active(is_active);
        }
        if let Some(is_featured) = self.is_featured {
            update = update.featured(is_featured);
        }

        update.images = paths;
        update
    }
}

/// Query string accepted by `GET /api/products`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    pub category_id: Option<i32>,
    pub product_type_id: Option<i32>,
    pub color_id: Option<i32>,
    pub shape_id: Option<i32>,
    pub is_active: Option<String>,
    pub is_featured: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl ProductListParams {
    /// Convert the raw parameters into a repository query. Pagination is
    /// always applied.
    pub fn into_query(self) -> Result<(ProductListQuery, Pagination), FieldErrors> {
        let mut errors = FieldErrors::new();
        let pagination = Pagination::from_request(self.page, self.per_page);
        let mut query = ProductListQuery::new().paginate(pagination);

        query.category_id = self.category_id;
        query.product_type_id = self.product_type_id;
        query.color_id = self.color_id;
        query.shape_id = self.shape_id;

        query.is_active = non_blank(self.is_active).and_then(|raw| {
            parse_flag(&raw).or_else(|| {
                errors.add("is_active", "The is_active field must be true or false.");
                None
            })
        });
        query.is_featured = non_blank(self.is_featured).and_then(|raw| {
            parse_flag(&raw).or_else(|| {
                errors.add("is_featured", "The is_featured field must be true or false.");
                None
            })
        });

        query.min_price_cents = non_blank(self.min_price).and_then(|raw| {
            parse_hundredths(&raw).or_else(|| {
                errors.add("min_price", amount_message("min_price"));
                None
            })
        });
        query.max_price_cents = non_blank(self.max_price).and_then(|raw| {
            parse_hundredths(&raw).or_else(|| {
                errors.add("max_price", amount_message("max_price"));
                None
            })
        });

        query.search = non_blank(self.search).map(|term| term.trim().to_string());

        errors.into_result()?;
        Ok((query, pagination))
    }
}

fn text(value: Option<Text<String>>) -> Option<String> {
    value.map(|text| text.0)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn amount_message(field: &str) -> String {
    format!("The {field} must be a number of at least 0 with at most two decimal places.")
}

fn required_sku(value: Option<&str>, errors: &mut FieldErrors) -> Option<String> {
    let sku: String = value
        .unwrap_or_default()
        .trim()
        .chars()
        .filter(|ch| !ch.is_control())
        .collect();
    if sku.is_empty() {
        errors.add("sku", required_message("sku"));
        return None;
    }
    if sku.chars().count() > NAME_MAX_LEN {
        errors.add("sku", too_long_message("sku", NAME_MAX_LEN));
        return None;
    }
    Some(sku)
}

fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|id| *id > 0)
}

fn required_id(
    value: Option<String>,
    field: &str,
    required: bool,
    errors: &mut FieldErrors,
) -> Option<i32> {
    match value {
        None if !required => None,
        Some(raw) if !raw.trim().is_empty() => parse_id(&raw).or_else(|| {
            errors.add(field, format!("The {field} must be a positive integer."));
            None
        }),
        _ => {
            errors.add(field, required_message(field));
            None
        }
    }
}

fn optional_id(value: Option<String>, field: &str, errors: &mut FieldErrors) -> Option<Option<i32>> {
    let raw = value?;
    if raw.trim().is_empty() {
        return Some(None);
    }
    match parse_id(&raw) {
        Some(id) => Some(Some(id)),
        None => {
            errors.add(field, format!("The {field} must be a positive integer."));
            None
        }
    }
}

fn flag(value: Option<String>, field: &str, errors: &mut FieldErrors) -> Option<bool> {
    let raw = non_blank(value)?;
    parse_flag(&raw).or_else(|| {
        errors.add(field, format!("The {field} field must be true or false."));
        None
    })
}

/// Whether a declared content type may carry a supported image. Clients that
/// do not know the type send `application/octet-stream` or nothing.
fn declared_type_allowed(content_type: Option<&str>) -> bool {
    matches!(
        content_type,
        None | Some("application/octet-stream")
            | Some("image/jpeg")
            | Some("image/jpg")
            | Some("image/pjpeg")
            | Some("image/png")
            | Some("image/gif")
    )
}

/// Canonical extension for the image format detected from the file content.
fn sniffed_extension(bytes: &[u8]) -> Option<&'static str> {
    match image::guess_format(bytes).ok()? {
        ImageFormat::Jpeg => Some("jpg"),
        ImageFormat::Png => Some("png"),
        ImageFormat::Gif => Some("gif"),
        _ => None,
    }
}

fn read_image(upload: TempFile, field: &str, errors: &mut FieldErrors) -> Option<ImageUpload> {
    let file_name = upload.file_name.as_deref().filter(|name| !name.is_empty());
    // Browsers submit an empty part for an untouched file input.
    if upload.size == 0 && file_name.is_none() {
        return None;
    }

    let content_type = upload.content_type.as_ref().map(|mime| mime.essence_str());
    if upload.size == 0 || !declared_type_allowed(content_type) {
        errors.add(field, invalid_image_message(field));
        return None;
    }

    if upload.size > MAX_IMAGE_BYTES {
        errors.add(
            field,
            format!("The {field} may not be greater than {MAX_IMAGE_KILOBYTES} kilobytes."),
        );
        return None;
    }

    let bytes = match std::fs::read(upload.file.path()) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::warn!("Failed to read uploaded {field}: {err}");
            errors.add(field, format!("The {field} failed to upload."));
            return None;
        }
    };

    match sniffed_extension(&bytes) {
        Some(extension) => Some(ImageUpload { bytes, extension }),
        None => {
            errors.add(field, invalid_image_message(field));
            None
        }
    }
}

fn invalid_image_message(field: &str) -> String {
    format!("The {field} must be a file of type: jpeg, png, jpg, gif.")
}
