use crate::domain::product::{ImageSlot, ProductDetails};
use crate::forms::FieldErrors;
use crate::forms::products::{FormMode, ImageUpload, ProductForm, ProductInput, ProductListParams};
use crate::pagination::Paginated;
use crate::repository::{
    CategoryReader, ColorReader, ProductReader, ProductTypeReader, ProductWriter, ShapeReader,
};
use crate::services::{ServiceError, ServiceResult, check_unique};
use crate::storage::{ImageStore, delete_quietly};

/// Everything a product write needs to read back for store-backed checks.
pub trait CatalogReader:
    ProductReader + ProductTypeReader + CategoryReader + ColorReader + ShapeReader
{
}

impl<T> CatalogReader for T where
    T: ProductReader + ProductTypeReader + CategoryReader + ColorReader + ShapeReader + ?Sized
{
}

/// Lists live products matching the filters, one page at a time.
pub fn list_products<R>(
    repo: &R,
    params: ProductListParams,
) -> ServiceResult<Paginated<ProductDetails>>
where
    R: ProductReader + ?Sized,
{
    let (query, pagination) = params.into_query()?;
    let (total, products) = repo.list_products(query)?;

    Ok(Paginated::new(products, pagination, total))
}

/// Loads one live product with its relations.
pub fn show_product<R>(repo: &R, id: i32) -> ServiceResult<ProductDetails>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(id)?.ok_or(ServiceError::NotFound)
}

/// Validates the form, stores its images and inserts the product.
///
/// Nothing is written when validation fails. If the insert itself fails, the
/// images stored for this request are removed again.
pub fn create_product<R, S>(repo: &R, store: &S, form: ProductForm) -> ServiceResult<ProductDetails>
where
    R: CatalogReader + ProductWriter + ?Sized,
    S: ImageStore + ?Sized,
{
    let (mut input, mut errors) = form.into_input(FormMode::Create);
    errors.merge(check_references(repo, &input, None)?);
    errors.into_result()?;

    let uploads = std::mem::take(&mut input.images);
    let paths = store_images(store, uploads)?;
    let written = stored_paths(&paths);

    let created = input
        .into_new_product(paths)
        .map_err(ServiceError::from)
        .and_then(|new_product| repo.create_product(&new_product).map_err(ServiceError::from));

    match created {
        Ok(details) => {
            log::info!(
                "Created product {} ({})",
                details.product.id,
                details.product.sku
            );
            Ok(details)
        }
        Err(err) => {
            delete_quietly(store, &written);
            Err(err)
        }
    }
}

/// Applies a partial update.
///
/// New images are stored first, then the row is updated, and only then are
/// the blobs of replaced slots deleted.
pub fn update_product<R, S>(
    repo: &R,
    store: &S,
    id: i32,
    form: ProductForm,
) -> ServiceResult<ProductDetails>
where
    R: CatalogReader + ProductWriter + ?Sized,
    S: ImageStore + ?Sized,
{
    let existing = repo.get_product_by_id(id)?.ok_or(ServiceError::NotFound)?;

    let (mut input, mut errors) = form.into_input(FormMode::Update);
    errors.merge(check_references(repo, &input, Some(id))?);
    errors.into_result()?;

    let uploads = std::mem::take(&mut input.images);
    let paths = store_images(store, uploads)?;
    let written = stored_paths(&paths);

    let replaced: Vec<String> = ImageSlot::ALL
        .iter()
        .filter(|slot| paths[slot.index()].is_some())
        .filter_map(|slot| existing.product.image(*slot).map(str::to_string))
        .collect();

    let update = input.into_update_product(paths);
    match repo.update_product(id, &update) {
        Ok(details) => {
            delete_quietly(store, &replaced);
            Ok(details)
        }
        Err(err) => {
            delete_quietly(store, &written);
            Err(err.into())
        }
    }
}

/// Removes the product's images and soft deletes the row.
pub fn delete_product<R, S>(repo: &R, store: &S, id: i32) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + ?Sized,
    S: ImageStore + ?Sized,
{
    let existing = repo.get_product_by_id(id)?.ok_or(ServiceError::NotFound)?;

    let images: Vec<String> = existing
        .product
        .images()
        .into_iter()
        .map(str::to_string)
        .collect();
    delete_quietly(store, &images);

    repo.soft_delete_product(id)?;
    log::info!("Soft deleted product {id}");
    Ok(())
}

/// Store-backed rules: referenced rows exist and the SKU is free.
fn check_references<R>(repo: &R, input: &ProductInput, own_id: Option<i32>) -> ServiceResult<FieldErrors>
where
    R: CatalogReader + ?Sized,
{
    let mut errors = FieldErrors::new();

    if let Some(id) = input.product_type_id
        && repo.get_product_type_by_id(id)?.is_none()
    {
        errors.add("product_type_id", invalid_selection("product_type_id"));
    }
    if let Some(id) = input.category_id
        && repo.get_category_by_id(id)?.is_none()
    {
        errors.add("category_id", invalid_selection("category_id"));
    }
    if let Some(Some(id)) = input.color_id
        && repo.get_color_by_id(id)?.is_none()
    {
        errors.add("color_id", invalid_selection("color_id"));
    }
    if let Some(Some(id)) = input.shape_id
        && repo.get_shape_by_id(id)?.is_none()
    {
        errors.add("shape_id", invalid_selection("shape_id"));
    }
    if let Some(sku) = input.sku.as_deref() {
        let existing = repo.get_product_by_sku(sku)?;
        check_unique(existing.map(|row| row.id), own_id, "sku", &mut errors);
    }

    Ok(errors)
}

fn invalid_selection(field: &str) -> String {
    format!("The selected {field} is invalid.")
}

/// Put every upload, rolling back the ones already stored if one fails.
fn store_images<S>(store: &S, uploads: [Option<ImageUpload>; 3]) -> ServiceResult<[Option<String>; 3]>
where
    S: ImageStore + ?Sized,
{
    let mut paths: [Option<String>; 3] = Default::default();

    for (index, upload) in uploads.into_iter().enumerate() {
        let Some(upload) = upload else {
            continue;
        };
        match store.put(&upload.bytes, upload.extension) {
            Ok(path) => paths[index] = Some(path),
            Err(err) => {
                log::error!("Failed to store product image: {err}");
                delete_quietly(store, &stored_paths(&paths));
                return Err(ServiceError::Storage(err));
            }
        }
    }

    Ok(paths)
}

fn stored_paths(paths: &[Option<String>; 3]) -> Vec<String> {
    paths.iter().flatten().cloned().collect()
}
