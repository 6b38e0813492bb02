use crate::domain::product::ProductRelation;
use crate::domain::product_type::ProductType;
use crate::domain::{ReferenceListQuery, WithProducts};
use crate::forms::FieldErrors;
use crate::forms::product_types::{CreateProductTypeForm, UpdateProductTypeForm};
use crate::repository::{ProductReader, ProductTypeReader, ProductTypeWriter};
use crate::services::{ServiceError, ServiceResult, check_unique};
use crate::storage::{ImageStore, delete_quietly};

/// Lists product types ordered by id.
pub fn list_product_types<R>(repo: &R, query: ReferenceListQuery) -> ServiceResult<Vec<ProductType>>
where
    R: ProductTypeReader + ?Sized,
{
    Ok(repo.list_product_types(query)?)
}

/// Loads a product type together with its live products.
pub fn show_product_type<R>(repo: &R, id: i32) -> ServiceResult<WithProducts<ProductType>>
where
    R: ProductTypeReader + ProductReader + ?Sized,
{
    let product_type = repo
        .get_product_type_by_id(id)?
        .ok_or(ServiceError::NotFound)?;
    let products = repo.list_products_by_relation(ProductRelation::ProductType(id))?;

    Ok(WithProducts::new(product_type, products))
}

/// Creates a product type after checking that the name is free.
pub fn create_product_type<R>(repo: &R, form: CreateProductTypeForm) -> ServiceResult<ProductType>
where
    R: ProductTypeReader + ProductTypeWriter + ?Sized,
{
    let mut store_errors = FieldErrors::new();
    if let Some(name) = form.normalized_name() {
        let existing = repo.get_product_type_by_name(&name)?;
        check_unique(existing.map(|row| row.id), None, "name", &mut store_errors);
    }

    let new_type = FieldErrors::finish(form.into_new_product_type(), store_errors)?;

    let created = repo.create_product_type(&new_type)?;
    log::info!("Created product type {} ({})", created.id, created.name);
    Ok(created)
}

/// Applies a partial update to an existing product type.
pub fn update_product_type<R>(
    repo: &R,
    id: i32,
    form: UpdateProductTypeForm,
) -> ServiceResult<ProductType>
where
    R: ProductTypeReader + ProductTypeWriter + ?Sized,
{
    if repo.get_product_type_by_id(id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let mut store_errors = FieldErrors::new();
    if let Some(name) = form.normalized_name() {
        let existing = repo.get_product_type_by_name(&name)?;
        check_unique(existing.map(|row| row.id), Some(id), "name", &mut store_errors);
    }

    let update = FieldErrors::finish(form.into_update_product_type(), store_errors)?;

    Ok(repo.update_product_type(id, &update)?)
}

/// Deletes a product type. Its products go with it, so their images are
/// removed from storage afterwards.
pub fn delete_product_type<R, S>(repo: &R, store: &S, id: i32) -> ServiceResult<()>
where
    R: ProductTypeWriter + ?Sized,
    S: ImageStore + ?Sized,
{
    let orphaned = repo.delete_product_type(id)?;
    if !orphaned.is_empty() {
        log::info!(
            "Product type {id} deleted; removing {} cascaded images",
            orphaned.len()
        );
    }
    delete_quietly(store, &orphaned);
    Ok(())
}
