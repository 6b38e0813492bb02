use crate::domain::color::Color;
use crate::domain::product::ProductRelation;
use crate::domain::{ReferenceListQuery, WithProducts};
use crate::forms::FieldErrors;
use crate::forms::colors::{CreateColorForm, UpdateColorForm};
use crate::repository::{ColorReader, ColorWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult, check_unique};

/// Lists colors, optionally restricted by their active flag.
pub fn list_colors<R>(repo: &R, query: ReferenceListQuery) -> ServiceResult<Vec<Color>>
where
    R: ColorReader + ?Sized,
{
    Ok(repo.list_colors(query)?)
}

/// Loads a color and the live products using it.
pub fn show_color<R>(repo: &R, id: i32) -> ServiceResult<WithProducts<Color>>
where
    R: ColorReader + ProductReader + ?Sized,
{
    let color = repo.get_color_by_id(id)?.ok_or(ServiceError::NotFound)?;
    let products = repo.list_products_by_relation(ProductRelation::Color(id))?;

    Ok(WithProducts::new(color, products))
}

/// Creates a color; names are unique.
pub fn create_color<R>(repo: &R, form: CreateColorForm) -> ServiceResult<Color>
where
    R: ColorReader + ColorWriter + ?Sized,
{
    let mut store_errors = FieldErrors::new();
    if let Some(name) = form.normalized_name() {
        let existing = repo.get_color_by_name(&name)?;
        check_unique(existing.map(|row| row.id), None, "name", &mut store_errors);
    }

    let new_color = FieldErrors::finish(form.into_new_color(), store_errors)?;

    Ok(repo.create_color(&new_color)?)
}

/// Updates a color in place.
pub fn update_color<R>(repo: &R, id: i32, form: UpdateColorForm) -> ServiceResult<Color>
where
    R: ColorReader + ColorWriter + ?Sized,
{
    repo.get_color_by_id(id)?.ok_or(ServiceError::NotFound)?;

    let mut store_errors = FieldErrors::new();
    if let Some(name) = form.normalized_name() {
        let existing = repo.get_color_by_name(&name)?;
        check_unique(existing.map(|row| row.id), Some(id), "name", &mut store_errors);
    }

    let update = FieldErrors::finish(form.into_update_color(), store_errors)?;

    Ok(repo.update_color(id, &update)?)
}

/// Deletes a color; products pointing at it have `color_id` cleared.
pub fn delete_color<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: ColorWriter + ?Sized,
{
    repo.delete_color(id)?;
    Ok(())
}
