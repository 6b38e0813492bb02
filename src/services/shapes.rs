use crate::domain::product::ProductRelation;
use crate::domain::shape::Shape;
use crate::domain::{ReferenceListQuery, WithProducts};
use crate::forms::FieldErrors;
use crate::forms::shapes::{CreateShapeForm, UpdateShapeForm};
use crate::repository::{ProductReader, ShapeReader, ShapeWriter};
use crate::services::{ServiceError, ServiceResult, check_unique};

pub fn list_shapes<R>(repo: &R, query: ReferenceListQuery) -> ServiceResult<Vec<Shape>>
where
    R: ShapeReader + ?Sized,
{
    Ok(repo.list_shapes(query)?)
}

pub fn show_shape<R>(repo: &R, id: i32) -> ServiceResult<WithProducts<Shape>>
where
    R: ShapeReader + ProductReader + ?Sized,
{
    let shape = repo.get_shape_by_id(id)?.ok_or(ServiceError::NotFound)?;
    let products = repo.list_products_by_relation(ProductRelation::Shape(id))?;

    Ok(WithProducts::new(shape, products))
}

pub fn create_shape<R>(repo: &R, form: CreateShapeForm) -> ServiceResult<Shape>
where
    R: ShapeReader + ShapeWriter + ?Sized,
{
    let mut store_errors = FieldErrors::new();
    if let Some(name) = form.normalized_name() {
        let existing = repo.get_shape_by_name(&name)?;
        check_unique(existing.map(|row| row.id), None, "name", &mut store_errors);
    }

    let new_shape = FieldErrors::finish(form.into_new_shape(), store_errors)?;

    Ok(repo.create_shape(&new_shape)?)
}

pub fn update_shape<R>(repo: &R, id: i32, form: UpdateShapeForm) -> ServiceResult<Shape>
where
    R: ShapeReader + ShapeWriter + ?Sized,
{
    repo.get_shape_by_id(id)?.ok_or(ServiceError::NotFound)?;

    let mut store_errors = FieldErrors::new();
    if let Some(name) = form.normalized_name() {
        let existing = repo.get_shape_by_name(&name)?;
        check_unique(existing.map(|row| row.id), Some(id), "name", &mut store_errors);
    }

    let update = FieldErrors::finish(form.into_update_shape(), store_errors)?;

    Ok(repo.update_shape(id, &update)?)
}

/// Deletes a shape; products that used it keep existing without a shape.
pub fn delete_shape<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: ShapeWriter + ?Sized,
{
    repo.delete_shape(id)?;
    log::info!("Deleted shape {id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use mockall::predicate::eq;

    use super::*;
    use crate::repository::mock::MockShapeRepo;

    fn shape(id: i32, name: &str) -> Shape {
        Shape {
            id,
            name: name.to_string(),
            description: Some(format!("{name} shape")),
            is_active: true,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn show_attaches_related_products() {
        let mut repo = MockShapeRepo::new();
        repo.expect_get_shape_by_id()
            .with(eq(4))
            .returning(|id| Ok(Some(shape(id, "Marquise"))));
        repo.expect_list_products_by_relation()
            .with(eq(ProductRelation::Shape(4)))
            .returning(|_| Ok(Vec::new()));

        let shown = show_shape(&repo, 4).expect("shape");

        assert_eq!(shown.entity.name, "Marquise");
        assert!(shown.products.is_empty());
    }

    #[test]
    fn update_rejects_name_of_another_shape() {
        let mut repo = MockShapeRepo::new();
        repo.expect_get_shape_by_id()
            .returning(|id| Ok(Some(shape(id, "Oval"))));
        repo.expect_get_shape_by_name()
            .with(eq("Pear"))
            .returning(|name| Ok(Some(shape(6, name))));
        repo.expect_update_shape().never();

        let form = UpdateShapeForm {
            name: Some("Pear".to_string()),
            ..Default::default()
        };

        match update_shape(&repo, 2, form) {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors.messages("name"), ["The name has already been taken.".to_string()]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn create_reports_store_and_form_errors_together() {
        let mut repo = MockShapeRepo::new();
        repo.expect_get_shape_by_name()
            .returning(|name| Ok(Some(shape(1, name))));

        let form = CreateShapeForm {
            name: Some("Round".to_string()),
            is_active: Some(crate::forms::FlagValue::Text("often".to_string())),
            ..Default::default()
        };

        match create_shape(&repo, form) {
            Err(ServiceError::Validation(errors)) => {
                assert!(errors.contains("name"));
                assert!(errors.contains("is_active"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
