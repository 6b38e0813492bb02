use crate::domain::category::Category;
use crate::domain::product::ProductRelation;
use crate::domain::{ReferenceListQuery, WithProducts};
use crate::forms::FieldErrors;
use crate::forms::categories::{CreateCategoryForm, UpdateCategoryForm};
use crate::repository::{CategoryReader, CategoryWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult, check_unique};
use crate::storage::{ImageStore, delete_quietly};

/// Lists categories ordered by id.
pub fn list_categories<R>(repo: &R, query: ReferenceListQuery) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader + ?Sized,
{
    Ok(repo.list_categories(query)?)
}

/// Loads a category with the live products filed under it.
pub fn show_category<R>(repo: &R, id: i32) -> ServiceResult<WithProducts<Category>>
where
    R: CategoryReader + ProductReader + ?Sized,
{
    let category = repo.get_category_by_id(id)?.ok_or(ServiceError::NotFound)?;
    let products = repo.list_products_by_relation(ProductRelation::Category(id))?;

    Ok(WithProducts::new(category, products))
}

/// Creates a category. Both the name and the (possibly derived) slug must be
/// unused.
pub fn create_category<R>(repo: &R, form: CreateCategoryForm) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    let mut store_errors = FieldErrors::new();
    if let Some(name) = form.normalized_name() {
        let existing = repo.get_category_by_name(&name)?;
        check_unique(existing.map(|row| row.id), None, "name", &mut store_errors);
    }
    if let Some(slug) = form.resolved_slug() {
        let existing = repo.get_category_by_slug(&slug)?;
        check_unique(existing.map(|row| row.id), None, "slug", &mut store_errors);
    }

    let new_category = FieldErrors::finish(form.into_new_category(), store_errors)?;

    let created = repo.create_category(&new_category)?;
    log::info!("Created category {} ({})", created.id, created.slug);
    Ok(created)
}

/// Applies a partial update. A cleared slug is re-derived from the name.
pub fn update_category<R>(repo: &R, id: i32, form: UpdateCategoryForm) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    let current = repo.get_category_by_id(id)?.ok_or(ServiceError::NotFound)?;

    let mut store_errors = FieldErrors::new();
    if let Some(name) = form.normalized_name() {
        let existing = repo.get_category_by_name(&name)?;
        check_unique(existing.map(|row| row.id), Some(id), "name", &mut store_errors);
    }
    if let Some(slug) = form.resolved_slug(&current.name) {
        let existing = repo.get_category_by_slug(&slug)?;
        check_unique(existing.map(|row| row.id), Some(id), "slug", &mut store_errors);
    }

    let update = FieldErrors::finish(form.into_update_category(&current.name), store_errors)?;

    Ok(repo.update_category(id, &update)?)
}

/// Deletes a category together with its products and their stored images.
pub fn delete_category<R, S>(repo: &R, store: &S, id: i32) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
    S: ImageStore + ?Sized,
{
    let orphaned = repo.delete_category(id)?;
    delete_quietly(store, &orphaned);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use mockall::predicate::eq;

    use super::*;
    use crate::repository::mock::MockCategoryRepo;
    use crate::storage::{MockImageStore, StorageError};

    fn category(id: i32, name: &str, slug: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            is_active: true,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn create_rejects_duplicate_name() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_get_category_by_name()
            .with(eq("Rings"))
            .returning(|name| Ok(Some(category(3, name, "rings"))));
        repo.expect_get_category_by_slug()
            .with(eq("fine-rings"))
            .returning(|_| Ok(None));
        repo.expect_create_category().never();

        let form = CreateCategoryForm {
            name: Some("  Rings ".to_string()),
            slug: Some("fine-rings".to_string()),
            ..Default::default()
        };

        match create_category(&repo, form) {
            Err(ServiceError::Validation(errors)) => {
                assert!(errors.contains("name"));
                assert!(!errors.contains("slug"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn create_checks_derived_slug() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_get_category_by_name().returning(|_| Ok(None));
        repo.expect_get_category_by_slug()
            .with(eq("loose-stones"))
            .returning(|slug| Ok(Some(category(9, "Stones", slug))));
        repo.expect_create_category().never();

        let form = CreateCategoryForm {
            name: Some("Loose Stones".to_string()),
            ..Default::default()
        };

        match create_category(&repo, form) {
            Err(ServiceError::Validation(errors)) => {
                assert!(errors.contains("slug"));
                assert!(!errors.contains("name"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn create_stores_derived_slug() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_get_category_by_name().returning(|_| Ok(None));
        repo.expect_get_category_by_slug().returning(|_| Ok(None));
        repo.expect_create_category()
            .withf(|new_category| new_category.slug == "bracelets")
            .returning(|new_category| Ok(category(4, &new_category.name, &new_category.slug)));

        let form = CreateCategoryForm {
            name: Some("Bracelets".to_string()),
            ..Default::default()
        };

        assert_eq!(create_category(&repo, form).expect("created").slug, "bracelets");
    }

    #[test]
    fn update_rederives_slug_from_current_name() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_get_category_by_id()
            .with(eq(2))
            .returning(|id| Ok(Some(category(id, "Necklaces", "old-slug"))));
        repo.expect_get_category_by_slug()
            .with(eq("necklaces"))
            .returning(|_| Ok(None));
        repo.expect_update_category()
            .withf(|_, update| update.slug.as_deref() == Some("necklaces"))
            .returning(|id, _| Ok(category(id, "Necklaces", "necklaces")));

        let form = UpdateCategoryForm {
            slug: Some(None),
            ..Default::default()
        };

        assert_eq!(update_category(&repo, 2, form).expect("updated").slug, "necklaces");
    }

    #[test]
    fn delete_ignores_blob_failures() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_delete_category()
            .returning(|_| Ok(vec!["products/x.gif".to_string()]));
        let mut store = MockImageStore::new();
        store
            .expect_delete()
            .returning(|path| Err(StorageError::InvalidPath(path.to_string())));

        assert!(delete_category(&repo, &store, 1).is_ok());
    }
}
