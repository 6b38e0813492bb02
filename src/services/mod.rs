//! Business operations behind the HTTP handlers.
//!
//! Services are plain functions generic over the repository traits so they can
//! be exercised against mocks.

use thiserror::Error;

use crate::forms::FieldErrors;
use crate::repository::RepositoryError;
use crate::storage::StorageError;

pub mod categories;
pub mod colors;
pub mod product_types;
pub mod products;
pub mod shapes;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures reported by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed validation; every failing field is listed.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("resource not found")]
    NotFound,
    #[error("persistence failure: {0}")]
    Persistence(RepositoryError),
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl From<FieldErrors> for ServiceError {
    fn from(value: FieldErrors) -> Self {
        ServiceError::Validation(value)
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::NotFound,
            // The unique index caught a race the pre-check missed.
            RepositoryError::Conflict { field } => {
                let field = field.unwrap_or_else(|| "name".to_string());
                let message = taken_message(&field);
                ServiceError::Validation(FieldErrors::single(field, message))
            }
            RepositoryError::ForeignKey => ServiceError::Validation(FieldErrors::single(
                "relation",
                "The selected related record does not exist.",
            )),
            other => ServiceError::Persistence(other),
        }
    }
}

pub(crate) fn taken_message(field: &str) -> String {
    format!("The {field} has already been taken.")
}

/// Record a uniqueness error when `existing_id` belongs to another row.
pub(crate) fn check_unique(
    existing_id: Option<i32>,
    own_id: Option<i32>,
    field: &str,
    errors: &mut FieldErrors,
) {
    if let Some(existing) = existing_id
        && Some(existing) != own_id
    {
        errors.add(field, taken_message(field));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_become_field_errors() {
        let err = ServiceError::from(RepositoryError::Conflict {
            field: Some("sku".to_string()),
        });

        match err {
            ServiceError::Validation(errors) => {
                assert_eq!(errors.messages("sku"), ["The sku has already been taken.".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_rows_become_not_found() {
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
    }

    #[test]
    fn check_unique_ignores_own_row() {
        let mut errors = FieldErrors::new();

        check_unique(Some(4), Some(4), "name", &mut errors);
        check_unique(None, None, "name", &mut errors);
        assert!(errors.is_empty());

        check_unique(Some(4), Some(5), "name", &mut errors);
        assert!(errors.contains("name"));
    }
}
