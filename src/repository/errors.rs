use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failures surfaced by the persistence layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    /// A unique index rejected the write; `field` is the offending column when known.
    #[error("duplicate value for {}", .field.as_deref().unwrap_or("unknown column"))]
    Conflict { field: Option<String> },
    #[error("foreign key constraint violated")]
    ForeignKey,
    #[error("database error: {0}")]
    Database(DieselError),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

impl From<DieselError> for RepositoryError {
    fn from(value: DieselError) -> Self {
        match value {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                RepositoryError::Conflict {
                    field: unique_violation_column(info.message()),
                }
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                RepositoryError::ForeignKey
            }
            other => RepositoryError::Database(other),
        }
    }
}

/// Extract the column from SQLite's `UNIQUE constraint failed: table.column`.
fn unique_violation_column(message: &str) -> Option<String> {
    let (_, columns) = message.split_once("constraint failed:")?;
    let first = columns.split(',').next()?.trim();
    let column = first.rsplit('.').next()?.trim();
    (!column.is_empty()).then(|| column.to_string())
}
