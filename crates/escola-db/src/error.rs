//! Store errors.

use anyhow::anyhow;
use uuid::Uuid;

use escola_core::AppError;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// A unique column already holds the value.
    #[error("{entity} with {field} `{value}` already exists")]
    Duplicate {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// The student already has an enrollment.
    #[error("student is already enrolled in class {class_id}")]
    AlreadyEnrolled { class_id: Uuid },

    #[error("database query failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("invalid store configuration: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Maps unique-constraint violations to [`StoreError::Duplicate`].
    pub(crate) fn from_insert(
        err: sqlx::Error,
        entity: &'static str,
        field: &'static str,
        value: &str,
    ) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::Duplicate {
                entity,
                field,
                value: value.to_string(),
            },
            _ => StoreError::Database(err),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { value, .. } => {
                AppError::bad_request(anyhow!("{} já está cadastrado", value))
            }
            StoreError::AlreadyEnrolled { .. } => {
                AppError::bad_request(anyhow!("O aluno já está cadastrado em uma turma"))
            }
            other => AppError::database(other),
        }
    }
}
