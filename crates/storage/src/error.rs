use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Exercise not found")]
    NotFound,

    #[error("Invalid exercise id: {0}")]
    InvalidId(String),

    #[error("Exercise validation failed: {}", describe_validation(.0))]
    Validation(#[from] ValidationErrors),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// True for failures of the backing database itself, as opposed to
    /// problems with the request.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Database(_) | StorageError::Migration(_))
    }
}

/// Flattens field errors into `field: message` pairs, sorted by field name.
pub fn describe_validation(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                format!(
                    "{}: {}",
                    field,
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                )
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}
