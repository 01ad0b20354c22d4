use std::collections::BTreeMap;

use thiserror::Error;

/// Reason strings keyed by the request field they apply to.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("not found")]
    NotFound,
    #[error("validation failed: {0:?}")]
    Validation(FieldErrors),
    #[error("unauthorized")]
    Unauthorized,
    #[error("storage error: {0}")]
    StorageError(String),
    #[error("database error: {0}")]
    DatabaseError(String),
}

impl ApplicationError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        ApplicationError::Validation(errors)
    }
}
