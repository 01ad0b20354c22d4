use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::{
    adapters::dto::file_dto::ErrorResponse,
    application::error::{ApplicationError, FieldErrors},
};

pub const STORAGE_FIELD: &str = "storage";

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApplicationError::NotFound => {
                warn!("Resource not found");
                (StatusCode::NOT_FOUND, ErrorResponse::new("Not found"))
            }
            ApplicationError::Validation(errors) => {
                warn!("Validation failed: {:?}", errors);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_errors("Validation failed", errors),
                )
            }
            ApplicationError::Unauthorized => {
                warn!("Unauthorized access attempt");
                return (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, "Basic realm=\"File Admin\"")],
                    Json(ErrorResponse::new("Unauthorized")),
                )
                    .into_response();
            }
            ApplicationError::StorageError(ref msg) => {
                error!("Storage provider error: {}", msg);
                let mut errors = FieldErrors::new();
                errors.insert(
                    STORAGE_FIELD.to_string(),
                    vec!["Upload to storage provider failed".to_string()],
                );
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::with_errors("Upload failed", errors),
                )
            }
            ApplicationError::DatabaseError(ref msg) => {
                error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
