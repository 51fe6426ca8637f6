use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use graphene_core::error::CoreError;
use graphene_core::pressure::importer::ImportError;
use graphene_core::pressure::matrix::MatrixError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`ImportError`] for domain errors and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce consistent
/// JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `graphene_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failed dataset import.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            },

            // --- Import errors ---
            AppError::Import(err) => classify_import_error(err),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => internal(msg),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal(detail: &dyn std::fmt::Display) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %detail, "Internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify an import failure.
///
/// Every import failure except storage keeps its message, including the
/// offending file path, so the operator can fix the input on disk. Storage
/// failures are logged and sanitized.
fn classify_import_error(err: &ImportError) -> (StatusCode, &'static str, String) {
    match err {
        ImportError::InvalidFolderName(msg) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
        }
        ImportError::DatasetNotFound { .. } => {
            (StatusCode::NOT_FOUND, "DATASET_NOT_FOUND", err.to_string())
        }
        ImportError::PatientNotFound { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "PATIENT_NOT_FOUND",
            err.to_string(),
        ),
        ImportError::DataFormat(MatrixError::Io { .. }) | ImportError::Io { .. } => {
            tracing::error!(error = %err, "Failed to read dataset");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATA_READ_ERROR",
                err.to_string(),
            )
        }
        ImportError::DataFormat(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "DATA_FORMAT_ERROR",
            err.to_string(),
        ),
        ImportError::Cancelled => (
            StatusCode::SERVICE_UNAVAILABLE,
            "IMPORT_CANCELLED",
            "Import cancelled because the server is shutting down".to_string(),
        ),
        ImportError::Storage(_) => internal(err),
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            internal(db_err)
        }
        other => internal(other),
    }
}
