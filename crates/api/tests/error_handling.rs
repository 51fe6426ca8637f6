//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! database is needed.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use graphene_api::error::AppError;
use graphene_core::error::CoreError;
use graphene_core::pressure::importer::ImportError;
use graphene_core::pressure::matrix::MatrixError;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Patient",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Patient with id 42 not found");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("stale status".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "stale status");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("connection string leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Import errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dataset_not_found_returns_404() {
    let err = AppError::Import(ImportError::DatasetNotFound {
        path: PathBuf::from("/data/missing"),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "DATASET_NOT_FOUND");
    assert_eq!(json["error"], "Dataset folder not found: /data/missing");
}

#[tokio::test]
async fn patient_not_found_returns_422() {
    let err = AppError::Import(ImportError::PatientNotFound { patient_id: 9 });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "PATIENT_NOT_FOUND");
    assert_eq!(json["error"], "No patient with ID 9.");
}

#[tokio::test]
async fn data_format_error_keeps_file_details() {
    let err = AppError::Import(ImportError::DataFormat(MatrixError::NonNumeric {
        path: PathBuf::from("/data/ds/f1.csv"),
        token: "abc".to_string(),
    }));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "DATA_FORMAT_ERROR");
    assert_eq!(json["error"], "Non-numeric value 'abc' in /data/ds/f1.csv");
}

#[tokio::test]
async fn unreadable_file_keeps_path_in_message() {
    let err = AppError::Import(ImportError::DataFormat(MatrixError::Io {
        path: PathBuf::from("/data/ds/f1.csv"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
    }));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "DATA_READ_ERROR");
    assert_eq!(json["error"], "Failed to read /data/ds/f1.csv: permission denied");
}

#[tokio::test]
async fn unlistable_folder_keeps_path_in_message() {
    let err = AppError::Import(ImportError::Io {
        path: PathBuf::from("/data/ds"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "dangling link"),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "DATA_READ_ERROR");
    assert_eq!(json["error"], "Failed to list dataset folder /data/ds: dangling link");
}

#[tokio::test]
async fn storage_error_is_sanitized() {
    let err = AppError::Import(ImportError::Storage(Box::new(std::io::Error::other(
        "password=hunter2",
    ))));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn invalid_folder_name_returns_400() {
    let err = AppError::Import(ImportError::InvalidFolderName(
        "Dataset folder name '..' must be a single folder name".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn cancelled_import_returns_503() {
    let (status, json) = error_to_response(AppError::Import(ImportError::Cancelled)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "IMPORT_CANCELLED");
}
