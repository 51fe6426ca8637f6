//! Handlers for dataset import (admin).
//!
//! Imports run inside the request. The server's shutdown token is passed
//! down as a child token so a shutdown stops the import between files and
//! rolls it back.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use graphene_core::pressure::catalog::{list_datasets, DatasetEntry};
use graphene_core::pressure::importer::{ImportRequest, ImportSummary};
use graphene_core::types::DbId;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/imports`.
#[derive(Debug, Deserialize, Validate)]
pub struct ImportBody {
    #[validate(range(min = 1, message = "patient_id must be positive"))]
    pub patient_id: DbId,
    #[validate(length(min = 1, max = 255, message = "dataset_folder must be 1-255 characters"))]
    pub dataset_folder: String,
}

// ── Import ───────────────────────────────────────────────────────────

/// POST /api/v1/admin/imports
///
/// Import every CSV frame of a dataset folder for a patient.
pub async fn import_dataset(
    State(state): State<AppState>,
    Json(body): Json<ImportBody>,
) -> AppResult<(StatusCode, Json<DataResponse<ImportSummary>>)> {
    body.validate()?;

    let request = ImportRequest {
        patient_id: body.patient_id,
        dataset_folder: body.dataset_folder,
    };
    let cancel = state.shutdown.child_token();

    let summary = state
        .importer
        .import_dataset(&request, &cancel)
        .await
        .inspect_err(|err| {
            tracing::warn!(
                patient_id = request.patient_id,
                dataset_folder = %request.dataset_folder,
                error = %err,
                "Dataset import failed"
            );
        })?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: summary })))
}

// ── Browse ───────────────────────────────────────────────────────────

/// GET /api/v1/admin/datasets/available
///
/// List dataset folders under the configured base folder with their CSV
/// counts.
pub async fn list_available_datasets(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<DatasetEntry>>>> {
    let base_folder = &state.ingest_config().base_folder;
    let datasets = list_datasets(base_folder).await.map_err(|e| {
        AppError::InternalError(format!(
            "Failed to list datasets in {}: {e}",
            base_folder.display()
        ))
    })?;

    Ok(Json(DataResponse { data: datasets }))
}
