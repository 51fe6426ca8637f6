//! Read-only views over imported datasets and their frames.

use axum::extract::{Path, State};
use axum::Json;
use graphene_core::error::CoreError;
use graphene_core::types::DbId;
use graphene_db::models::dataset::PressureDataset;
use graphene_db::models::frame::PressureFrame;
use graphene_db::repositories::{DatasetRepo, FrameRepo, PatientRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/patients/{id}/datasets
pub async fn list_patient_datasets(
    State(state): State<AppState>,
    Path(patient_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<PressureDataset>>>> {
    ensure_patient(&state, patient_id).await?;
    let datasets = DatasetRepo::list_by_patient(&state.pool, patient_id).await?;
    Ok(Json(DataResponse { data: datasets }))
}

/// GET /api/v1/datasets/{id}/frames
///
/// Frames are returned in sequence order.
pub async fn list_dataset_frames(
    State(state): State<AppState>,
    Path(dataset_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<PressureFrame>>>> {
    DatasetRepo::find_by_id(&state.pool, dataset_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dataset",
            id: dataset_id,
        }))?;

    let frames = FrameRepo::list_by_dataset(&state.pool, dataset_id).await?;
    Ok(Json(DataResponse { data: frames }))
}

/// 404 unless the patient exists.
pub(crate) async fn ensure_patient(state: &AppState, patient_id: DbId) -> AppResult<()> {
    if PatientRepo::exists(&state.pool, patient_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id: patient_id,
        }))
    }
}
