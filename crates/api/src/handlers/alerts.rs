//! Handlers for listing alerts and moving them through their lifecycle.

use axum::extract::{Path, Query, State};
use axum::Json;
use graphene_core::error::CoreError;
use graphene_core::pressure::alert::{validate_transition, AlertStatus};
use graphene_core::types::DbId;
use graphene_db::models::alert::{Alert, UpdateAlertStatus};
use graphene_db::repositories::AlertRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::datasets::ensure_patient;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the alert listing.
#[derive(Debug, Deserialize)]
pub struct AlertListParams {
    pub status: Option<AlertStatus>,
}

/// GET /api/v1/patients/{id}/alerts
///
/// Newest first, optionally filtered with `?status=new|acknowledged|resolved`.
pub async fn list_patient_alerts(
    State(state): State<AppState>,
    Path(patient_id): Path<DbId>,
    Query(params): Query<AlertListParams>,
) -> AppResult<Json<DataResponse<Vec<Alert>>>> {
    ensure_patient(&state, patient_id).await?;
    let alerts = AlertRepo::list_by_patient(&state.pool, patient_id, params.status).await?;
    Ok(Json(DataResponse { data: alerts }))
}

/// PATCH /api/v1/alerts/{id}/status
///
/// Acknowledge or resolve an alert. Backward moves are rejected with 409.
pub async fn update_alert_status(
    State(state): State<AppState>,
    Path(alert_id): Path<DbId>,
    Json(body): Json<UpdateAlertStatus>,
) -> AppResult<Json<DataResponse<Alert>>> {
    let alert = AlertRepo::find_by_id(&state.pool, alert_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Alert",
            id: alert_id,
        }))?;

    let current = alert.alert_status().ok_or_else(|| {
        AppError::InternalError(format!(
            "Alert {alert_id} has unknown status '{}'",
            alert.status
        ))
    })?;
    validate_transition(current, body.status)?;

    let updated = AlertRepo::update_status(&state.pool, alert_id, current, body.status)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Alert {alert_id} was changed by another request"
            )))
        })?;

    tracing::info!(
        alert_id,
        from = %current,
        to = %body.status,
        "Alert status updated"
    );

    Ok(Json(DataResponse { data: updated }))
}
