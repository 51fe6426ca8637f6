use axum::routing::get;
use axum::Router;

use crate::handlers::{alerts, datasets};
use crate::state::AppState;

/// Routes mounted at `/patients`.
///
/// ```text
/// GET    /{id}/datasets   -> list_patient_datasets
/// GET    /{id}/alerts     -> list_patient_alerts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/datasets", get(datasets::list_patient_datasets))
        .route("/{id}/alerts", get(alerts::list_patient_alerts))
}
