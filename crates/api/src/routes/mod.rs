pub mod admin;
pub mod alerts;
pub mod datasets;
pub mod health;
pub mod patients;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/imports                  import a dataset folder (POST)
/// /admin/datasets/available       dataset folders on disk
///
/// /patients/{id}/datasets         imported datasets of a patient
/// /patients/{id}/alerts           alerts of a patient (?status=)
///
/// /datasets/{id}/frames           frames of a dataset, in sequence order
///
/// /alerts/{id}/status             acknowledge / resolve (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/admin", admin::router())
        .nest("/patients", patients::router())
        .nest("/datasets", datasets::router())
        .nest("/alerts", alerts::router())
}
