use axum::routing::get;
use axum::Router;

use crate::handlers::datasets;
use crate::state::AppState;

/// Routes mounted at `/datasets`.
///
/// ```text
/// GET    /{id}/frames     -> list_dataset_frames
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/frames", get(datasets::list_dataset_frames))
}
