//! Route definitions for dataset import administration.
//!
//! Mounted at `/admin`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::imports;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /imports                -> import_dataset
/// GET    /datasets/available     -> list_available_datasets
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/imports", post(imports::import_dataset))
        .route("/datasets/available", get(imports::list_available_datasets))
}
