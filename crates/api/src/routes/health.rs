//! Liveness endpoint, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when every dependency answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the configured dataset base folder is a readable directory.
    pub datasets_available: bool,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = graphene_db::health_check(&state.pool).await.is_ok();
    let datasets_available = tokio::fs::read_dir(&state.ingest_config().base_folder)
        .await
        .is_ok();

    if !datasets_available {
        tracing::warn!(
            base_folder = %state.ingest_config().base_folder.display(),
            "Dataset base folder is not readable"
        );
    }

    Json(HealthResponse {
        status: if db_healthy && datasets_available {
            "ok"
        } else {
            "degraded"
        },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        datasets_available,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
