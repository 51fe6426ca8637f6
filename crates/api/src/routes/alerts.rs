use axum::routing::patch;
use axum::Router;

use crate::handlers::alerts;
use crate::state::AppState;

/// Routes mounted at `/alerts`.
///
/// ```text
/// PATCH  /{id}/status     -> update_alert_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/status", patch(alerts::update_alert_status))
}
