#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use graphene_api::config::ServerConfig;
use graphene_api::router::build_app;
use graphene_api::state::AppState;
use graphene_core::pressure::config::IngestConfig;
use graphene_core::types::DbId;
use graphene_db::models::patient::CreatePatient;
use graphene_db::repositories::PatientRepo;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Ingest defaults with datasets read from `base_folder` at 1 frame/sec.
pub fn test_ingest_config(base_folder: &Path) -> IngestConfig {
    let mut ingest = IngestConfig::with_content_root(base_folder);
    ingest.base_folder = base_folder.to_path_buf();
    ingest.frame_rate = 1.0;
    ingest
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(pool: PgPool, base_folder: &Path) -> Router {
    build_test_app_with_shutdown(pool, base_folder, CancellationToken::new())
}

pub fn build_test_app_with_shutdown(
    pool: PgPool,
    base_folder: &Path,
    shutdown: CancellationToken,
) -> Router {
    let state = AppState::new(
        pool,
        test_config(),
        test_ingest_config(base_folder),
        shutdown,
    );
    build_app(state)
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PATCH, uri, body).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn create_patient(pool: &PgPool, name: &str) -> DbId {
    PatientRepo::create(
        pool,
        &CreatePatient {
            full_name: name.to_string(),
            external_user_id: None,
            date_of_birth: None,
            is_active: None,
        },
    )
    .await
    .unwrap()
    .id
}

/// Write a dataset folder with the given `(file name, contents)` pairs.
pub fn write_dataset(base: &Path, folder: &str, files: &[(&str, &str)]) {
    let dir = base.join(folder);
    std::fs::create_dir_all(&dir).unwrap();
    for (name, contents) in files {
        std::fs::write(dir.join(name), contents).unwrap();
    }
}
