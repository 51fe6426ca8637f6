//! Integration tests for alert listing and status transitions.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_patient, get, patch_json, post_json, write_dataset};
use serde_json::json;
use sqlx::PgPool;

/// Import a dataset with one high, one medium and one quiet frame; return
/// the patient ID.
async fn seed_alerts(pool: &PgPool, base: &std::path::Path) -> i64 {
    write_dataset(
        base,
        "ds",
        &[("0.csv", "85\n"), ("1.csv", "65\n"), ("2.csv", "10\n")],
    );
    let patient_id = create_patient(pool, "Ada Byrne").await;
    let app = common::build_test_app(pool.clone(), base);
    let response = post_json(
        app,
        "/api/v1/admin/imports",
        json!({ "patient_id": patient_id, "dataset_folder": "ds" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    patient_id
}

async fn list_alerts(pool: &PgPool, base: &std::path::Path, uri: &str) -> Vec<serde_json::Value> {
    let app = common::build_test_app(pool.clone(), base);
    let response = get(app, uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].as_array().unwrap().clone()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn alerts_listed_newest_first(pool: PgPool) {
    let base = tempfile::tempdir().unwrap();
    let patient_id = seed_alerts(&pool, base.path()).await;

    let alerts = list_alerts(
        &pool,
        base.path(),
        &format!("/api/v1/patients/{patient_id}/alerts"),
    )
    .await;

    // Frame 1 is captured after frame 0.
    let severities: Vec<i64> = alerts.iter().map(|a| a["severity"].as_i64().unwrap()).collect();
    assert_eq!(severities, vec![2, 3]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn acknowledge_then_resolve(pool: PgPool) {
    let base = tempfile::tempdir().unwrap();
    let patient_id = seed_alerts(&pool, base.path()).await;
    let uri = format!("/api/v1/patients/{patient_id}/alerts");
    let alert_id = list_alerts(&pool, base.path(), &uri).await[0]["id"]
        .as_i64()
        .unwrap();

    let app = common::build_test_app(pool.clone(), base.path());
    let response = patch_json(
        app,
        &format!("/api/v1/alerts/{alert_id}/status"),
        json!({ "status": "acknowledged" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "acknowledged");

    let acked = list_alerts(&pool, base.path(), &format!("{uri}?status=acknowledged")).await;
    assert_eq!(acked.len(), 1);
    let open = list_alerts(&pool, base.path(), &format!("{uri}?status=new")).await;
    assert_eq!(open.len(), 1);

    let app = common::build_test_app(pool.clone(), base.path());
    let response = patch_json(
        app,
        &format!("/api/v1/alerts/{alert_id}/status"),
        json!({ "status": "resolved" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "resolved");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn backward_transition_is_a_conflict(pool: PgPool) {
    let base = tempfile::tempdir().unwrap();
    let patient_id = seed_alerts(&pool, base.path()).await;
    let alert_id = list_alerts(
        &pool,
        base.path(),
        &format!("/api/v1/patients/{patient_id}/alerts"),
    )
    .await[0]["id"]
        .as_i64()
        .unwrap();

    let app = common::build_test_app(pool.clone(), base.path());
    let response = patch_json(
        app,
        &format!("/api/v1/alerts/{alert_id}/status"),
        json!({ "status": "resolved" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool, base.path());
    let response = patch_json(
        app,
        &format!("/api/v1/alerts/{alert_id}/status"),
        json!({ "status": "acknowledged" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_alert_returns_404(pool: PgPool) {
    let base = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, base.path());
    let response = patch_json(
        app,
        "/api/v1/alerts/999/status",
        json!({ "status": "resolved" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
