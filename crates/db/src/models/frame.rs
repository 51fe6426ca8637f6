use graphene_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `pressure_frames` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PressureFrame {
    pub id: DbId,
    pub dataset_id: DbId,
    pub patient_id: DbId,
    pub frame_index: i32,
    pub width: i32,
    pub height: i32,
    pub captured_at: Timestamp,
    pub peak_pressure: i32,
    pub pixels_above_threshold: i32,
    pub contact_area_pct: Option<f64>,
    pub created_at: Timestamp,
}
