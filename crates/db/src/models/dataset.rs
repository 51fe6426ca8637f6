//! Pressure dataset entity model.
//!
//! Datasets are only ever created by the importer, through
//! [`PgImportTransaction`](crate::sink::PgImportTransaction).

use graphene_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `pressure_datasets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PressureDataset {
    pub id: DbId,
    pub patient_id: DbId,
    pub file_path: String,
    pub file_hash: Option<String>,
    /// Unset until the import has written at least one frame.
    pub first_captured_at: Option<Timestamp>,
    pub last_captured_at: Option<Timestamp>,
    pub imported_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
