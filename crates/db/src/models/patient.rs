//! Patient entity model and DTOs.

use chrono::NaiveDate;
use graphene_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `patients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Patient {
    pub id: DbId,
    pub full_name: String,
    pub external_user_id: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new patient.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePatient {
    pub full_name: String,
    pub external_user_id: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}
