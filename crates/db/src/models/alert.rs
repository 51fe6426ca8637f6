//! Alert entity model.

use graphene_core::pressure::alert::AlertStatus;
use graphene_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An `alerts` row joined with its status name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alert {
    pub id: DbId,
    pub patient_id: DbId,
    /// `None` once the triggering frame has been deleted.
    pub frame_id: Option<DbId>,
    pub triggered_at: Timestamp,
    /// 1 low, 2 medium, 3 high.
    pub severity: i16,
    pub peak_pressure: i32,
    pub pixels_above_threshold: i32,
    pub status: String,
    pub note: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Alert {
    pub fn alert_status(&self) -> Option<AlertStatus> {
        AlertStatus::parse(&self.status)
    }
}

/// DTO for changing an alert's status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAlertStatus {
    pub status: AlertStatus,
}
