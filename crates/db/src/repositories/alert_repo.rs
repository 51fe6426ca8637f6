//! Repository for the `alerts` table.
//!
//! Status is stored as a foreign key into `alert_statuses` and read and
//! written by name.

use graphene_core::pressure::alert::{AlertStatus, ALERT_STATUS_NEW};
use graphene_core::pressure::sink::NewAlert;
use graphene_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::alert::Alert;

/// Column list for alert queries, aliased over `alerts a JOIN alert_statuses s`.
const COLUMNS: &str = "a.id, a.patient_id, a.frame_id, a.triggered_at, a.severity, \
     a.peak_pressure, a.pixels_above_threshold, s.name AS status, a.note, \
     a.created_at, a.updated_at";

/// Provides insert, listing and status updates for alerts.
pub struct AlertRepo;

impl AlertRepo {
    /// Insert an alert in status `new`, returning its ID.
    pub async fn insert(conn: &mut PgConnection, input: &NewAlert) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO alerts \
                (patient_id, frame_id, triggered_at, severity, peak_pressure, \
                 pixels_above_threshold, status_id, note) \
             VALUES ($1, $2, $3, $4, $5, $6, \
                (SELECT id FROM alert_statuses WHERE name = $7), $8) \
             RETURNING id",
        )
        .bind(input.patient_id)
        .bind(input.frame_id)
        .bind(input.triggered_at)
        .bind(input.severity.level())
        .bind(input.peak_pressure)
        .bind(input.pixels_above_threshold)
        .bind(ALERT_STATUS_NEW)
        .bind(&input.note)
        .fetch_one(conn)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Alert>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM alerts a \
             JOIN alert_statuses s ON s.id = a.status_id \
             WHERE a.id = $1"
        );
        sqlx::query_as::<_, Alert>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a patient's alerts, newest first, optionally filtered by status.
    pub async fn list_by_patient(
        pool: &PgPool,
        patient_id: DbId,
        status: Option<AlertStatus>,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM alerts a \
             JOIN alert_statuses s ON s.id = a.status_id \
             WHERE a.patient_id = $1 \
               AND ($2::TEXT IS NULL OR s.name = $2) \
             ORDER BY a.triggered_at DESC, a.id DESC"
        );
        sqlx::query_as::<_, Alert>(&sql)
            .bind(patient_id)
            .bind(status.map(AlertStatus::as_str))
            .fetch_all(pool)
            .await
    }

    /// Move an alert from `from` to `to`.
    ///
    /// The update only applies while the alert is still in `from`, so a
    /// concurrent change makes this return `None` instead of overwriting it.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        from: AlertStatus,
        to: AlertStatus,
    ) -> Result<Option<Alert>, sqlx::Error> {
        let sql = format!(
            "WITH updated AS ( \
                UPDATE alerts SET \
                    status_id = (SELECT id FROM alert_statuses WHERE name = $3) \
                WHERE id = $1 \
                  AND status_id = (SELECT id FROM alert_statuses WHERE name = $2) \
                RETURNING * \
             ) \
             SELECT {COLUMNS} FROM updated a \
             JOIN alert_statuses s ON s.id = a.status_id"
        );
        sqlx::query_as::<_, Alert>(&sql)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(pool)
            .await
    }
}
