//! Repository for the `pressure_frames` table.

use graphene_core::pressure::sink::NewFrame;
use graphene_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::frame::PressureFrame;

/// Column list for `pressure_frames` queries.
const COLUMNS: &str = "id, dataset_id, patient_id, frame_index, width, height, captured_at, \
     peak_pressure, pixels_above_threshold, contact_area_pct, created_at";

pub struct FrameRepo;

impl FrameRepo {
    /// Insert one frame, returning its ID.
    pub async fn insert(conn: &mut PgConnection, input: &NewFrame) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO pressure_frames \
                (dataset_id, patient_id, frame_index, width, height, captured_at, \
                 peak_pressure, pixels_above_threshold, contact_area_pct) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id",
        )
        .bind(input.dataset_id)
        .bind(input.patient_id)
        .bind(input.frame_index)
        .bind(input.width)
        .bind(input.height)
        .bind(input.captured_at)
        .bind(input.peak_pressure)
        .bind(input.pixels_above_threshold)
        .bind(input.contact_area_pct)
        .fetch_one(conn)
        .await
    }

    /// List the frames of a dataset in sequence order.
    pub async fn list_by_dataset(
        pool: &PgPool,
        dataset_id: DbId,
    ) -> Result<Vec<PressureFrame>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM pressure_frames \
             WHERE dataset_id = $1 \
             ORDER BY frame_index ASC"
        );
        sqlx::query_as::<_, PressureFrame>(&sql)
            .bind(dataset_id)
            .fetch_all(pool)
            .await
    }
}
