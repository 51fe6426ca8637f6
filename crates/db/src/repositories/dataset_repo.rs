//! Repository for the `pressure_datasets` table.

use graphene_core::pressure::sink::NewDataset;
use graphene_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::dataset::PressureDataset;

/// Column list for `pressure_datasets` queries.
const COLUMNS: &str = "id, patient_id, file_path, file_hash, first_captured_at, \
     last_captured_at, imported_at, created_at, updated_at";

/// Provides insert and lookup operations for imported datasets.
pub struct DatasetRepo;

impl DatasetRepo {
    /// Insert a dataset with unset time bounds, returning its ID.
    pub async fn create(conn: &mut PgConnection, input: &NewDataset) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO pressure_datasets (patient_id, file_path, file_hash, imported_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(input.patient_id)
        .bind(&input.file_path)
        .bind(&input.file_hash)
        .bind(input.imported_at)
        .fetch_one(conn)
        .await
    }

    /// Set the first/last capture timestamps. Returns `false` if no row with
    /// `id` exists.
    pub async fn update_bounds(
        conn: &mut PgConnection,
        id: DbId,
        first: Timestamp,
        last: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE pressure_datasets SET first_captured_at = $2, last_captured_at = $3 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(first)
        .bind(last)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PressureDataset>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM pressure_datasets WHERE id = $1");
        sqlx::query_as::<_, PressureDataset>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a patient's datasets, most recent import first.
    pub async fn list_by_patient(
        pool: &PgPool,
        patient_id: DbId,
    ) -> Result<Vec<PressureDataset>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM pressure_datasets \
             WHERE patient_id = $1 \
             ORDER BY imported_at DESC, id DESC"
        );
        sqlx::query_as::<_, PressureDataset>(&sql)
            .bind(patient_id)
            .fetch_all(pool)
            .await
    }
}
