//! Repository for the `patients` table.

use graphene_core::types::DbId;
use sqlx::PgPool;

use crate::models::patient::{CreatePatient, Patient};

/// Column list for `patients` queries.
const COLUMNS: &str =
    "id, full_name, external_user_id, date_of_birth, is_active, created_at, updated_at";

pub struct PatientRepo;

impl PatientRepo {
    /// Insert a new patient, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePatient) -> Result<Patient, sqlx::Error> {
        let sql = format!(
            "INSERT INTO patients (full_name, external_user_id, date_of_birth, is_active) \
             VALUES ($1, $2, $3, COALESCE($4, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&sql)
            .bind(&input.full_name)
            .bind(&input.external_user_id)
            .bind(input.date_of_birth)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Patient>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM patients WHERE id = $1");
        sqlx::query_as::<_, Patient>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a patient row with `id` exists. Inactive patients count.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM patients WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
