//! PostgreSQL implementation of the importer's storage seam.
//!
//! Each import runs inside one database transaction. Dropping a
//! [`PgImportTransaction`] without committing rolls it back.

use graphene_core::pressure::sink::{
    ImportTransaction, NewAlert, NewDataset, NewFrame, PressureSink,
};
use graphene_core::types::{DbId, Timestamp};
use sqlx::{PgPool, Postgres, Transaction};

use crate::repositories::{AlertRepo, DatasetRepo, FrameRepo, PatientRepo};

#[derive(Debug, thiserror::Error)]
pub enum PgSinkError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Dataset {0} vanished during import")]
    DatasetMissing(DbId),
}

/// [`PressureSink`] writing to the `pressure_*` and `alerts` tables.
#[derive(Debug, Clone)]
pub struct PgPressureSink {
    pool: PgPool,
}

impl PgPressureSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PressureSink for PgPressureSink {
    type Error = PgSinkError;
    type Transaction = PgImportTransaction;

    async fn patient_exists(&self, patient_id: DbId) -> Result<bool, Self::Error> {
        Ok(PatientRepo::exists(&self.pool, patient_id).await?)
    }

    async fn begin(&self) -> Result<Self::Transaction, Self::Error> {
        let tx = self.pool.begin().await?;
        Ok(PgImportTransaction { tx })
    }
}

/// An open import transaction.
#[derive(Debug)]
pub struct PgImportTransaction {
    tx: Transaction<'static, Postgres>,
}

impl ImportTransaction for PgImportTransaction {
    type Error = PgSinkError;

    async fn create_dataset(&mut self, dataset: &NewDataset) -> Result<DbId, Self::Error> {
        Ok(DatasetRepo::create(&mut self.tx, dataset).await?)
    }

    async fn append_frame(&mut self, frame: &NewFrame) -> Result<DbId, Self::Error> {
        Ok(FrameRepo::insert(&mut self.tx, frame).await?)
    }

    async fn append_alert(&mut self, alert: &NewAlert) -> Result<DbId, Self::Error> {
        Ok(AlertRepo::insert(&mut self.tx, alert).await?)
    }

    async fn update_dataset_bounds(
        &mut self,
        dataset_id: DbId,
        first: Timestamp,
        last: Timestamp,
    ) -> Result<(), Self::Error> {
        if DatasetRepo::update_bounds(&mut self.tx, dataset_id, first, last).await? {
            Ok(())
        } else {
            Err(PgSinkError::DatasetMissing(dataset_id))
        }
    }

    async fn commit(self) -> Result<(), Self::Error> {
        self.tx.commit().await?;
        Ok(())
    }
}
