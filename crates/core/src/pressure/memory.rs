//! In-process [`PressureSink`] backed by vectors behind a mutex.
//!
//! Writes are buffered per transaction and applied under a single lock on
//! commit, so readers never observe a half-imported dataset. Ids come from
//! one shared counter; ids handed out to a rolled-back transaction are not
//! reused.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::pressure::sink::{ImportTransaction, NewAlert, NewDataset, NewFrame, PressureSink};
use crate::types::{DbId, Timestamp};

#[derive(Debug, thiserror::Error)]
pub enum MemorySinkError {
    #[error("Dataset {0} does not exist")]
    UnknownDataset(DbId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredDataset {
    pub id: DbId,
    pub dataset: NewDataset,
    pub first_captured_at: Option<Timestamp>,
    pub last_captured_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredFrame {
    pub id: DbId,
    pub frame: NewFrame,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredAlert {
    pub id: DbId,
    pub alert: NewAlert,
}

/// Everything committed to an [`InMemorySink`] so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySnapshot {
    pub datasets: Vec<StoredDataset>,
    pub frames: Vec<StoredFrame>,
    pub alerts: Vec<StoredAlert>,
}

#[derive(Debug, Default)]
struct MemoryState {
    patients: BTreeSet<DbId>,
    committed: MemorySnapshot,
    next_id: DbId,
}

impl MemoryState {
    fn allocate_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySink {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that already knows the given patients.
    pub fn with_patients(patients: impl IntoIterator<Item = DbId>) -> Self {
        let state = MemoryState {
            patients: patients.into_iter().collect(),
            ..MemoryState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub async fn add_patient(&self, patient_id: DbId) {
        self.state.lock().await.patients.insert(patient_id);
    }

    /// Copy of all committed records.
    pub async fn snapshot(&self) -> MemorySnapshot {
        self.state.lock().await.committed.clone()
    }
}

impl PressureSink for InMemorySink {
    type Error = MemorySinkError;
    type Transaction = MemoryTransaction;

    async fn patient_exists(&self, patient_id: DbId) -> Result<bool, Self::Error> {
        Ok(self.state.lock().await.patients.contains(&patient_id))
    }

    async fn begin(&self) -> Result<Self::Transaction, Self::Error> {
        Ok(MemoryTransaction {
            state: Arc::clone(&self.state),
            pending: MemorySnapshot::default(),
        })
    }
}

/// Buffered writes of one import. Dropping it discards them.
#[derive(Debug)]
pub struct MemoryTransaction {
    state: Arc<Mutex<MemoryState>>,
    pending: MemorySnapshot,
}

impl ImportTransaction for MemoryTransaction {
    type Error = MemorySinkError;

    async fn create_dataset(&mut self, dataset: &NewDataset) -> Result<DbId, Self::Error> {
        let id = self.state.lock().await.allocate_id();
        self.pending.datasets.push(StoredDataset {
            id,
            dataset: dataset.clone(),
            first_captured_at: None,
            last_captured_at: None,
        });
        Ok(id)
    }

    async fn append_frame(&mut self, frame: &NewFrame) -> Result<DbId, Self::Error> {
        let id = self.state.lock().await.allocate_id();
        self.pending.frames.push(StoredFrame {
            id,
            frame: frame.clone(),
        });
        Ok(id)
    }

    async fn append_alert(&mut self, alert: &NewAlert) -> Result<DbId, Self::Error> {
        let id = self.state.lock().await.allocate_id();
        self.pending.alerts.push(StoredAlert {
            id,
            alert: alert.clone(),
        });
        Ok(id)
    }

    async fn update_dataset_bounds(
        &mut self,
        dataset_id: DbId,
        first: Timestamp,
        last: Timestamp,
    ) -> Result<(), Self::Error> {
        let dataset = self
            .pending
            .datasets
            .iter_mut()
            .find(|d| d.id == dataset_id)
            .ok_or(MemorySinkError::UnknownDataset(dataset_id))?;
        dataset.first_captured_at = Some(first);
        dataset.last_captured_at = Some(last);
        Ok(())
    }

    async fn commit(self) -> Result<(), Self::Error> {
        let mut state = self.state.lock().await;
        let MemorySnapshot {
            datasets,
            frames,
            alerts,
        } = self.pending;
        state.committed.datasets.extend(datasets);
        state.committed.frames.extend(frames);
        state.committed.alerts.extend(alerts);
        Ok(())
    }
}
