//! Storage seam for the importer.
//!
//! A [`PressureSink`] answers patient lookups and opens an
//! [`ImportTransaction`]. Everything written through a transaction becomes
//! visible only after [`ImportTransaction::commit`]; dropping the
//! transaction discards it. Identity generation belongs to the sink.

use std::future::Future;

use serde::Serialize;

use crate::pressure::severity::SeverityTier;
use crate::types::{DbId, Timestamp};

/// Dataset row written at the start of an import.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDataset {
    pub patient_id: DbId,
    /// Resolved dataset folder path.
    pub file_path: String,
    /// Content hash of the dataset's frames.
    pub file_hash: Option<String>,
    pub imported_at: Timestamp,
}

/// One frame's metadata and metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewFrame {
    pub dataset_id: DbId,
    pub patient_id: DbId,
    pub frame_index: i32,
    pub width: i32,
    pub height: i32,
    pub captured_at: Timestamp,
    pub peak_pressure: i32,
    pub pixels_above_threshold: i32,
    pub contact_area_pct: Option<f64>,
}

/// An alert raised by a frame. Alerts are always created in status `new`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAlert {
    pub patient_id: DbId,
    /// Weak reference to the triggering frame.
    pub frame_id: Option<DbId>,
    pub triggered_at: Timestamp,
    pub severity: SeverityTier,
    pub peak_pressure: i32,
    pub pixels_above_threshold: i32,
    pub note: String,
}

/// Storage consumed by [`FrameImporter`](crate::pressure::importer::FrameImporter).
pub trait PressureSink: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;
    type Transaction: ImportTransaction<Error = Self::Error>;

    /// Whether `patient_id` refers to an existing patient.
    fn patient_exists(
        &self,
        patient_id: DbId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Open a unit of work for one dataset import.
    fn begin(&self) -> impl Future<Output = Result<Self::Transaction, Self::Error>> + Send;
}

/// All-or-nothing write scope for one import.
pub trait ImportTransaction: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    fn create_dataset(
        &mut self,
        dataset: &NewDataset,
    ) -> impl Future<Output = Result<DbId, Self::Error>> + Send;

    fn append_frame(
        &mut self,
        frame: &NewFrame,
    ) -> impl Future<Output = Result<DbId, Self::Error>> + Send;

    fn append_alert(
        &mut self,
        alert: &NewAlert,
    ) -> impl Future<Output = Result<DbId, Self::Error>> + Send;

    /// Set the first/last capture timestamps of a dataset.
    fn update_dataset_bounds(
        &mut self,
        dataset_id: DbId,
        first: Timestamp,
        last: Timestamp,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Make every write of this transaction durable.
    fn commit(self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
