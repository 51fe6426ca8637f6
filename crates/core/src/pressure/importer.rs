//! Dataset import: CSV folder in, frames and alerts out.
//!
//! An import runs in two phases. The scan phase reads every frame file in
//! order, one open file at a time, and keeps only the per-frame metrics.
//! The write phase opens a single sink transaction and commits frames,
//! alerts and dataset bounds together. A failure in either phase leaves the
//! sink untouched.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::hashing::ContentHasher;
use crate::pressure::alert::import_alert_note;
use crate::pressure::catalog::{list_frame_files, FrameFile};
use crate::pressure::config::{validate_folder_name, IngestConfig};
use crate::pressure::matrix::{parse_matrix_bytes, read_frame_bytes, MatrixError};
use crate::pressure::metrics::{captured_at, FrameMetrics};
use crate::pressure::severity::SeverityTier;
use crate::pressure::sink::{ImportTransaction, NewAlert, NewDataset, NewFrame, PressureSink};
use crate::types::{DbId, Timestamp};

/// Who and what to import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    pub patient_id: DbId,
    /// Folder name relative to the configured base folder.
    pub dataset_folder: String,
}

/// Outcome of a successful import.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSummary {
    pub dataset_id: DbId,
    /// Zero for an existing but empty dataset folder.
    pub frames_imported: usize,
    pub alerts_raised: usize,
    pub first_captured_at: Option<Timestamp>,
    pub last_captured_at: Option<Timestamp>,
    pub content_hash: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Invalid dataset folder: {0}")]
    InvalidFolderName(String),

    #[error("Dataset folder not found: {}", .path.display())]
    DatasetNotFound { path: PathBuf },

    #[error("No patient with ID {patient_id}.")]
    PatientNotFound { patient_id: DbId },

    #[error(transparent)]
    DataFormat(#[from] MatrixError),

    #[error("Failed to list dataset folder {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Import cancelled")]
    Cancelled,

    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ImportError {
    fn storage<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// One frame reduced during the scan phase.
#[derive(Debug, Clone)]
struct ScannedFrame {
    index: usize,
    metrics: FrameMetrics,
    captured_at: Timestamp,
    severity: Option<SeverityTier>,
}

/// Imports dataset folders into a [`PressureSink`].
#[derive(Debug, Clone)]
pub struct FrameImporter<S> {
    sink: S,
    config: IngestConfig,
}

impl<S: PressureSink> FrameImporter<S> {
    pub fn new(sink: S, config: IngestConfig) -> Self {
        Self { sink, config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Import every frame file of `request.dataset_folder` for `request.patient_id`.
    ///
    /// `cancel` is checked before each file is read and once more before
    /// anything is written.
    pub async fn import_dataset(
        &self,
        request: &ImportRequest,
        cancel: &CancellationToken,
    ) -> Result<ImportSummary, ImportError> {
        validate_folder_name(&request.dataset_folder).map_err(ImportError::InvalidFolderName)?;

        let dataset_path = self.config.dataset_path(&request.dataset_folder);
        if !is_directory(&dataset_path).await {
            return Err(ImportError::DatasetNotFound { path: dataset_path });
        }

        if !self
            .sink
            .patient_exists(request.patient_id)
            .await
            .map_err(ImportError::storage)?
        {
            return Err(ImportError::PatientNotFound {
                patient_id: request.patient_id,
            });
        }

        let files = list_frame_files(&dataset_path)
            .await
            .map_err(|source| ImportError::Io {
                path: dataset_path.clone(),
                source,
            })?;
        if files.is_empty() {
            tracing::warn!(
                folder = %dataset_path.display(),
                "No CSV files found in dataset folder"
            );
        }

        let started_at = Utc::now();
        let (frames, content_hash) = self.scan(&files, started_at, cancel).await?;

        if cancel.is_cancelled() {
            return Err(ImportError::Cancelled);
        }

        let summary = self
            .write(request, &dataset_path, started_at, &frames, content_hash)
            .await?;

        tracing::info!(
            patient_id = request.patient_id,
            dataset_folder = %request.dataset_folder,
            dataset_id = summary.dataset_id,
            frames = summary.frames_imported,
            alerts = summary.alerts_raised,
            "Imported pressure dataset"
        );

        Ok(summary)
    }

    /// Read and reduce every frame file, in order.
    async fn scan(
        &self,
        files: &[FrameFile],
        started_at: Timestamp,
        cancel: &CancellationToken,
    ) -> Result<(Vec<ScannedFrame>, String), ImportError> {
        let mut hasher = ContentHasher::new();
        let mut frames = Vec::with_capacity(files.len());

        for (index, file) in files.iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::info!(frames_read = index, "Import cancelled between files");
                return Err(ImportError::Cancelled);
            }

            let bytes = read_frame_bytes(&file.path).await?;
            hasher.update(&file.file_name, &bytes);
            let matrix = parse_matrix_bytes(&file.path, &bytes)?;

            let metrics = FrameMetrics::compute(&matrix, self.config.pixel_threshold)
                .ok_or_else(|| MatrixError::Empty {
                    path: file.path.clone(),
                })?;
            let severity = self.config.thresholds.classify(metrics.peak_pressure);

            tracing::debug!(
                index,
                file = %file.file_name,
                peak = metrics.peak_pressure,
                pixels_above = metrics.pixels_above_threshold,
                severity = severity.map_or(0, SeverityTier::level),
                "Scanned frame"
            );

            frames.push(ScannedFrame {
                index,
                metrics,
                captured_at: captured_at(started_at, index, self.config.frame_rate),
                severity,
            });
        }

        Ok((frames, hasher.finish_hex()))
    }

    /// Persist the scanned frames in one transaction.
    async fn write(
        &self,
        request: &ImportRequest,
        dataset_path: &Path,
        started_at: Timestamp,
        frames: &[ScannedFrame],
        content_hash: String,
    ) -> Result<ImportSummary, ImportError> {
        let mut tx = self.sink.begin().await.map_err(ImportError::storage)?;

        let dataset_id = tx
            .create_dataset(&NewDataset {
                patient_id: request.patient_id,
                file_path: dataset_path.to_string_lossy().into_owned(),
                file_hash: Some(content_hash.clone()),
                imported_at: started_at,
            })
            .await
            .map_err(ImportError::storage)?;

        let mut alerts_raised = 0;
        for frame in frames {
            let metrics = &frame.metrics;
            let frame_id = tx
                .append_frame(&NewFrame {
                    dataset_id,
                    patient_id: request.patient_id,
                    frame_index: saturating_i32(frame.index),
                    width: saturating_i32(metrics.width),
                    height: saturating_i32(metrics.height),
                    captured_at: frame.captured_at,
                    peak_pressure: metrics.peak_pressure,
                    pixels_above_threshold: saturating_i32(metrics.pixels_above_threshold),
                    contact_area_pct: metrics.contact_area_pct,
                })
                .await
                .map_err(ImportError::storage)?;

            if let Some(severity) = frame.severity {
                tx.append_alert(&NewAlert {
                    patient_id: request.patient_id,
                    frame_id: Some(frame_id),
                    triggered_at: frame.captured_at,
                    severity,
                    peak_pressure: metrics.peak_pressure,
                    pixels_above_threshold: saturating_i32(metrics.pixels_above_threshold),
                    note: import_alert_note(&request.dataset_folder, frame.index),
                })
                .await
                .map_err(ImportError::storage)?;
                alerts_raised += 1;
            }
        }

        let first_captured_at = frames.first().map(|f| f.captured_at);
        let last_captured_at = frames.last().map(|f| f.captured_at);
        if let (Some(first), Some(last)) = (first_captured_at, last_captured_at) {
            tx.update_dataset_bounds(dataset_id, first, last)
                .await
                .map_err(ImportError::storage)?;
        }

        tx.commit().await.map_err(ImportError::storage)?;

        Ok(ImportSummary {
            dataset_id,
            frames_imported: frames.len(),
            alerts_raised,
            first_captured_at,
            last_captured_at,
            content_hash,
        })
    }
}

async fn is_directory(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

fn saturating_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
