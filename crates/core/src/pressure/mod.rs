//! Pressure-sensor ingest pipeline.
//!
//! A dataset is a flat folder of CSV files, one pressure matrix per file.
//! The [`importer::FrameImporter`] walks such a folder in file-name order,
//! reduces every matrix to [`metrics::FrameMetrics`], classifies the peak
//! against [`severity::SeverityThresholds`], and writes frames and alerts
//! through a [`sink::PressureSink`].

pub mod alert;
pub mod catalog;
pub mod config;
pub mod importer;
pub mod matrix;
pub mod memory;
pub mod metrics;
pub mod severity;
pub mod sink;

/// File extension (without the dot) recognised as a pressure frame.
pub const FRAME_FILE_EXTENSION: &str = "csv";

/// Returns `true` if `file_name` ends in `.csv` (ASCII case-insensitive).
///
/// A bare `.csv` counts too; it matches a `*.csv` pattern.
pub fn is_frame_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(FRAME_FILE_EXTENSION))
}
