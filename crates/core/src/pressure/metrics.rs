//! Per-frame aggregate metrics and the synthetic capture clock.

use chrono::Duration;

use crate::pressure::matrix::PressureMatrix;
use crate::types::Timestamp;

/// Summary of one pressure matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMetrics {
    pub width: usize,
    pub height: usize,
    /// Maximum cell value.
    pub peak_pressure: i32,
    /// Cells with a value at or above the pixel threshold.
    pub pixels_above_threshold: usize,
    /// `pixels_above_threshold * 100 / (width * height)`, unset for an empty matrix.
    pub contact_area_pct: Option<f64>,
}

impl FrameMetrics {
    /// Reduce a matrix. Returns `None` if the matrix holds no values, which
    /// the reader never produces.
    pub fn compute(matrix: &PressureMatrix, pixel_threshold: i32) -> Option<Self> {
        let peak_pressure = matrix.values.iter().copied().max()?;
        let pixels_above_threshold = matrix
            .values
            .iter()
            .filter(|&&v| v >= pixel_threshold)
            .count();
        let total = matrix.total_pixels();
        let contact_area_pct =
            (total > 0).then(|| pixels_above_threshold as f64 * 100.0 / total as f64);

        Some(Self {
            width: matrix.width,
            height: matrix.height,
            peak_pressure,
            pixels_above_threshold,
            contact_area_pct,
        })
    }
}

/// Capture time of frame `index`: `start + index / frame_rate` seconds.
///
/// `frame_rate` must be positive and at most
/// [`MAX_FRAME_RATE`](crate::pressure::config::MAX_FRAME_RATE); the result is
/// rounded to the nearest nanosecond.
pub fn captured_at(start: Timestamp, index: usize, frame_rate: f64) -> Timestamp {
    let offset_nanos = (index as f64 * 1_000_000_000.0 / frame_rate).round() as i64;
    start + Duration::nanoseconds(offset_nanos)
}
