//! Ingest configuration: where datasets live and how frames are scored.
//!
//! Every value has a fixed default. Missing or malformed values fall back to
//! that default with a warning rather than failing startup.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::pressure::severity::SeverityThresholds;

/// Subpath of the content root used when no base folder is configured.
pub const DEFAULT_BASE_SUBPATH: &str = "DataFiles/PressureCsv";
pub const DEFAULT_PIXEL_THRESHOLD: i32 = 50;
pub const DEFAULT_FRAME_RATE: f64 = 15.0;
/// Highest accepted frame rate. Frames must stay at least one microsecond
/// apart, the resolution timestamps are stored at.
pub const MAX_FRAME_RATE: f64 = 1_000_000.0;

pub const ENV_CONTENT_ROOT: &str = "CONTENT_ROOT";
pub const ENV_BASE_FOLDER: &str = "PRESSURE_BASE_FOLDER";
pub const ENV_THRESHOLD_LOW: &str = "PRESSURE_ALERT_THRESHOLD_LOW";
pub const ENV_THRESHOLD_MEDIUM: &str = "PRESSURE_ALERT_THRESHOLD_MEDIUM";
pub const ENV_THRESHOLD_HIGH: &str = "PRESSURE_ALERT_THRESHOLD_HIGH";
pub const ENV_PIXEL_THRESHOLD: &str = "PRESSURE_PIXEL_THRESHOLD";
pub const ENV_FRAME_RATE: &str = "PRESSURE_FRAME_RATE";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestConfig {
    /// Folder that contains one subfolder per dataset.
    pub base_folder: PathBuf,
    pub thresholds: SeverityThresholds,
    /// Cell value at or above which a pixel counts as in contact.
    pub pixel_threshold: i32,
    /// Frames per second of the synthetic capture clock.
    pub frame_rate: f64,
}

impl IngestConfig {
    /// Defaults rooted at `content_root`.
    pub fn with_content_root(content_root: &Path) -> Self {
        Self {
            base_folder: content_root.join(DEFAULT_BASE_SUBPATH),
            thresholds: SeverityThresholds::DEFAULT,
            pixel_threshold: DEFAULT_PIXEL_THRESHOLD,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }

    /// Load from environment variables.
    ///
    /// | Env Var                           | Default                                |
    /// |-----------------------------------|----------------------------------------|
    /// | `CONTENT_ROOT`                    | current directory                      |
    /// | `PRESSURE_BASE_FOLDER`            | `<content root>/DataFiles/PressureCsv` |
    /// | `PRESSURE_ALERT_THRESHOLD_LOW`    | `40`                                   |
    /// | `PRESSURE_ALERT_THRESHOLD_MEDIUM` | `60`                                   |
    /// | `PRESSURE_ALERT_THRESHOLD_HIGH`   | `80`                                   |
    /// | `PRESSURE_PIXEL_THRESHOLD`        | `50`                                   |
    /// | `PRESSURE_FRAME_RATE`             | `15` (at most `1000000`)               |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (environment, test map, ...).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let content_root = non_blank(lookup(ENV_CONTENT_ROOT))
            .map(PathBuf::from)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        let base_folder = resolve_base_folder(&content_root, lookup(ENV_BASE_FOLDER).as_deref());

        let thresholds = {
            let low = parse_or(&lookup, ENV_THRESHOLD_LOW, SeverityThresholds::DEFAULT.low);
            let medium = parse_or(&lookup, ENV_THRESHOLD_MEDIUM, SeverityThresholds::DEFAULT.medium);
            let high = parse_or(&lookup, ENV_THRESHOLD_HIGH, SeverityThresholds::DEFAULT.high);
            SeverityThresholds::new(low, medium, high).unwrap_or_else(|| {
                tracing::warn!(
                    low,
                    medium,
                    high,
                    "Alert thresholds are not strictly ascending, using defaults"
                );
                SeverityThresholds::DEFAULT
            })
        };

        let pixel_threshold = parse_or(&lookup, ENV_PIXEL_THRESHOLD, DEFAULT_PIXEL_THRESHOLD);

        let frame_rate = match parse_or(&lookup, ENV_FRAME_RATE, DEFAULT_FRAME_RATE) {
            fps if fps.is_finite() && fps > 0.0 && fps <= MAX_FRAME_RATE => fps,
            fps => {
                tracing::warn!(
                    fps,
                    max = MAX_FRAME_RATE,
                    "Frame rate must be positive and at most the maximum, using default"
                );
                DEFAULT_FRAME_RATE
            }
        };

        Self {
            base_folder,
            thresholds,
            pixel_threshold,
            frame_rate,
        }
    }

    /// Full path of a dataset folder under the base folder.
    pub fn dataset_path(&self, dataset_folder: &str) -> PathBuf {
        self.base_folder.join(dataset_folder)
    }
}

/// Resolve the configured base folder against the content root.
///
/// Absolute values are used as-is, relative values are joined to the
/// content root, and blank or missing values fall back to
/// [`DEFAULT_BASE_SUBPATH`].
pub fn resolve_base_folder(content_root: &Path, configured: Option<&str>) -> PathBuf {
    match configured.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => {
            let path = Path::new(value);
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                content_root.join(path)
            }
        }
        None => content_root.join(DEFAULT_BASE_SUBPATH),
    }
}

/// Check that a dataset folder name names a direct child of the base folder.
pub fn validate_folder_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Dataset folder name must not be empty".to_string());
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(|c: char| c == '/' || c == '\\') => Ok(()),
        _ => Err(format!(
            "Dataset folder name '{name}' must be a single folder name"
        )),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    match non_blank(lookup(key)) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, %default, "Invalid configuration value, using default");
            default
        }),
    }
}
