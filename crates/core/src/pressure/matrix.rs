//! CSV pressure-matrix reader.
//!
//! One file holds one frame: each non-blank line is a row of integers
//! separated by `,`, `;` or tab. The first row fixes the width and every
//! other row must match it exactly.

use std::path::{Path, PathBuf};

/// Characters accepted as field separators.
const FIELD_SEPARATORS: &[char] = &[',', ';', '\t'];

/// A rectangular integer matrix read from one CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PressureMatrix {
    pub width: usize,
    pub height: usize,
    /// Row-major cell values, `width * height` long.
    pub values: Vec<i32>,
}

impl PressureMatrix {
    pub fn total_pixels(&self) -> usize {
        self.width * self.height
    }
}

/// Why a frame file could not be turned into a matrix.
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV file {} is empty", .path.display())]
    Empty { path: PathBuf },

    #[error("Inconsistent column count in {}. Expected {expected}, got {actual}", .path.display())]
    InconsistentColumns {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("Non-numeric value '{token}' in {}", .path.display())]
    NonNumeric { path: PathBuf, token: String },
}

/// Read and parse the matrix stored at `path`.
///
/// The file handle is opened, drained and closed before this returns.
pub async fn read_matrix(path: &Path) -> Result<PressureMatrix, MatrixError> {
    let bytes = read_frame_bytes(path).await?;
    parse_matrix_bytes(path, &bytes)
}

/// Read the raw contents of a frame file.
pub async fn read_frame_bytes(path: &Path) -> Result<Vec<u8>, MatrixError> {
    tokio::fs::read(path).await.map_err(|source| MatrixError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse raw file bytes.
///
/// Invalid UTF-8 sequences decode to U+FFFD, so a damaged cell is reported
/// as a non-numeric value naming the file.
pub fn parse_matrix_bytes(path: &Path, bytes: &[u8]) -> Result<PressureMatrix, MatrixError> {
    parse_matrix(path, &String::from_utf8_lossy(bytes))
}

/// Parse CSV text into a matrix. `path` is only used for error messages.
pub fn parse_matrix(path: &Path, contents: &str) -> Result<PressureMatrix, MatrixError> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    let mut rows = contents.lines().filter(|line| !line.trim().is_empty());

    let first = rows.next().ok_or_else(|| MatrixError::Empty {
        path: path.to_path_buf(),
    })?;

    let mut values = Vec::new();
    let width = push_row(path, first, None, &mut values)?;
    let mut height = 1;

    for line in rows {
        push_row(path, line, Some(width), &mut values)?;
        height += 1;
    }

    Ok(PressureMatrix {
        width,
        height,
        values,
    })
}

/// Parse one line into `out`, returning its field count.
fn push_row(
    path: &Path,
    line: &str,
    expected: Option<usize>,
    out: &mut Vec<i32>,
) -> Result<usize, MatrixError> {
    let fields: Vec<&str> = line
        .split(FIELD_SEPARATORS)
        .filter(|field| !field.is_empty())
        .collect();

    if let Some(expected) = expected {
        if fields.len() != expected {
            return Err(MatrixError::InconsistentColumns {
                path: path.to_path_buf(),
                expected,
                actual: fields.len(),
            });
        }
    }

    out.reserve(fields.len());
    for field in &fields {
        let value = field
            .trim()
            .parse::<i32>()
            .map_err(|_| MatrixError::NonNumeric {
                path: path.to_path_buf(),
                token: (*field).to_string(),
            })?;
        out.push(value);
    }
    Ok(fields.len())
}
