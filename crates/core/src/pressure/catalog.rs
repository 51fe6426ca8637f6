//! Listing of dataset folders and the frame files inside them.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::pressure::is_frame_file;

/// A frame file inside a dataset folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameFile {
    pub file_name: String,
    pub path: PathBuf,
}

/// A dataset folder available for import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetEntry {
    pub name: String,
    pub frame_files: usize,
}

/// List the frame files directly inside `dir`, sorted byte-wise by file name.
///
/// The order is what assigns frame indices, so it must not depend on the
/// order the OS returns directory entries in. Symlinks are followed;
/// subdirectories are ignored. A `.csv` entry whose target cannot be read
/// is an error rather than a silently missing frame.
pub async fn list_frame_files(dir: &Path) -> std::io::Result<Vec<FrameFile>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        // Non UTF-8 names cannot be recorded in notes; skip them.
        let Ok(file_name) = entry.file_name().into_string() else {
            continue;
        };
        if !is_frame_file(&file_name) {
            continue;
        }
        let path = entry.path();
        if tokio::fs::metadata(&path).await?.is_file() {
            files.push(FrameFile { file_name, path });
        }
    }

    files.sort_by(|a, b| a.file_name.as_bytes().cmp(b.file_name.as_bytes()));
    Ok(files)
}

/// List dataset folders under `base_folder`, sorted by name.
///
/// A missing base folder yields an empty list.
pub async fn list_datasets(base_folder: &Path) -> std::io::Result<Vec<DatasetEntry>> {
    let mut entries = match tokio::fs::read_dir(base_folder).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut datasets = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        // Follows symlinks, like the importer's own folder check. Dangling
        // links are not datasets.
        match tokio::fs::metadata(entry.path()).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => continue,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e),
        }
        let frame_files = list_frame_files(&entry.path()).await?.len();
        datasets.push(DatasetEntry { name, frame_files });
    }

    datasets.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(datasets)
}
