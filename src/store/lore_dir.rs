//! Lore directory loading
//!
//! A lore directory holds one YAML record per file, nested to any depth.
//! A file without a `name_id` takes its file stem.

use std::path::{Path, PathBuf};

use lore_types::Record;
use tracing::{debug, info, warn};

use super::RecordStore;
use crate::error::StoreError;

/// Outcome of importing a lore directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// `name_id`s stored by this import
    pub inserted: Vec<String>,
    /// `name_id`s already present in the store
    pub skipped: Vec<String>,
    /// Files that could not be read or parsed
    pub failed: Vec<PathBuf>,
}

/// Import every record file under `dir` into `store`.
///
/// Records are taken as written; no linking happens here. Existing
/// `name_id`s are left untouched.
pub async fn import_lore_dir<S>(dir: &Path, store: &S) -> Result<ImportSummary, StoreError>
where
    S: RecordStore + ?Sized,
{
    let mut summary = ImportSummary::default();

    for path in lore_paths(dir)? {
        let record = match read_lore_file(&path) {
            Ok(record) => record,
            Err(e) => {
                warn!(path = ?path, error = %e, "Failed to load lore file");
                summary.failed.push(path);
                continue;
            }
        };

        if store.find_by_name_id(&record.name_id).await?.is_some() {
            debug!(name_id = %record.name_id, "Record already exists, skipping");
            summary.skipped.push(record.name_id);
            continue;
        }

        let name_id = record.name_id.clone();
        let id = store.insert(record).await?;
        debug!(%id, name_id = %name_id, "Imported record");
        summary.inserted.push(name_id);
    }

    info!(
        inserted = summary.inserted.len(),
        skipped = summary.skipped.len(),
        failed = summary.failed.len(),
        "Lore directory imported"
    );
    Ok(summary)
}

/// Read every record file under `dir`, in path order.
///
/// Files that fail to parse are logged and left out.
pub fn read_lore_dir(dir: &Path) -> Result<Vec<Record>, StoreError> {
    let mut records = Vec::new();
    for path in lore_paths(dir)? {
        match read_lore_file(&path) {
            Ok(record) => records.push(record),
            Err(e) => warn!(path = ?path, error = %e, "Failed to load lore file"),
        }
    }
    Ok(records)
}

/// Read a single record file
pub fn read_lore_file(path: &Path) -> Result<Record, StoreError> {
    let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut record: Record = serde_yaml::from_str(&content).map_err(|source| StoreError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    if record.name_id.is_empty() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            record.name_id = stem.to_string();
        }
    }

    Ok(record)
}

/// Write `record` to `<dir>/<name_id>.yaml`, creating `dir` if needed
pub fn write_lore_file(dir: &Path, record: &Record) -> Result<PathBuf, StoreError> {
    std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(format!("{}.yaml", record.name_id));
    let content = serde_yaml::to_string(record).map_err(|source| StoreError::Yaml {
        path: path.clone(),
        source,
    })?;

    std::fs::write(&path, content).map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// All `.yaml`/`.yml` files under `dir`, sorted
fn lore_paths(dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let mut paths = Vec::new();
    collect_recursive(dir, &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn collect_recursive(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<(), StoreError> {
    let io_err = |source: std::io::Error| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    };

    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();

        if path.is_dir() {
            collect_recursive(&path, paths)?;
        } else if path
            .extension()
            .map(|e| e == "yaml" || e == "yml")
            .unwrap_or(false)
        {
            paths.push(path);
        }
    }
    Ok(())
}
