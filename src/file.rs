// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::config::options::{ExportOptions, RecordKind};
use crate::csv::{entity_rows, review_rows, to_export_string, ENTITY_HEADERS, REVIEW_HEADERS};
use crate::data::Record;
use crate::error::{Error, Result};
use crate::store;

/// Write `records` according to `export` (format, record kind, headers, path).
/// Returns the final path written to.
pub fn export_records(export: &ExportOptions, records: &[Record]) -> Result<PathBuf> {
    let path = export.out_path();

    match export.format.delim() {
        None => {
            store::write_records(&path, records)?;
        }
        Some(sep) => {
            ensure_parent(&path)?;
            let contents = match export.records {
                RecordKind::Reviews => to_export_string(
                    export.include_headers.then_some(&REVIEW_HEADERS),
                    &review_rows(records),
                    sep,
                ),
                RecordKind::Entities => to_export_string(
                    export.include_headers.then_some(&ENTITY_HEADERS),
                    &entity_rows(records),
                    sep,
                ),
            };
            fs::write(&path, contents).map_err(|e| Error::io(&path, e))?;
        }
    }

    info!(path = %path.display(), format = export.format.ext(), "exported {} records", records.len());
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() { return Ok(()); }
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Options(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?; }
    Ok(())
}

/// Ensure the parent directory of a file path exists.
pub fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) => ensure_directory(parent),
        None => Ok(()),
    }
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}
