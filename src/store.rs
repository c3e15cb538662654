// src/store.rs
//
// JSON Lines record store: one record per line, flat field maps. This is the
// hand-off format for the downstream labeling/preprocessing tools.

use std::{
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::data::Record;
use crate::error::{Error, Result};
use crate::file::ensure_parent;

/// Create/truncate `path` and write `records`.
pub fn write_records(path: &Path, records: &[Record]) -> Result<usize> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    write_lines(path, file, records)
}

/// Append `records` to `path`, creating it if needed.
pub fn append_records(path: &Path, records: &[Record]) -> Result<usize> {
    ensure_parent(path)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;
    write_lines(path, file, records)
}

fn write_lines(path: &Path, file: File, records: &[Record]) -> Result<usize> {
    let mut out = BufWriter::new(file);
    for r in records {
        serde_json::to_writer(&mut out, r)?;
        out.write_all(b"\n").map_err(|e| Error::io(path, e))?;
    }
    out.flush().map_err(|e| Error::io(path, e))?;
    Ok(records.len())
}

/// Read every record back. Blank lines are skipped; a bad line is an error
/// naming its 1-based line number.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut out = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| Error::io(path, e))?;
        if line.trim().is_empty() { continue; }
        let rec = serde_json::from_str(&line).map_err(|source| Error::Record {
            path: path.to_path_buf(),
            line: i + 1,
            source,
        })?;
        out.push(rec);
    }
    Ok(out)
}
