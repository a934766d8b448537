// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};

use crate::config::consts::CSV_EXT;
use crate::core::sanitize::sanitize_filename;
use crate::error::Error;
use crate::store::DataSet;

pub fn ensure_directory(dir: &Path) -> Result<(), Error> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Config(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn ensure_parent(path: &Path) -> Result<(), Error> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

/// `<prefix>_<YYYYMMDD_HHMMSS>.csv`
pub fn timestamped_name(prefix: &str, at: DateTime<Local>) -> String {
    format!("{prefix}_{}.{CSV_EXT}", at.format("%Y%m%d_%H%M%S"))
}

/// One file per named table under `dir`. Names are sanitized ("Senior F" →
/// `Senior_F.csv`); empty tables are still written with their header.
pub fn write_segments(dir: &Path, segments: &[(String, DataSet)]) -> Result<Vec<PathBuf>, Error> {
    ensure_directory(dir)?;

    let mut written = Vec::with_capacity(segments.len());

    for (name, table) in segments {
        let path = dir.join(format!("{}.{CSV_EXT}", sanitize_filename(name, "segment")));
        table.save(&path)?;
        logd!("{name}: {} rows → {}", table.len(), path.display());
        written.push(path);
    }
    Ok(written)
}
