use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

/// `<prefix>_<yyyyMMdd_HHmmss>.txt`
pub fn report_file_name(prefix: &str, taken_at: &NaiveDateTime) -> String {
    format!("{}_{}.txt", prefix, taken_at.format("%Y%m%d_%H%M%S"))
}

/// Persist the rendered table verbatim and return the written path.
pub fn write_report(dir: &Path, file_name: &str, table: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);
    fs::write(&path, table)
        .with_context(|| format!("failed writing audit report {}", path.display()))?;
    Ok(path)
}
