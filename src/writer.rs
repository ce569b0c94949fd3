use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::WriteError;

pub fn file_name(date: NaiveDate) -> String {
    format!("{}-rss-summaries.org", date.format("%Y-%m-%d"))
}

/// Write `contents` to the dated file under `dir`, creating `dir` if needed.
/// An existing file for the same day is replaced.
pub fn write_document(dir: &Path, date: NaiveDate, contents: &str) -> Result<PathBuf, WriteError> {
    std::fs::create_dir_all(dir).map_err(|source| WriteError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(file_name(date));
    std::fs::write(&path, contents).map_err(|source| WriteError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}
