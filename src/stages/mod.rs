//! File-level drivers: each stage reads the previous stage's output from disk,
//! runs one processor over it and writes its own output.

pub mod concat;
pub mod features;
pub mod merge_weather;
pub mod pipeline;
pub mod sort;
pub mod split;

pub use concat::concat_directory;
pub use features::add_time_features;
pub use merge_weather::merge_weather;
pub use pipeline::{run_pipeline, StageSelection};
pub use sort::sort_directory;
pub use split::split_traffic;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::Result;
use crate::models::Header;
use crate::utils::constants::GROUP_FILE_EXTENSION;

/// Counts describing one stage run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageReport {
    pub stage: &'static str,
    pub files_read: usize,
    pub files_written: usize,
    pub rows_read: usize,
    pub rows_written: usize,
    /// Rows dropped for staleness or missing columns
    pub rows_skipped: usize,
    /// Groups dropped whole because their station had no weather
    pub groups_skipped: usize,
}

impl StageReport {
    pub fn new(stage: &'static str) -> Self {
        Self {
            stage,
            ..Self::default()
        }
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{}: {} files read, {} files written, {} rows read, {} rows written",
            self.stage, self.files_read, self.files_written, self.rows_read, self.rows_written
        );
        if self.rows_skipped > 0 {
            summary.push_str(&format!(", {} rows skipped", self.rows_skipped));
        }
        if self.groups_skipped > 0 {
            summary.push_str(&format!(", {} groups skipped", self.groups_skipped));
        }
        summary
    }
}

/// Regular `*.csv` files directly inside `dir`, sorted by path
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(GROUP_FILE_EXTENSION)
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Log every required column the header lacks; lookups then fall back to column 0
pub(crate) fn warn_missing_columns(header: &Header, required: &[&str], path: &Path) {
    for column in header.missing(required) {
        warn!(
            column,
            file = %path.display(),
            "required column not found, falling back to the first column"
        );
    }
}
