use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::{ProcessingError, Result};
use crate::models::TimestampColumns;
use crate::processors::TemporalSorter;
use crate::readers::TableReader;
use crate::stages::{list_csv_files, warn_missing_columns, StageReport};
use crate::utils::ProgressReporter;
use crate::writers::TableWriter;

/// Sort every per-segment file in `input_dir` by time into `output_dir`,
/// keeping file names and headers.
pub fn sort_directory(
    input_dir: &Path,
    output_dir: &Path,
    config: &PipelineConfig,
    progress: Option<&ProgressReporter>,
) -> Result<StageReport> {
    let mut report = StageReport::new("sort");
    fs::create_dir_all(output_dir)?;

    let files = list_csv_files(input_dir)?;
    info!(files = files.len(), dir = %input_dir.display(), "found files to sort");

    if let Some(progress) = progress {
        progress.set_length(files.len() as u64);
        progress.set_message("Sorting segment files by time...");
    }

    let reader = TableReader::new();
    for (index, input_path) in files.iter().enumerate() {
        let file_name = input_path.file_name().ok_or_else(|| {
            ProcessingError::InvalidFormat(format!("no file name in {}", input_path.display()))
        })?;

        let table = reader.read_table(input_path)?;
        report.files_read += 1;
        report.rows_read += table.rows.len();

        warn_missing_columns(
            &table.header,
            &config.columns.timestamp_columns(),
            input_path,
        );

        let sorter = TemporalSorter::new(TimestampColumns::resolve(&table.header, &config.columns));
        let sorted = sorter.sort(table.rows)?;

        let mut writer = TableWriter::create(&output_dir.join(file_name), &table.header)?;
        for row in &sorted {
            writer.write_row(&row.fields)?;
        }
        report.rows_written += writer.rows_written();
        writer.finish()?;
        report.files_written += 1;

        if (index + 1) % config.progress.file_interval == 0 {
            debug!(file = index + 1, total = files.len(), "sorted files");
        }
        if let Some(progress) = progress {
            progress.increment(1);
        }
    }

    report.rows_skipped = report.rows_read - report.rows_written;
    info!(
        files = report.files_written,
        dir = %output_dir.display(),
        "sorted files by time"
    );
    Ok(report)
}
