use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::Header;
use crate::readers::TableReader;
use crate::stages::{list_csv_files, StageReport};
use crate::utils::ProgressReporter;
use crate::writers::TableWriter;

/// Concatenate every `*.csv` in `input_dir`, in path order, into one file.
///
/// The header comes from the first file; later headers are not checked
/// beyond a warning when they differ.
pub fn concat_directory(
    input_dir: &Path,
    output_csv: &Path,
    config: &PipelineConfig,
    progress: Option<&ProgressReporter>,
) -> Result<StageReport> {
    let mut report = StageReport::new("concat");

    let files = list_csv_files(input_dir)?;
    info!(files = files.len(), dir = %input_dir.display(), "found files to concatenate");

    if let Some(progress) = progress {
        progress.set_length(files.len() as u64);
        progress.set_message("Concatenating files...");
    }

    let reader = TableReader::new();
    let mut output: Option<(Header, TableWriter<File>)> = None;

    for (index, path) in files.iter().enumerate() {
        let table = reader.read_table(path)?;
        report.files_read += 1;
        report.rows_read += table.rows.len();

        if output.is_none() {
            let writer = TableWriter::create(output_csv, &table.header)?;
            output = Some((table.header.clone(), writer));
        }

        if let Some((first_header, writer)) = output.as_mut() {
            if *first_header != table.header {
                warn!(file = %path.display(), "header differs from the first file");
            }
            for row in &table.rows {
                writer.write_row(row)?;
            }
        }

        if (index + 1) % config.progress.file_interval == 0 {
            debug!(files = index + 1, rows = report.rows_read, "concatenated files");
        }
        if let Some(progress) = progress {
            progress.increment(1);
        }
    }

    match output {
        Some((_, writer)) => {
            report.rows_written = writer.rows_written();
            writer.finish()?;
        }
        None => {
            warn!(dir = %input_dir.display(), "no files to concatenate, writing empty output");
            if let Some(parent) = output_csv.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            File::create(output_csv)?;
        }
    }
    report.files_written = 1;

    info!(
        files = report.files_read,
        rows = report.rows_written,
        path = %output_csv.display(),
        "concatenated files"
    );
    Ok(report)
}
