use std::path::Path;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::TimestampColumns;
use crate::processors::CalendarFeatureEncoder;
use crate::readers::TableReader;
use crate::stages::{warn_missing_columns, StageReport};
use crate::utils::constants::FEATURE_COLUMNS;
use crate::utils::{HolidayCalendar, ProgressReporter};
use crate::writers::TableWriter;

/// Append holiday, weekend and cyclical time columns to every row of a table.
///
/// Empty rows and rows missing a calendar column are dropped.
pub fn add_time_features(
    input_csv: &Path,
    output_csv: &Path,
    config: &PipelineConfig,
    holidays: &HolidayCalendar,
    progress: Option<&ProgressReporter>,
) -> Result<StageReport> {
    let mut report = StageReport::new("features");

    info!(path = %input_csv.display(), "loading merged dataset");
    let table = TableReader::new().read_table(input_csv)?;
    report.files_read = 1;
    report.rows_read = table.rows.len();

    warn_missing_columns(
        &table.header,
        &config.columns.timestamp_columns(),
        input_csv,
    );

    if let Some(progress) = progress {
        progress.set_length(table.rows.len() as u64);
        progress.set_message("Adding time features...");
    }

    let time_columns = TimestampColumns::resolve(&table.header, &config.columns);
    let encoder = CalendarFeatureEncoder::new(holidays);
    let header = table.header.extended(&FEATURE_COLUMNS);
    let mut writer = TableWriter::create(output_csv, &header)?;

    for (index, fields) in table.rows.iter().enumerate() {
        if (index + 1) % config.progress.row_interval == 0 {
            debug!(rows = index + 1, "processed rows");
            if let Some(progress) = progress {
                progress.increment(config.progress.row_interval as u64);
            }
        }

        if fields.is_empty() {
            continue;
        }
        let Some(timestamp) = time_columns.read(fields)? else {
            continue;
        };

        let features = encoder.encode(&timestamp).to_fields();
        writer.write_row(fields.iter().chain(features.iter()))?;
    }

    report.rows_written = writer.rows_written();
    report.rows_skipped = report.rows_read - report.rows_written;
    writer.finish()?;
    report.files_written = 1;

    info!(
        rows = report.rows_written,
        path = %output_csv.display(),
        "added time features"
    );
    Ok(report)
}
