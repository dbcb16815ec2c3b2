use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::{ProcessingError, Result};
use crate::models::row::parse_int_field;
use crate::models::{TimedRow, TimestampColumns, WeatherTable};
use crate::processors::temporal_sorter::is_time_ordered;
use crate::processors::TemporalJoiner;
use crate::readers::{TableReader, WeatherReader};
use crate::stages::{list_csv_files, warn_missing_columns, StageReport};
use crate::utils::ProgressReporter;
use crate::writers::TableWriter;

/// Attach weather to every time-sorted segment file in `traffic_dir`.
///
/// The weather table is loaded once, grouped by station and sorted. Each
/// segment file is joined against the series of the station recorded in its
/// first valid row. Files without valid rows are skipped quietly; files whose
/// station has no weather produce no output.
pub fn merge_weather(
    weather_csv: &Path,
    traffic_dir: &Path,
    output_dir: &Path,
    config: &PipelineConfig,
    progress: Option<&ProgressReporter>,
) -> Result<StageReport> {
    let (weather, _stats) = WeatherReader::new(&config.columns)
        .with_progress_interval(config.progress.row_interval)
        .read_weather(weather_csv)?;

    merge_loaded_weather(&weather, traffic_dir, output_dir, config, progress)
}

/// [`merge_weather`] against an already loaded weather table
pub fn merge_loaded_weather(
    weather: &WeatherTable,
    traffic_dir: &Path,
    output_dir: &Path,
    config: &PipelineConfig,
    progress: Option<&ProgressReporter>,
) -> Result<StageReport> {
    let mut report = StageReport::new("merge-weather");
    let joiner = TemporalJoiner::from_config(&config.join);
    let names = &config.columns;

    let files = list_csv_files(traffic_dir)?;
    info!(files = files.len(), dir = %traffic_dir.display(), "found traffic files");
    fs::create_dir_all(output_dir)?;

    if let Some(progress) = progress {
        progress.set_length(files.len() as u64);
        progress.set_message("Merging weather into segment files...");
    }

    let reader = TableReader::new();
    for (index, traffic_path) in files.iter().enumerate() {
        if let Some(progress) = progress {
            progress.increment(1);
        }

        let file_name = traffic_path.file_name().ok_or_else(|| {
            ProcessingError::InvalidFormat(format!("no file name in {}", traffic_path.display()))
        })?;
        let group = file_name.to_string_lossy();

        let table = reader.read_table(traffic_path)?;
        report.files_read += 1;
        report.rows_read += table.rows.len();

        let mut required = names.timestamp_columns().to_vec();
        required.push(names.weather_station_id.as_str());
        warn_missing_columns(&table.header, &required, traffic_path);

        let station_index = table.header.find_column(&names.weather_station_id);
        let time_columns = TimestampColumns::resolve(&table.header, names);
        let required_len = time_columns.required_len().max(station_index + 1);

        let mut station_id = None;
        let mut traffic = Vec::with_capacity(table.rows.len());
        for fields in table.rows {
            if fields.len() < required_len {
                report.rows_skipped += 1;
                continue;
            }
            if station_id.is_none() {
                station_id = Some(parse_int_field(
                    &fields,
                    station_index,
                    &names.weather_station_id,
                )?);
            }
            if let Some(timestamp) = time_columns.read(&fields)? {
                traffic.push(TimedRow::new(timestamp, fields));
            }
        }

        let Some(station_id) = station_id else {
            debug!(file = %group, "no usable traffic rows, skipping file");
            continue;
        };

        if !is_time_ordered(&traffic) {
            return Err(ProcessingError::InvalidFormat(format!(
                "{} is not sorted by time; run the sort stage first",
                traffic_path.display()
            )));
        }

        let outcome = joiner.join(&group, station_id, &traffic, weather.records_for(station_id))?;
        report.rows_skipped += outcome.skipped;
        if outcome.is_group_skipped() {
            report.groups_skipped += 1;
            continue;
        }

        let header = table.header.concat(weather.header());
        let mut writer = TableWriter::create(&output_dir.join(file_name), &header)?;
        for row in &outcome.rows {
            writer.write_row(row)?;
        }
        report.rows_written += writer.rows_written();
        writer.finish()?;
        report.files_written += 1;

        if (index + 1) % config.progress.file_interval == 0 {
            debug!(files = index + 1, total = files.len(), "merged files");
        }
    }

    info!(
        files = report.files_written,
        groups_skipped = report.groups_skipped,
        rows_skipped = report.rows_skipped,
        dir = %output_dir.display(),
        "merged weather data"
    );
    Ok(report)
}
