use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::processors::{GroupColumns, Grouper, StationAssigner};
use crate::readers::TableReader;
use crate::stages::{warn_missing_columns, StageReport};
use crate::utils::ProgressReporter;
use crate::writers::TableWriter;

/// Split the traffic table into one `<segment>.csv` per segment.
///
/// Each output row is the input row followed by the segment's assigned
/// weather station id. Segment ids are used as file names unescaped.
pub fn split_traffic(
    input_csv: &Path,
    output_dir: &Path,
    config: &PipelineConfig,
    progress: Option<&ProgressReporter>,
) -> Result<StageReport> {
    let mut report = StageReport::new("split");
    let names = &config.columns;

    info!(path = %input_csv.display(), "loading traffic");
    let table = TableReader::new().read_table(input_csv)?;
    report.files_read = 1;
    report.rows_read = table.rows.len();
    info!(rows = report.rows_read, "loaded traffic");

    warn_missing_columns(
        &table.header,
        &[
            names.segment_id.as_str(),
            names.latitude.as_str(),
            names.longitude.as_str(),
        ],
        input_csv,
    );

    let grouper = Grouper::new(
        StationAssigner::new(),
        GroupColumns::resolve(&table.header, names),
    );
    let groups = grouper.group(table.rows)?;
    info!(segments = groups.len(), "grouped traffic by segment");

    fs::create_dir_all(output_dir)?;
    let header = table.header.extended(&[&names.weather_station_id]);

    if let Some(progress) = progress {
        progress.set_length(groups.len() as u64);
        progress.set_message("Writing segment files...");
    }

    for (written, group) in groups.values().enumerate() {
        let station_id = group.assigned_station_id().to_string();
        let mut writer = TableWriter::create(&output_dir.join(group.file_name()), &header)?;
        for row in group.rows() {
            writer.write_row(row.iter().chain(std::iter::once(&station_id)))?;
        }
        report.rows_written += writer.rows_written();
        writer.finish()?;
        report.files_written += 1;

        if (written + 1) % config.progress.segment_interval == 0 {
            debug!(files = written + 1, "written segment files");
        }
        if let Some(progress) = progress {
            progress.increment(1);
        }
    }

    report.rows_skipped = report.rows_read - report.rows_written;
    info!(
        files = report.files_written,
        dir = %output_dir.display(),
        "split traffic by segment"
    );
    Ok(report)
}
