use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::stages::{
    add_time_features, concat_directory, merge_weather, sort_directory, split_traffic,
    StageReport,
};
use crate::utils::{HolidayCalendar, ProgressReporter};

/// Which stages a full run executes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSelection {
    pub split: bool,
    pub sort: bool,
    pub merge_weather: bool,
    pub concat: bool,
    pub features: bool,
}

impl Default for StageSelection {
    fn default() -> Self {
        Self {
            split: true,
            sort: true,
            merge_weather: true,
            concat: true,
            features: true,
        }
    }
}

/// Run the selected stages in order, each reading the previous one's output
/// from the paths in `config`.
pub fn run_pipeline(
    config: &PipelineConfig,
    selection: StageSelection,
    silent: bool,
) -> Result<Vec<StageReport>> {
    let paths = &config.paths;
    let mut reports = Vec::new();

    if selection.split {
        info!("split traffic by segment");
        let progress = ProgressReporter::new(0, "Splitting traffic...", silent);
        reports.push(split_traffic(
            &paths.traffic_input,
            &paths.traffic_by_location,
            config,
            Some(&progress),
        )?);
        progress.finish_with_message("Split complete");
    }

    if selection.sort {
        info!("sort segment files by time");
        let progress = ProgressReporter::new(0, "Sorting...", silent);
        reports.push(sort_directory(
            &paths.traffic_by_location,
            &paths.traffic_by_location_sorted,
            config,
            Some(&progress),
        )?);
        progress.finish_with_message("Sort complete");
    }

    if selection.merge_weather {
        info!("merge weather data");
        let progress = ProgressReporter::new(0, "Merging weather...", silent);
        reports.push(merge_weather(
            &paths.weather_input,
            &paths.traffic_by_location_sorted,
            &paths.merged_traffic_weather,
            config,
            Some(&progress),
        )?);
        progress.finish_with_message("Merge complete");
    }

    if selection.concat {
        info!("concatenate segment files");
        let progress = ProgressReporter::new(0, "Concatenating...", silent);
        reports.push(concat_directory(
            &paths.merged_traffic_weather,
            &paths.final_output,
            config,
            Some(&progress),
        )?);
        progress.finish_with_message("Concatenation complete");
    }

    if selection.features {
        info!("add time features");
        let holidays = HolidayCalendar::us_federal();
        let progress = ProgressReporter::new(0, "Adding features...", silent);
        reports.push(add_time_features(
            &paths.final_output,
            &paths.final_output_with_features,
            config,
            &holidays,
            Some(&progress),
        )?);
        progress.finish_with_message("Features complete");
    }

    Ok(reports)
}
