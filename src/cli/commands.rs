use tracing::info;
use validator::Validate;

use crate::cli::args::{Cli, Commands, JoinOverrides};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::stages::{
    add_time_features, concat_directory, merge_weather, run_pipeline, sort_directory,
    split_traffic, StageReport, StageSelection,
};
use crate::utils::{HolidayCalendar, ProgressReporter};

pub fn run(cli: Cli) -> Result<()> {
    let mut config = PipelineConfig::load(cli.config.as_deref())?;
    let silent = cli.quiet;

    let reports = match cli.command {
        Commands::Split { input, output_dir } => {
            let paths = &mut config.paths;
            override_path(&mut paths.traffic_input, input);
            override_path(&mut paths.traffic_by_location, output_dir);

            let progress = ProgressReporter::new(0, "Splitting traffic...", silent);
            let report = split_traffic(
                &config.paths.traffic_input,
                &config.paths.traffic_by_location,
                &config,
                Some(&progress),
            )?;
            progress.finish_with_message("Split complete");
            vec![report]
        }

        Commands::Sort {
            input_dir,
            output_dir,
        } => {
            let paths = &mut config.paths;
            override_path(&mut paths.traffic_by_location, input_dir);
            override_path(&mut paths.traffic_by_location_sorted, output_dir);

            let progress = ProgressReporter::new(0, "Sorting...", silent);
            let report = sort_directory(
                &config.paths.traffic_by_location,
                &config.paths.traffic_by_location_sorted,
                &config,
                Some(&progress),
            )?;
            progress.finish_with_message("Sort complete");
            vec![report]
        }

        Commands::MergeWeather {
            weather,
            input_dir,
            output_dir,
            join,
        } => {
            let paths = &mut config.paths;
            override_path(&mut paths.weather_input, weather);
            override_path(&mut paths.traffic_by_location_sorted, input_dir);
            override_path(&mut paths.merged_traffic_weather, output_dir);
            apply_join_overrides(&mut config, join)?;

            let progress = ProgressReporter::new(0, "Merging weather...", silent);
            let report = merge_weather(
                &config.paths.weather_input,
                &config.paths.traffic_by_location_sorted,
                &config.paths.merged_traffic_weather,
                &config,
                Some(&progress),
            )?;
            progress.finish_with_message("Merge complete");
            vec![report]
        }

        Commands::Concat {
            input_dir,
            output_file,
        } => {
            let paths = &mut config.paths;
            override_path(&mut paths.merged_traffic_weather, input_dir);
            override_path(&mut paths.final_output, output_file);

            let progress = ProgressReporter::new(0, "Concatenating...", silent);
            let report = concat_directory(
                &config.paths.merged_traffic_weather,
                &config.paths.final_output,
                &config,
                Some(&progress),
            )?;
            progress.finish_with_message("Concatenation complete");
            vec![report]
        }

        Commands::Features { input, output_file } => {
            let paths = &mut config.paths;
            override_path(&mut paths.final_output, input);
            override_path(&mut paths.final_output_with_features, output_file);

            let holidays = HolidayCalendar::us_federal();
            let progress = ProgressReporter::new(0, "Adding features...", silent);
            let report = add_time_features(
                &config.paths.final_output,
                &config.paths.final_output_with_features,
                &config,
                &holidays,
                Some(&progress),
            )?;
            progress.finish_with_message("Features complete");
            vec![report]
        }

        Commands::Run {
            skip_split,
            skip_sort,
            skip_merge_weather,
            skip_concat,
            skip_features,
            join,
        } => {
            apply_join_overrides(&mut config, join)?;
            let selection = StageSelection {
                split: !skip_split,
                sort: !skip_sort,
                merge_weather: !skip_merge_weather,
                concat: !skip_concat,
                features: !skip_features,
            };
            run_pipeline(&config, selection, silent)?
        }
    };

    print_reports(&reports);
    info!("all done");
    Ok(())
}

fn override_path(target: &mut std::path::PathBuf, value: Option<std::path::PathBuf>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn apply_join_overrides(config: &mut PipelineConfig, overrides: JoinOverrides) -> Result<()> {
    if let Some(tolerance) = overrides.tolerance_minutes {
        config.join.tolerance_minutes = tolerance;
    }
    if let Some(cap) = overrides.max_skip_warnings {
        config.join.max_skip_warnings = cap;
    }
    config.validate()?;
    Ok(())
}

fn print_reports(reports: &[StageReport]) {
    for report in reports {
        println!("{}", report.summary());
    }
}
