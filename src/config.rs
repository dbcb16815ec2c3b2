use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_FILE_PROGRESS_INTERVAL, DEFAULT_MAX_SKIP_WARNINGS, DEFAULT_ROW_PROGRESS_INTERVAL,
    DEFAULT_SEGMENT_PROGRESS_INTERVAL, DEFAULT_TOLERANCE_MINUTES, ENV_PREFIX,
};

/// Settings for a whole pipeline run.
///
/// Layered from built-in defaults, an optional TOML file, then `TWJ_*`
/// environment variables (`TWJ_JOIN__TOLERANCE_MINUTES=90`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct PipelineConfig {
    #[validate(nested)]
    pub paths: PathsConfig,

    #[validate(nested)]
    pub columns: ColumnNames,

    #[validate(nested)]
    pub join: JoinConfig,

    #[validate(nested)]
    pub progress: ProgressConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PathsConfig {
    pub traffic_input: PathBuf,
    pub weather_input: PathBuf,
    pub traffic_by_location: PathBuf,
    pub traffic_by_location_sorted: PathBuf,
    pub merged_traffic_weather: PathBuf,
    pub final_output: PathBuf,
    pub final_output_with_features: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            traffic_input: PathBuf::from("csv/traffic_data_with_coords.csv"),
            weather_input: PathBuf::from("csv/open-meteo-no-cords.csv"),
            traffic_by_location: PathBuf::from("output/traffic_by_location"),
            traffic_by_location_sorted: PathBuf::from("output/traffic_by_location_sorted"),
            merged_traffic_weather: PathBuf::from("output/merged_traffic_weather"),
            final_output: PathBuf::from("output/final_merged_dataset.csv"),
            final_output_with_features: PathBuf::from(
                "output/final_merged_dataset_with_features.csv",
            ),
        }
    }
}

/// Column names looked up by exact match in input headers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ColumnNames {
    #[validate(length(min = 1))]
    pub segment_id: String,
    #[validate(length(min = 1))]
    pub year: String,
    #[validate(length(min = 1))]
    pub month: String,
    #[validate(length(min = 1))]
    pub day: String,
    #[validate(length(min = 1))]
    pub hour: String,
    #[validate(length(min = 1))]
    pub minute: String,
    #[validate(length(min = 1))]
    pub latitude: String,
    #[validate(length(min = 1))]
    pub longitude: String,
    #[validate(length(min = 1))]
    pub weather_station_id: String,
    #[validate(length(min = 1))]
    pub location_id: String,
    #[validate(length(min = 1))]
    pub time: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            segment_id: "SegmentID".to_string(),
            year: "Yr".to_string(),
            month: "M".to_string(),
            day: "D".to_string(),
            hour: "HH".to_string(),
            minute: "MM".to_string(),
            latitude: "latitude".to_string(),
            longitude: "longitude".to_string(),
            weather_station_id: "weather_station_id".to_string(),
            location_id: "location_id".to_string(),
            time: "time".to_string(),
        }
    }
}

impl ColumnNames {
    pub fn timestamp_columns(&self) -> [&str; 5] {
        [
            self.year.as_str(),
            self.month.as_str(),
            self.day.as_str(),
            self.hour.as_str(),
            self.minute.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct JoinConfig {
    /// Largest tolerated gap between a traffic row and its weather record
    #[validate(range(min = 0))]
    pub tolerance_minutes: i64,

    /// Per-group cap on individual staleness warnings
    pub max_skip_warnings: usize,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            tolerance_minutes: DEFAULT_TOLERANCE_MINUTES,
            max_skip_warnings: DEFAULT_MAX_SKIP_WARNINGS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProgressConfig {
    #[validate(range(min = 1))]
    pub row_interval: usize,
    #[validate(range(min = 1))]
    pub file_interval: usize,
    #[validate(range(min = 1))]
    pub segment_interval: usize,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            row_interval: DEFAULT_ROW_PROGRESS_INTERVAL,
            file_interval: DEFAULT_FILE_PROGRESS_INTERVAL,
            segment_interval: DEFAULT_SEGMENT_PROGRESS_INTERVAL,
        }
    }
}

impl PipelineConfig {
    /// Build the layered configuration and validate it
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        let config: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.join.tolerance_minutes, 120);
        assert_eq!(config.join.max_skip_warnings, 5);
        assert_eq!(config.columns.segment_id, "SegmentID");
    }

    #[test]
    fn test_load_overrides_from_toml() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "[join]")?;
        writeln!(file, "tolerance_minutes = 45")?;
        writeln!(file, "[columns]")?;
        writeln!(file, "segment_id = \"LinkID\"")?;

        let config = PipelineConfig::load(Some(file.path()))?;
        assert_eq!(config.join.tolerance_minutes, 45);
        assert_eq!(config.join.max_skip_warnings, 5);
        assert_eq!(config.columns.segment_id, "LinkID");
        assert_eq!(config.columns.year, "Yr");
        Ok(())
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = PipelineConfig::default();
        config.join.tolerance_minutes = -1;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.columns.time = String::new();
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.progress.row_interval = 0;
        assert!(config.validate().is_err());
    }
}
