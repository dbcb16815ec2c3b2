use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::ColumnNames;
use crate::error::{ProcessingError, Result};
use crate::models::row::parse_int_field;
use crate::models::{Timestamp, WeatherRecord, WeatherTable};
use crate::readers::{Table, TableReader};
use crate::utils::constants::DEFAULT_ROW_PROGRESS_INTERVAL;

/// Counts gathered while loading a weather table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeatherLoadStats {
    pub rows_read: usize,
    pub rows_malformed: usize,
    /// Rows whose time text was unrecognized and fell back to the zero timestamp
    pub zero_timestamps: usize,
}

/// Loads weather observations grouped by station and sorted by time
pub struct WeatherReader {
    location_column: String,
    time_column: String,
    row_progress_interval: usize,
}

impl WeatherReader {
    pub fn new(columns: &ColumnNames) -> Self {
        Self {
            location_column: columns.location_id.clone(),
            time_column: columns.time.clone(),
            row_progress_interval: DEFAULT_ROW_PROGRESS_INTERVAL,
        }
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.row_progress_interval = interval.max(1);
        self
    }

    pub fn read_weather(&self, path: &Path) -> Result<(WeatherTable, WeatherLoadStats)> {
        info!(path = %path.display(), "loading weather");
        let table = TableReader::new().read_table(path)?;
        self.load(table)
    }

    /// Group rows by station id and sort each station's series.
    ///
    /// Rows too short for the location and time columns are skipped with a
    /// warning. Time text in an unrecognized format becomes
    /// [`Timestamp::ZERO`], which sorts before every real reading. A
    /// non-numeric station id is an error.
    pub fn load(&self, table: Table) -> Result<(WeatherTable, WeatherLoadStats)> {
        let header = table.header;
        for name in header.missing(&[self.location_column.as_str(), self.time_column.as_str()]) {
            warn!(column = name, "weather column not found, falling back to the first column");
        }

        let location_index = header.find_column(&self.location_column);
        let time_index = header.find_column(&self.time_column);
        let required_len = location_index.max(time_index) + 1;

        let mut weather = WeatherTable::new(header);
        let mut stats = WeatherLoadStats::default();

        for fields in table.rows {
            stats.rows_read += 1;
            if stats.rows_read % self.row_progress_interval == 0 {
                debug!(rows = stats.rows_read, "loaded weather records");
            }

            if fields.len() < required_len {
                stats.rows_malformed += 1;
                warn!(
                    row = stats.rows_read,
                    columns = fields.len(),
                    expected = required_len,
                    "weather row too short, skipping"
                );
                continue;
            }

            let station_id = parse_int_field(&fields, location_index, &self.location_column)?;
            let timestamp = match Timestamp::parse_time_text(&fields[time_index]) {
                Ok(timestamp) => timestamp,
                Err(ProcessingError::UnrecognizedTimestamp(text)) => {
                    stats.zero_timestamps += 1;
                    debug!(row = stats.rows_read, text = %text, "unrecognized weather time");
                    Timestamp::ZERO
                }
                Err(e) => return Err(e),
            };

            weather.insert(station_id, WeatherRecord::new(timestamp, fields));
        }

        weather.sort_by_time();

        if stats.zero_timestamps > 0 {
            warn!(
                count = stats.zero_timestamps,
                "weather rows with unrecognized time text were given a zero timestamp"
            );
        }
        info!(
            records = weather.record_count(),
            stations = weather.station_count(),
            "loaded weather"
        );

        Ok((weather, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(data: &str) -> Result<(WeatherTable, WeatherLoadStats)> {
        let table = TableReader::new().read_from(data.as_bytes())?;
        WeatherReader::new(&ColumnNames::default()).load(table)
    }

    #[test]
    fn test_groups_and_sorts_by_station() {
        let (weather, stats) = load(
            "location_id,time,temperature_2m\n\
             4,2020-01-01T02:00,1.0\n\
             4,2020-01-01T00:00,2.0\n\
             9,2020-01-01 01:00,3.0\n\
             4,2020-01-01T01:00,4.0\n",
        )
        .unwrap();

        assert_eq!(stats.rows_read, 4);
        assert_eq!(weather.station_count(), 2);
        let hours: Vec<i32> = weather
            .records_for(4)
            .iter()
            .map(|r| r.timestamp.hour())
            .collect();
        assert_eq!(hours, vec![0, 1, 2]);
        assert_eq!(weather.records_for(9)[0].fields[2], "3.0");
        assert!(weather.records_for(5).is_empty());
    }

    #[test]
    fn test_unrecognized_time_becomes_zero() {
        let (weather, stats) = load(
            "location_id,time\n\
             4,2020-01-01T05:00\n\
             4,01/01/2020 04:00\n",
        )
        .unwrap();

        assert_eq!(stats.zero_timestamps, 1);
        let records = weather.records_for(4);
        assert_eq!(records[0].timestamp, Timestamp::ZERO);
        assert_eq!(records[0].fields[1], "01/01/2020 04:00");
        assert_eq!(records[1].timestamp, Timestamp::new(2020, 1, 1, 5, 0));
    }

    #[test]
    fn test_short_rows_skipped() {
        let (weather, stats) = load("time,location_id\n2020-01-01T00:00\n2020-01-01T00:00,4\n").unwrap();
        assert_eq!(stats.rows_malformed, 1);
        assert_eq!(weather.record_count(), 1);
    }

    #[test]
    fn test_non_numeric_station_fails() {
        let result = load("location_id,time\nnorth,2020-01-01T00:00\n");
        assert!(matches!(
            result,
            Err(ProcessingError::UnparseableField { .. })
        ));
    }
}
