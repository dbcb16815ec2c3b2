use tracing::{debug, warn};

use crate::config::JoinConfig;
use crate::error::Result;
use crate::models::{Row, TimedRow, Timestamp, WeatherRecord};

/// Something worth reporting while joining one group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinDiagnostic {
    /// The group's station has no weather records; the group is dropped
    NoWeatherForStation { station_id: i32 },

    /// A traffic row was dropped because its match was too far away in time.
    /// Only the first few per group are recorded.
    StalenessExceeded {
        traffic_time: Timestamp,
        weather_time: Timestamp,
        difference_minutes: i64,
    },

    /// Total rows dropped for staleness in the group
    SkippedRowsSummary { count: usize },
}

/// Result of joining one group against its station's weather series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinOutcome {
    /// Traffic fields followed by the matched weather fields
    pub rows: Vec<Row>,
    /// Traffic rows dropped for exceeding the staleness bound
    pub skipped: usize,
    pub diagnostics: Vec<JoinDiagnostic>,
}

impl JoinOutcome {
    /// True when the whole group was dropped for lack of weather data
    pub fn is_group_skipped(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, JoinDiagnostic::NoWeatherForStation { .. }))
    }
}

/// Forward-only position in a time-sorted weather series.
///
/// Seeking never moves backwards, so a group's traffic rows must be visited
/// in non-decreasing time order.
struct WeatherCursor<'w> {
    records: &'w [WeatherRecord],
    index: usize,
}

impl<'w> WeatherCursor<'w> {
    fn new(records: &'w [WeatherRecord]) -> Option<Self> {
        (!records.is_empty()).then_some(Self { records, index: 0 })
    }

    /// First record not earlier than `time`, or the last record once the
    /// series is exhausted.
    fn seek(&mut self, time: &Timestamp) -> &'w WeatherRecord {
        while self.index < self.records.len() && self.records[self.index].timestamp < *time {
            self.index += 1;
        }
        if self.index >= self.records.len() {
            self.index = self.records.len() - 1;
        }
        &self.records[self.index]
    }
}

/// Attaches weather observations to traffic rows under a staleness bound
pub struct TemporalJoiner {
    tolerance_minutes: i64,
    max_skip_warnings: usize,
}

impl TemporalJoiner {
    pub fn new(tolerance_minutes: i64, max_skip_warnings: usize) -> Self {
        Self {
            tolerance_minutes,
            max_skip_warnings,
        }
    }

    pub fn from_config(config: &JoinConfig) -> Self {
        Self::new(config.tolerance_minutes, config.max_skip_warnings)
    }

    pub fn tolerance_minutes(&self) -> i64 {
        self.tolerance_minutes
    }

    /// Join one group's time-sorted traffic rows against the time-sorted
    /// weather series of its station.
    ///
    /// Each traffic row is matched with the first weather record at or after
    /// its time (the last record once the series runs out). The record just
    /// before the traffic time is never considered, even when it is closer.
    /// Rows whose match lies more than the tolerance away are dropped and
    /// counted.
    pub fn join(
        &self,
        group: &str,
        station_id: i32,
        traffic: &[TimedRow],
        weather: &[WeatherRecord],
    ) -> Result<JoinOutcome> {
        let mut outcome = JoinOutcome::default();

        let Some(mut cursor) = WeatherCursor::new(weather) else {
            warn!(
                group,
                station_id, "no weather data for station, skipping group"
            );
            outcome
                .diagnostics
                .push(JoinDiagnostic::NoWeatherForStation { station_id });
            return Ok(outcome);
        };

        debug_assert!(
            traffic
                .windows(2)
                .all(|pair| pair[0].timestamp <= pair[1].timestamp),
            "traffic rows must be sorted by time"
        );

        outcome.rows.reserve(traffic.len());

        for row in traffic {
            let record = cursor.seek(&row.timestamp);
            let difference_minutes = row.timestamp.abs_diff_minutes(&record.timestamp)?;

            if difference_minutes > self.tolerance_minutes {
                outcome.skipped += 1;
                if outcome.skipped <= self.max_skip_warnings {
                    warn!(
                        group,
                        traffic_time = %row.timestamp,
                        weather_time = %record.timestamp,
                        difference_minutes,
                        "weather data too far from traffic data, skipping row"
                    );
                    outcome.diagnostics.push(JoinDiagnostic::StalenessExceeded {
                        traffic_time: row.timestamp,
                        weather_time: record.timestamp,
                        difference_minutes,
                    });
                }
                continue;
            }

            let mut joined = Vec::with_capacity(row.fields.len() + record.fields.len());
            joined.extend(row.fields.iter().cloned());
            joined.extend(record.fields.iter().cloned());
            outcome.rows.push(joined);
        }

        if outcome.skipped > 0 {
            warn!(
                group,
                skipped = outcome.skipped,
                tolerance_minutes = self.tolerance_minutes,
                "skipped rows with stale weather data"
            );
            outcome.diagnostics.push(JoinDiagnostic::SkippedRowsSummary {
                count: outcome.skipped,
            });
        }

        debug!(
            group,
            station_id,
            joined = outcome.rows.len(),
            skipped = outcome.skipped,
            "joined group"
        );

        Ok(outcome)
    }
}

impl Default for TemporalJoiner {
    fn default() -> Self {
        Self::from_config(&JoinConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn traffic(tag: &str, time: Timestamp) -> TimedRow {
        TimedRow::new(time, vec![tag.to_string()])
    }

    fn weather(tag: &str, time: Timestamp) -> WeatherRecord {
        WeatherRecord::new(time, vec![tag.to_string(), time.to_string()])
    }

    fn at(hour: i32, minute: i32) -> Timestamp {
        Timestamp::new(2020, 6, 15, hour, minute)
    }

    fn staleness_warnings(outcome: &JoinOutcome) -> usize {
        outcome
            .diagnostics
            .iter()
            .filter(|d| matches!(d, JoinDiagnostic::StalenessExceeded { .. }))
            .count()
    }

    #[test]
    fn test_cursor_clamps_to_last_record() {
        let joiner = TemporalJoiner::default();
        let outcome = joiner
            .join(
                "seg",
                4,
                &[traffic("t1", at(10, 0)), traffic("t2", at(10, 5))],
                &[weather("w1", at(10, 0))],
            )
            .unwrap();

        assert_eq!(outcome.skipped, 0);
        assert_eq!(
            outcome.rows,
            vec![
                vec!["t1".to_string(), "w1".to_string(), at(10, 0).to_string()],
                vec!["t2".to_string(), "w1".to_string(), at(10, 0).to_string()],
            ]
        );
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_next_or_equal_match_ignores_closer_predecessor() {
        let joiner = TemporalJoiner::default();
        let outcome = joiner
            .join(
                "seg",
                4,
                &[traffic("t", at(10, 1))],
                &[weather("before", at(10, 0)), weather("after", at(11, 0))],
            )
            .unwrap();

        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0][1], "after");
    }

    #[test]
    fn test_exact_time_match_preferred() {
        let joiner = TemporalJoiner::default();
        let outcome = joiner
            .join(
                "seg",
                4,
                &[traffic("t", at(11, 0))],
                &[
                    weather("w10", at(10, 0)),
                    weather("w11", at(11, 0)),
                    weather("w12", at(12, 0)),
                ],
            )
            .unwrap();

        assert_eq!(outcome.rows[0][1], "w11");
    }

    #[test]
    fn test_cursor_advances_monotonically() {
        let joiner = TemporalJoiner::default();
        let outcome = joiner
            .join(
                "seg",
                4,
                &[
                    traffic("a", at(9, 30)),
                    traffic("b", at(10, 0)),
                    traffic("c", at(10, 30)),
                    traffic("d", at(12, 45)),
                ],
                &[
                    weather("w10", at(10, 0)),
                    weather("w11", at(11, 0)),
                    weather("w12", at(12, 0)),
                ],
            )
            .unwrap();

        let matched: Vec<(&str, &str)> = outcome
            .rows
            .iter()
            .map(|r| (r[0].as_str(), r[1].as_str()))
            .collect();
        assert_eq!(
            matched,
            vec![("a", "w10"), ("b", "w10"), ("c", "w11"), ("d", "w12")]
        );
    }

    #[test]
    fn test_staleness_drops_row() {
        let joiner = TemporalJoiner::new(120, 5);
        let outcome = joiner
            .join(
                "seg",
                4,
                &[traffic("t", at(8, 0))],
                &[weather("w", at(10, 5))],
            )
            .unwrap();

        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.skipped, 1);
        assert_eq!(
            outcome.diagnostics,
            vec![
                JoinDiagnostic::StalenessExceeded {
                    traffic_time: at(8, 0),
                    weather_time: at(10, 5),
                    difference_minutes: 125,
                },
                JoinDiagnostic::SkippedRowsSummary { count: 1 },
            ]
        );
    }

    #[test]
    fn test_difference_equal_to_tolerance_is_kept() {
        let joiner = TemporalJoiner::new(120, 5);
        let outcome = joiner
            .join(
                "seg",
                4,
                &[traffic("t", at(8, 0))],
                &[weather("w", at(10, 0))],
            )
            .unwrap();

        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn test_staleness_across_midnight_uses_calendar() {
        let joiner = TemporalJoiner::new(120, 5);
        let outcome = joiner
            .join(
                "seg",
                4,
                &[traffic("t", Timestamp::new(2020, 2, 28, 23, 30))],
                &[weather("w", Timestamp::new(2020, 2, 29, 0, 30))],
            )
            .unwrap();

        assert_eq!(outcome.rows.len(), 1);
    }

    #[test]
    fn test_warnings_capped_but_summary_counts_all() {
        let joiner = TemporalJoiner::new(120, 5);
        let rows: Vec<TimedRow> = (0..8).map(|m| traffic("t", at(0, m))).collect();
        let outcome = joiner
            .join("seg", 4, &rows, &[weather("w", at(23, 0))])
            .unwrap();

        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.skipped, 8);
        assert_eq!(staleness_warnings(&outcome), 5);
        assert_eq!(
            outcome.diagnostics.last(),
            Some(&JoinDiagnostic::SkippedRowsSummary { count: 8 })
        );
    }

    #[test]
    fn test_no_weather_for_station_skips_group() {
        let joiner = TemporalJoiner::default();
        let outcome = joiner
            .join("seg", 7, &[traffic("t", at(8, 0)), traffic("u", at(9, 0))], &[])
            .unwrap();

        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.skipped, 0);
        assert!(outcome.is_group_skipped());
        assert_eq!(
            outcome.diagnostics,
            vec![JoinDiagnostic::NoWeatherForStation { station_id: 7 }]
        );
    }

    #[test]
    fn test_weather_fields_appended_unchanged() {
        let joiner = TemporalJoiner::default();
        let record = WeatherRecord::new(
            at(10, 0),
            vec!["4".to_string(), "2020-06-15T10:00".to_string(), " 12.5".to_string()],
        );
        let outcome = joiner
            .join(
                "seg",
                4,
                &[TimedRow::new(at(10, 0), vec!["x".to_string(), "y".to_string()])],
                &[record],
            )
            .unwrap();

        assert_eq!(
            outcome.rows[0],
            vec!["x", "y", "4", "2020-06-15T10:00", " 12.5"]
        );
    }
}
