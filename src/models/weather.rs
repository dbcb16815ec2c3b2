use std::collections::BTreeMap;

use crate::models::{Header, Row, Timestamp};

/// A full weather row together with its parsed observation time
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub timestamp: Timestamp,
    pub fields: Row,
}

impl WeatherRecord {
    pub fn new(timestamp: Timestamp, fields: Row) -> Self {
        Self { timestamp, fields }
    }
}

/// Weather observations grouped by station id.
///
/// Each station's series must be put in time order with
/// [`WeatherTable::sort_by_time`] before it is joined against.
#[derive(Debug, Clone, Default)]
pub struct WeatherTable {
    header: Header,
    by_station: BTreeMap<i32, Vec<WeatherRecord>>,
}

impl WeatherTable {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            by_station: BTreeMap::new(),
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn insert(&mut self, station_id: i32, record: WeatherRecord) {
        self.by_station.entry(station_id).or_default().push(record);
    }

    pub fn sort_by_time(&mut self) {
        for records in self.by_station.values_mut() {
            records.sort_by(|left, right| left.timestamp.cmp(&right.timestamp));
        }
    }

    /// Records observed by `station_id`; empty when the station reported nothing
    pub fn records_for(&self, station_id: i32) -> &[WeatherRecord] {
        self.by_station
            .get(&station_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn station_count(&self) -> usize {
        self.by_station.len()
    }

    pub fn record_count(&self) -> usize {
        self.by_station.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hour: i32, tag: &str) -> WeatherRecord {
        WeatherRecord::new(Timestamp::new(2020, 1, 1, hour, 0), vec![tag.to_string()])
    }

    #[test]
    fn test_sort_by_time_per_station() {
        let mut table = WeatherTable::new(Header::from(vec!["location_id", "time"]));
        table.insert(3, record(12, "c"));
        table.insert(3, record(8, "a"));
        table.insert(3, record(10, "b"));
        table.insert(7, record(1, "z"));
        table.sort_by_time();

        let tags: Vec<&str> = table
            .records_for(3)
            .iter()
            .map(|r| r.fields[0].as_str())
            .collect();
        assert_eq!(tags, vec!["a", "b", "c"]);
        assert_eq!(table.station_count(), 2);
        assert_eq!(table.record_count(), 4);
    }

    #[test]
    fn test_unknown_station_is_empty() {
        let table = WeatherTable::default();
        assert!(table.records_for(5).is_empty());
    }
}
