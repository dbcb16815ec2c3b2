use crate::models::Row;

/// All rows sharing one segment key, pinned to a single weather station.
///
/// The station is chosen from the first row's coordinates when the group is
/// created and never revised, whatever later rows carry.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedRecord {
    key: String,
    assigned_station_id: i32,
    rows: Vec<Row>,
}

impl GroupedRecord {
    pub fn new(key: String, assigned_station_id: i32) -> Self {
        Self {
            key,
            assigned_station_id,
            rows: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn assigned_station_id(&self) -> i32 {
        self.assigned_station_id
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// File name the group is written under
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.key)
    }
}
