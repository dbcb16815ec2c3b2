use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::config::ColumnNames;
use crate::error::Result;
use crate::models::row::parse_float_field;
use crate::models::{GroupedRecord, Header, Row};
use crate::processors::StationAssigner;

/// Positions of the grouping key and coordinate columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupColumns {
    pub key: usize,
    pub latitude: usize,
    pub longitude: usize,
}

impl GroupColumns {
    pub fn resolve(header: &Header, names: &ColumnNames) -> Self {
        Self {
            key: header.find_column(&names.segment_id),
            latitude: header.find_column(&names.latitude),
            longitude: header.find_column(&names.longitude),
        }
    }

    pub fn required_len(&self) -> usize {
        self.key.max(self.latitude).max(self.longitude) + 1
    }
}

/// Groups keyed by segment id, iterated in lexicographic key order
pub type Groups = BTreeMap<String, GroupedRecord>;

/// Partitions traffic rows by segment key and pins each group to a station
pub struct Grouper<'a> {
    assigner: StationAssigner<'a>,
    columns: GroupColumns,
}

impl<'a> Grouper<'a> {
    pub fn new(assigner: StationAssigner<'a>, columns: GroupColumns) -> Self {
        Self { assigner, columns }
    }

    /// Group `rows` by key.
    ///
    /// Rows too short to carry the key and coordinates are dropped. Only the
    /// first row of a group has its coordinates parsed; that row alone decides
    /// the station for the whole group.
    pub fn group<I>(&self, rows: I) -> Result<Groups>
    where
        I: IntoIterator<Item = Row>,
    {
        let mut groups = Groups::new();
        let required_len = self.columns.required_len();

        for row in rows {
            if row.len() < required_len {
                continue;
            }

            let group = match groups.entry(row[self.columns.key].clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let station_id = self.assign_station(&row)?;
                    let key = entry.key().clone();
                    entry.insert(GroupedRecord::new(key, station_id))
                }
            };

            group.push(row);
        }

        Ok(groups)
    }

    fn assign_station(&self, row: &[String]) -> Result<i32> {
        let latitude = parse_float_field(row, self.columns.latitude, "latitude")?;
        let longitude = parse_float_field(row, self.columns.longitude, "longitude")?;
        Ok(self.assigner.nearest(latitude, longitude))
    }
}
