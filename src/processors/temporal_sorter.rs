use crate::error::Result;
use crate::models::{Row, TimedRow, TimestampColumns};

/// Orders the rows of one group by their calendar columns
pub struct TemporalSorter {
    columns: TimestampColumns,
}

impl TemporalSorter {
    pub fn new(columns: TimestampColumns) -> Self {
        Self { columns }
    }

    /// Parse each row's timestamp and sort ascending.
    ///
    /// Rows missing any calendar column are dropped before sorting. The sort is
    /// stable, so rows with identical timestamps keep their input order.
    pub fn sort<I>(&self, rows: I) -> Result<Vec<TimedRow>>
    where
        I: IntoIterator<Item = Row>,
    {
        let mut timed = Vec::new();
        for row in rows {
            if let Some(timestamp) = self.columns.read(&row)? {
                timed.push(TimedRow::new(timestamp, row));
            }
        }

        sort_timed(&mut timed);
        Ok(timed)
    }
}

pub fn sort_timed(rows: &mut [TimedRow]) {
    rows.sort_by(|left, right| left.timestamp.cmp(&right.timestamp));
}

pub fn is_time_ordered(rows: &[TimedRow]) -> bool {
    rows.windows(2)
        .all(|pair| pair[0].timestamp <= pair[1].timestamp)
}
