use crate::config::ColumnNames;
use crate::error::{ProcessingError, Result};
use crate::models::Timestamp;

/// One tokenized table row, positionally aligned to a [`Header`].
pub type Row = Vec<String>;

/// Ordered column names of a table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Index of the first column called `name`, or 0 when there is none.
    ///
    /// A missing column is indistinguishable from one at position 0; use
    /// [`Header::contains`] for presence checks.
    pub fn find_column(&self, name: &str) -> usize {
        self.columns
            .iter()
            .position(|column| column == name)
            .unwrap_or(0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    /// Names from `required` that this header does not carry
    pub fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| !self.contains(name))
            .collect()
    }

    /// This header followed by `extra` column names
    pub fn extended<S: AsRef<str>>(&self, extra: &[S]) -> Header {
        let mut columns = self.columns.clone();
        columns.extend(extra.iter().map(|name| name.as_ref().to_string()));
        Header { columns }
    }

    /// This header followed by every column of `other`
    pub fn concat(&self, other: &Header) -> Header {
        self.extended(other.columns())
    }
}

impl From<Vec<&str>> for Header {
    fn from(columns: Vec<&str>) -> Self {
        Self::new(columns.into_iter().map(str::to_string).collect())
    }
}

/// A row paired with the timestamp read from its calendar columns
#[derive(Debug, Clone, PartialEq)]
pub struct TimedRow {
    pub timestamp: Timestamp,
    pub fields: Row,
}

impl TimedRow {
    pub fn new(timestamp: Timestamp, fields: Row) -> Self {
        Self { timestamp, fields }
    }
}

/// Positions of the year/month/day/hour/minute columns in a header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampColumns {
    pub year: usize,
    pub month: usize,
    pub day: usize,
    pub hour: usize,
    pub minute: usize,
}

impl TimestampColumns {
    pub fn resolve(header: &Header, names: &ColumnNames) -> Self {
        Self {
            year: header.find_column(&names.year),
            month: header.find_column(&names.month),
            day: header.find_column(&names.day),
            hour: header.find_column(&names.hour),
            minute: header.find_column(&names.minute),
        }
    }

    /// Minimum field count a row needs before its timestamp can be read
    pub fn required_len(&self) -> usize {
        [self.year, self.month, self.day, self.hour, self.minute]
            .into_iter()
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Read the timestamp of `row`.
    ///
    /// Returns `Ok(None)` for rows too short to carry every calendar column;
    /// a present but non-numeric field is an error.
    pub fn read(&self, row: &[String]) -> Result<Option<Timestamp>> {
        if row.len() < self.required_len() {
            return Ok(None);
        }

        Ok(Some(Timestamp::new(
            parse_int_field(row, self.year, "year")?,
            parse_int_field(row, self.month, "month")?,
            parse_int_field(row, self.day, "day")?,
            parse_int_field(row, self.hour, "hour")?,
            parse_int_field(row, self.minute, "minute")?,
        )))
    }
}

pub fn parse_int_field(row: &[String], index: usize, column: &str) -> Result<i32> {
    let value = field(row, index, column)?;
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| unparseable(column, value))
}

pub fn parse_float_field(row: &[String], index: usize, column: &str) -> Result<f64> {
    let value = field(row, index, column)?;
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| unparseable(column, value))
}

fn field<'a>(row: &'a [String], index: usize, column: &str) -> Result<&'a str> {
    row.get(index).map(String::as_str).ok_or_else(|| {
        ProcessingError::MissingData(format!(
            "column '{}' at position {} absent from a row of {} fields",
            column,
            index,
            row.len()
        ))
    })
}

fn unparseable(column: &str, value: &str) -> ProcessingError {
    ProcessingError::UnparseableField {
        column: column.to_string(),
        value: value.to_string(),
    }
}
