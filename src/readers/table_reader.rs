use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::Result;
use crate::models::{Header, Row};
use crate::utils::constants::DEFAULT_BUFFER_SIZE;

/// A fully materialized comma-separated table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub header: Header,
    pub rows: Vec<Row>,
}

/// Reads header-first CSV files into [`Table`]s.
///
/// Quoted fields may contain delimiters, whitespace around every field is
/// trimmed, and rows may have any number of fields.
pub struct TableReader {
    trim: bool,
}

impl TableReader {
    pub fn new() -> Self {
        Self { trim: true }
    }

    pub fn with_trim(trim: bool) -> Self {
        Self { trim }
    }

    pub fn read_table(&self, path: &Path) -> Result<Table> {
        let file = File::open(path)?;
        self.read_from(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<Table> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .from_reader(reader);

        let header = Header::new(csv_reader.headers()?.iter().map(str::to_string).collect());

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Table { header, rows })
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::new()
    }
}
