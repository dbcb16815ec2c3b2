use csv::{Writer, WriterBuilder};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::Header;

/// Writes a header and rows of text cells as CSV.
///
/// Rows may differ in length from the header. Cells holding a delimiter or
/// quote are quoted; everything else is written verbatim.
pub struct TableWriter<W: Write> {
    writer: Writer<W>,
    rows_written: usize,
}

impl TableWriter<File> {
    /// Create `path`, and any missing parent directories, and write the header
    pub fn create(path: &Path, header: &Header) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Self::from_writer(File::create(path)?, header)
    }
}

impl<W: Write> TableWriter<W> {
    pub fn from_writer(inner: W, header: &Header) -> Result<Self> {
        let mut writer = WriterBuilder::new().flexible(true).from_writer(inner);
        writer.write_record(header.columns())?;
        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    pub fn write_row<I, T>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer.write_record(fields)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and hand back the underlying writer
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| std::io::Error::new(e.error().kind(), e.error().to_string()).into())
    }
}
