//! csv-crate reader with iterator interface
//!
//! Alternative to [`SyncReader`](crate::io::SyncReader) that lets the `csv`
//! crate handle quoting. Rows are deserialized positionally into a
//! [`CsvRecord`] and converted with the same rules as the split loader.

use crate::io::record_format::{convert_csv_record, CsvRecord, ParsedRow};
use crate::types::{LoadError, FIELD_COUNT};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Streaming csv-crate reader
#[derive(Debug)]
pub struct CsvReader<R> {
    reader: csv::Reader<R>,
    row: StringRecord,
}

impl CsvReader<File> {
    /// Open a file for streaming
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LoadError::file_not_found(path),
            _ => LoadError::from(e),
        })?;

        Ok(Self::from_reader(file))
    }
}

impl<R: Read> CsvReader<R> {
    /// Wrap any reader; the first row is treated as the header
    ///
    /// The reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts, so short rows report `FieldCount`
    /// - Use an 8KB buffer
    pub fn from_reader(reader: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(reader);

        Self {
            reader,
            row: StringRecord::new(),
        }
    }

    fn parse_current(&self) -> Result<ParsedRow, LoadError> {
        let line = self.row.position().map_or(0, |pos| pos.line());
        if self.row.len() != FIELD_COUNT {
            return Err(LoadError::field_count(line, FIELD_COUNT, self.row.len()));
        }

        let csv_record: CsvRecord = self.row.deserialize(None)?;
        let record = convert_csv_record(csv_record, line)?;
        Ok(ParsedRow { line, record })
    }
}

impl<R: Read> Iterator for CsvReader<R> {
    type Item = Result<ParsedRow, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read_record(&mut self.row) {
                Ok(false) => return None,
                Ok(true) if self.row.iter().all(str::is_empty) => continue,
                Ok(true) => return Some(self.parse_current()),
                Err(e) => return Some(Err(LoadError::from(e))),
            }
        }
    }
}
