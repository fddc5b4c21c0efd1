//! Record format handling for dataset rows and CSV output
//!
//! This module centralizes all row format concerns, providing:
//! - Conversion from split fields to a [`Record`]
//! - A `CsvRecord` structure for positional serde deserialization
//! - Record output serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{LoadError, Record, FIELD_COUNT, HEADER};
use serde::Deserialize;
use std::io::Write;

/// A record together with the source line it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    /// 1-based line number in the source file
    pub line: u64,
    pub record: Record,
}

/// Raw row as deserialized by the csv crate
///
/// Numeric columns stay strings here so that conversion errors can name
/// the column and line, matching the split loader.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub direction: String,
    pub year: String,
    pub date: String,
    pub weekday: String,
    pub country: String,
    pub commodity: String,
    pub transport_mode: String,
    pub measure: String,
    pub value: String,
    pub cumulative: String,
}

/// Convert the ten split fields of one line into a [`Record`]
///
/// # Errors
///
/// * `FieldCount` unless exactly ten fields are given
/// * `InvalidNumber` if Year, Value or Cumulative is not an integer
pub fn convert_fields(fields: &[String], line: u64) -> Result<Record, LoadError> {
    if fields.len() != FIELD_COUNT {
        return Err(LoadError::field_count(line, FIELD_COUNT, fields.len()));
    }

    Ok(Record {
        direction: fields[0].clone(),
        year: parse_number(&fields[1], HEADER[1], line)?,
        date: fields[2].clone(),
        weekday: fields[3].clone(),
        country: fields[4].clone(),
        commodity: fields[5].clone(),
        transport_mode: fields[6].clone(),
        measure: fields[7].clone(),
        value: parse_number(&fields[8], HEADER[8], line)?,
        cumulative: parse_number(&fields[9], HEADER[9], line)?,
    })
}

/// Convert a deserialized CsvRecord into a [`Record`]
pub fn convert_csv_record(csv_record: CsvRecord, line: u64) -> Result<Record, LoadError> {
    Ok(Record {
        year: parse_number(&csv_record.year, HEADER[1], line)?,
        value: parse_number(&csv_record.value, HEADER[8], line)?,
        cumulative: parse_number(&csv_record.cumulative, HEADER[9], line)?,
        direction: csv_record.direction,
        date: csv_record.date,
        weekday: csv_record.weekday,
        country: csv_record.country,
        commodity: csv_record.commodity,
        transport_mode: csv_record.transport_mode,
        measure: csv_record.measure,
    })
}

fn parse_number<T: std::str::FromStr>(
    raw: &str,
    field: &'static str,
    line: u64,
) -> Result<T, LoadError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| LoadError::invalid_number(line, field, raw))
}

/// Write records as CSV, header first
///
/// Fields containing commas or quotes are quoted by the csv writer, so the
/// output can be loaded again by either parser.
pub fn write_records_csv<'a, I>(records: I, output: &mut dyn Write) -> std::io::Result<()>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    // written by hand so an empty index still yields a header
    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}
