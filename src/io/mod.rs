//! I/O module
//!
//! Handles reading dataset rows and writing records.
//!
//! # Components
//!
//! - `splitter` - quote-aware field splitting state machine
//! - `record_format` - field/record conversion and CSV output
//! - `sync_reader` - line reader built on the splitter
//! - `csv_reader` - reader built on the csv crate

pub mod csv_reader;
pub mod record_format;
pub mod splitter;
pub mod sync_reader;

pub use csv_reader::CsvReader;
pub use record_format::{convert_fields, write_records_csv, CsvRecord, ParsedRow};
pub use splitter::{split_fields, FieldSplitter};
pub use sync_reader::SyncReader;
