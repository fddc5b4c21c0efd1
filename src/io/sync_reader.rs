//! Line-based reader with iterator interface
//!
//! Streams [`ParsedRow`]s from a delimited text source, one line at a time.
//! Each line goes through the quote-aware [`split_fields`] state machine and
//! then [`convert_fields`].
//!
//! # Error Handling
//!
//! - Fatal errors opening the file are returned from `open()`
//! - Read and conversion errors are yielded as `Err` items carrying the
//!   1-based line number; the loader stops at the first one
//!
//! ```no_run
//! use effects_index::io::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::open(Path::new("effects.csv")).unwrap();
//! for row in reader {
//!     match row {
//!         Ok(row) => println!("{}", row.record),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

use crate::io::record_format::{convert_fields, ParsedRow};
use crate::io::splitter::split_fields;
use crate::types::LoadError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Streaming reader over the data lines of a source
///
/// The first line is the header and is skipped. Blank lines are skipped.
#[derive(Debug)]
pub struct SyncReader<R> {
    lines: std::io::Lines<R>,
    line_num: u64,
}

impl SyncReader<BufReader<File>> {
    /// Open a file for streaming
    ///
    /// # Errors
    ///
    /// * `FileNotFound` if nothing exists at `path`
    /// * `Io` for any other open failure
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LoadError::file_not_found(path),
            _ => LoadError::from(e),
        })?;

        Ok(Self::from_reader(BufReader::with_capacity(8 * 1024, file)))
    }
}

impl<R: BufRead> SyncReader<R> {
    /// Wrap any buffered reader
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
        }
    }
}

impl<R: BufRead> Iterator for SyncReader<R> {
    type Item = Result<ParsedRow, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(LoadError::from(e))),
            };
            self.line_num += 1;

            if self.line_num == 1 || line.trim().is_empty() {
                continue;
            }

            let line_num = self.line_num;
            let fields = split_fields(line.trim_end_matches('\r'));
            return Some(
                convert_fields(&fields, line_num).map(|record| ParsedRow {
                    line: line_num,
                    record,
                }),
            );
        }
    }
}
