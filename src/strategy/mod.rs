//! Loading strategy module
//!
//! Defines the Strategy pattern for loading a dataset into an index. Both
//! loaders read the same file format and apply the same record conversion;
//! they differ only in how a line is split into fields:
//!
//! - [`SplitStrategy`] runs the quote-aware state machine line by line
//! - [`CsvStrategy`] hands the file to the `csv` crate
//!
//! Any malformed row aborts the load.

use crate::cli::ParserType;
use crate::core::RecordIndex;
use crate::io::ParsedRow;
use crate::types::LoadError;
use std::path::Path;
use std::time::{Duration, Instant};

pub mod serde_csv;
pub mod split;

pub use serde_csv::CsvStrategy;
pub use split::SplitStrategy;

/// Outcome of a successful load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Data rows read from the source
    pub rows: usize,
    /// Records actually held by the index afterwards
    pub stored: usize,
    /// Wall time spent reading and inserting
    pub elapsed: Duration,
}

/// Loader trait for filling an index from a dataset file
pub trait ParsingStrategy: Send + Sync {
    /// Read every data row of `input_path` into `index`
    ///
    /// `stored` may be lower than `rows` when the index drops duplicates.
    ///
    /// # Errors
    ///
    /// Returns the first [`LoadError`] met: missing or unreadable file, a
    /// row with the wrong field count, a non-numeric Year, Value or
    /// Cumulative, or a record the index refuses.
    fn load(&self, input_path: &Path, index: &mut dyn RecordIndex)
        -> Result<LoadSummary, LoadError>;
}

/// Feed parsed rows into `index`, stopping at the first error
pub(crate) fn load_rows<I>(rows: I, index: &mut dyn RecordIndex) -> Result<LoadSummary, LoadError>
where
    I: Iterator<Item = Result<ParsedRow, LoadError>>,
{
    let started = Instant::now();
    let mut count = 0;

    for row in rows {
        let ParsedRow { line, record } = row?;
        tracing::trace!(line, date = %record.date, value = record.value, "inserting record");
        index
            .insert(record)
            .map_err(|e| LoadError::index(line, e))?;
        count += 1;
    }

    let summary = LoadSummary {
        rows: count,
        stored: index.count(),
        elapsed: started.elapsed(),
    };
    tracing::info!(
        index = index.name(),
        rows = summary.rows,
        stored = summary.stored,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "dataset loaded"
    );
    Ok(summary)
}

/// Create a loading strategy for the given parser type
pub fn create_strategy(parser: ParserType) -> Box<dyn ParsingStrategy> {
    match parser {
        ParserType::Split => Box::new(SplitStrategy),
        ParserType::Csv => Box::new(CsvStrategy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BalancedIndex, HashedIndex, OrderedIndex};
    use crate::types::IndexError;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONTENT: &str = "Direction,Year,Date,Weekday,Country,Commodity,Transport_Mode,Measure,Value,Cumulative\n\
        Exports,2015,1/1/2015,Thursday,All,All,All,$,100,100\n\
        Exports,2015,2/1/2015,Friday,All,\"Fish, crustaceans, and molluscs\",Sea,$,50,150\n\
        Imports,2015,3/1/2015,Saturday,China,All,Air,$,100,250\n";

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[rstest]
    fn test_load_counts_rows_and_stored(
        #[values(ParserType::Split, ParserType::Csv)] parser: ParserType,
    ) {
        let file = create_temp_csv(CONTENT);
        let strategy = create_strategy(parser);

        let mut ordered = OrderedIndex::new();
        let summary = strategy.load(file.path(), &mut ordered).unwrap();
        assert_eq!((summary.rows, summary.stored), (3, 3));

        let mut hashed = HashedIndex::new();
        let summary = strategy.load(file.path(), &mut hashed).unwrap();
        assert_eq!((summary.rows, summary.stored), (3, 3));

        // two rows share Value 100
        let mut balanced = BalancedIndex::new();
        let summary = strategy.load(file.path(), &mut balanced).unwrap();
        assert_eq!((summary.rows, summary.stored), (3, 2));
    }

    #[rstest]
    fn test_load_stops_at_first_bad_row(
        #[values(ParserType::Split, ParserType::Csv)] parser: ParserType,
    ) {
        let content = format!("{CONTENT}Exports,2015,4/1/2015,Sunday,All,All,All,$,lots,1\n");
        let file = create_temp_csv(&content);

        let mut index = OrderedIndex::new();
        let result = create_strategy(parser).load(file.path(), &mut index);
        assert_eq!(result, Err(LoadError::invalid_number(5, "Value", "lots")));
    }

    #[rstest]
    fn test_load_missing_file(#[values(ParserType::Split, ParserType::Csv)] parser: ParserType) {
        let mut index = HashedIndex::new();
        let result = create_strategy(parser).load(Path::new("nonexistent.csv"), &mut index);
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }

    #[test]
    fn test_index_rejection_reports_line() {
        let content = format!("{CONTENT}Exports,2015,someday,Sunday,All,All,All,$,7,1\n");
        let file = create_temp_csv(&content);

        let mut index = OrderedIndex::new();
        let result = SplitStrategy.load(file.path(), &mut index);
        assert_eq!(
            result,
            Err(LoadError::index(5, IndexError::invalid_date("someday")))
        );
    }

    #[test]
    fn test_strategies_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SplitStrategy>();
        assert_send_sync::<CsvStrategy>();
    }
}
