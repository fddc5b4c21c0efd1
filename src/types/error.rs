//! Error types for the effects index
//!
//! # Error Categories
//!
//! - **Load errors** ([`LoadError`]): unreadable source, wrong field count,
//!   malformed numeric columns. These are fatal and abort the whole load.
//! - **Index errors** ([`IndexError`]): missing keys, extremal queries on an
//!   empty index, unparseable dates. These are local and recoverable.

use thiserror::Error;

/// Recoverable error raised by an index operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// No record matches the requested key
    #[error("No record found for key {key}")]
    NotFound {
        /// The key as entered by the caller
        key: String,
    },

    /// Min/max was requested from an index holding no records
    #[error("The {index} index is empty")]
    EmptyIndex {
        /// Name of the index
        index: &'static str,
    },

    /// The date string cannot be turned into an ordinal
    #[error("Invalid date '{date}', expected D/M/Y")]
    InvalidDate {
        /// The offending date string
        date: String,
    },

    /// A record already holds the value an update moves to
    #[error("Value {value} is already taken by another record")]
    DuplicateValue {
        /// The contested value
        value: i64,
    },
}

impl IndexError {
    /// Create a NotFound error
    pub fn not_found(key: impl ToString) -> Self {
        IndexError::NotFound {
            key: key.to_string(),
        }
    }

    /// Create an EmptyIndex error
    pub fn empty_index(index: &'static str) -> Self {
        IndexError::EmptyIndex { index }
    }

    /// Create an InvalidDate error
    pub fn invalid_date(date: &str) -> Self {
        IndexError::InvalidDate {
            date: date.to_string(),
        }
    }

    /// Create a DuplicateValue error
    pub fn duplicate_value(value: i64) -> Self {
        IndexError::DuplicateValue { value }
    }
}

/// Fatal error raised while loading records into an index
///
/// Any load error aborts the run; no partially built index is kept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while reading the source
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// A data row does not have exactly ten fields
    #[error("Line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        /// 1-based line number in the source
        line: u64,
        /// Required field count
        expected: usize,
        /// Field count actually found
        found: usize,
    },

    /// A numeric column holds something that is not an integer
    #[error("Line {line}: invalid {field} '{value}'")]
    InvalidNumber {
        /// 1-based line number in the source
        line: u64,
        /// Column name
        field: &'static str,
        /// The raw text of the field
        value: String,
    },

    /// The CSV reader rejected the input
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The target index refused a record
    #[error("Line {line}: {source}")]
    Index {
        /// 1-based line number in the source
        line: u64,
        /// The index error
        source: IndexError,
    },
}

impl From<std::io::Error> for LoadError {
    fn from(error: std::io::Error) -> Self {
        LoadError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LoadError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LoadError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

impl LoadError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &std::path::Path) -> Self {
        LoadError::FileNotFound {
            path: path.display().to_string(),
        }
    }

    /// Create a FieldCount error
    pub fn field_count(line: u64, expected: usize, found: usize) -> Self {
        LoadError::FieldCount {
            line,
            expected,
            found,
        }
    }

    /// Create an InvalidNumber error
    pub fn invalid_number(line: u64, field: &'static str, value: &str) -> Self {
        LoadError::InvalidNumber {
            line,
            field,
            value: value.to_string(),
        }
    }

    /// Attach a line number to an index error
    pub fn index(line: u64, source: IndexError) -> Self {
        LoadError::Index { line, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::not_found(IndexError::not_found("3/1/2010"), "No record found for key 3/1/2010")]
    #[case::empty(IndexError::empty_index("balanced"), "The balanced index is empty")]
    #[case::invalid_date(IndexError::invalid_date("x"), "Invalid date 'x', expected D/M/Y")]
    #[case::duplicate_value(
        IndexError::duplicate_value(50),
        "Value 50 is already taken by another record"
    )]
    fn test_index_error_display(#[case] error: IndexError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::file_not_found(
        LoadError::FileNotFound { path: "effects.csv".to_string() },
        "File not found: effects.csv"
    )]
    #[case::io(
        LoadError::Io { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::field_count(LoadError::field_count(4, 10, 9), "Line 4: expected 10 fields, found 9")]
    #[case::invalid_number(
        LoadError::invalid_number(7, "Value", "abc"),
        "Line 7: invalid Value 'abc'"
    )]
    #[case::parse_with_line(
        LoadError::Parse { line: Some(42), message: "bad quote".to_string() },
        "CSV parse error at line 42: bad quote"
    )]
    #[case::parse_without_line(
        LoadError::Parse { line: None, message: "bad quote".to_string() },
        "CSV parse error: bad quote"
    )]
    #[case::index(
        LoadError::index(3, IndexError::invalid_date("??")),
        "Line 3: Invalid date '??', expected D/M/Y"
    )]
    fn test_load_error_display(#[case] error: LoadError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LoadError = io_error.into();
        assert!(matches!(error, LoadError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
