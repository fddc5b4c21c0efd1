//! Types module
//!
//! Contains core data structures used throughout the application:
//! - `record`: the dataset row and the date ordinal
//! - `error`: load and index error types

pub mod error;
pub mod record;

pub use error::{IndexError, LoadError};
pub use record::{date_ordinal, DateOrdinal, Record, FIELD_COUNT, HEADER};
