use crate::core::hashed_index::MOD;
use crate::core::IndexConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Index trade-effect records and explore them interactively
#[derive(Parser, Debug)]
#[command(name = "effects-index")]
#[command(about = "Index trade-effect records and explore them interactively", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing effect records
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Index structure to load the records into
    #[arg(
        long = "index",
        value_name = "INDEX",
        default_value = "ordered",
        help = "Index: 'ordered' (by date), 'balanced' (by value) or 'hashed' (by date string)"
    )]
    pub index: IndexKind,

    /// Parser used to split input lines into fields
    #[arg(
        long = "parser",
        value_name = "PARSER",
        default_value = "split",
        help = "Parser: 'split' for the built-in line splitter or 'csv' for the csv crate"
    )]
    pub parser: ParserType,

    /// Number of buckets (hashed index only)
    #[arg(
        long = "buckets",
        value_name = "COUNT",
        help = "Number of hash buckets (default: 11)"
    )]
    pub buckets: Option<usize>,

    /// Print every record as CSV instead of starting the menu
    #[arg(long = "dump", help = "Write all records as CSV to stdout and exit")]
    pub dump: bool,
}

/// Available index structures
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum IndexKind {
    Ordered,
    Balanced,
    Hashed,
}

/// Available line parsers
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ParserType {
    Split,
    Csv,
}

impl CliArgs {
    /// Create an IndexConfig from CLI arguments
    ///
    /// A missing bucket count uses the default; zero is reported and
    /// replaced by the default as well.
    pub fn to_index_config(&self) -> IndexConfig {
        IndexConfig::new(self.index, self.buckets.unwrap_or(MOD))
    }
}
