//! csv-crate load strategy

use crate::core::RecordIndex;
use crate::io::CsvReader;
use crate::strategy::{load_rows, LoadSummary, ParsingStrategy};
use crate::types::LoadError;
use std::path::Path;

/// Loader that lets the `csv` crate handle quoting and field splitting
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvStrategy;

impl ParsingStrategy for CsvStrategy {
    fn load(
        &self,
        input_path: &Path,
        index: &mut dyn RecordIndex,
    ) -> Result<LoadSummary, LoadError> {
        tracing::debug!(path = %input_path.display(), "loading with csv reader");
        let reader = CsvReader::open(input_path)?;
        load_rows(reader, index)
    }
}
