//! Line-splitting load strategy
//!
//! Streams the file through [`SyncReader`], which splits each line with the
//! quote-aware field state machine. This is the default loader.

use crate::core::RecordIndex;
use crate::io::SyncReader;
use crate::strategy::{load_rows, LoadSummary, ParsingStrategy};
use crate::types::LoadError;
use std::path::Path;

/// Loader built on the quote-aware line splitter
///
/// ```no_run
/// use effects_index::core::OrderedIndex;
/// use effects_index::strategy::{ParsingStrategy, SplitStrategy};
/// use std::path::Path;
///
/// let mut index = OrderedIndex::new();
/// let summary = SplitStrategy
///     .load(Path::new("effects.csv"), &mut index)
///     .expect("load failed");
/// println!("{} records", summary.stored);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitStrategy;

impl ParsingStrategy for SplitStrategy {
    fn load(
        &self,
        input_path: &Path,
        index: &mut dyn RecordIndex,
    ) -> Result<LoadSummary, LoadError> {
        tracing::debug!(path = %input_path.display(), "loading with line splitter");
        let reader = SyncReader::open(input_path)?;
        load_rows(reader, index)
    }
}
