//! Core traits shared by the three index structures
//!
//! Each index is keyed differently (date ordinal, value, date string), so
//! keyed lookups stay inherent methods. This trait covers the surface every
//! index shares and is what the loaders feed.

use crate::types::{IndexError, Record};

/// Common surface of the ordered, balanced and hashed indexes
pub trait RecordIndex {
    /// Short name used in logs and messages
    fn name(&self) -> &'static str;

    /// Insert one record, applying the index's own duplicate policy
    fn insert(&mut self, record: Record) -> Result<(), IndexError>;

    /// Number of stored records, computed by a full traversal
    fn count(&self) -> usize;

    /// Whether the index holds no records
    fn is_empty(&self) -> bool;

    /// Every stored record in the index's natural enumeration order
    fn records(&self) -> Box<dyn Iterator<Item = &Record> + '_>;
}

/// Binary tree node that can be walked in order
pub trait BinaryNode {
    fn left(&self) -> Option<&Self>;
    fn right(&self) -> Option<&Self>;
    fn record(&self) -> &Record;
}
