//! Index selected for one run
//!
//! A deployment loads its records into exactly one of the three indexes.
//! [`AnyIndex`] holds whichever was chosen so the loader can feed it through
//! [`RecordIndex`] while the menu still reaches each variant's keyed
//! operations.

use crate::cli::IndexKind;
use crate::core::balanced_index::BalancedIndex;
use crate::core::hashed_index::{HashedIndex, MOD};
use crate::core::ordered_index::OrderedIndex;
use crate::core::traits::RecordIndex;

/// Configuration for building an index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Which structure to build
    pub kind: IndexKind,

    /// Bucket count, used by the hashed index only
    pub buckets: usize,
}

impl IndexConfig {
    /// Create a config; a zero bucket count falls back to the default
    pub fn new(kind: IndexKind, buckets: usize) -> Self {
        let buckets = if buckets == 0 {
            tracing::warn!("bucket count must be positive, using {}", MOD);
            MOD
        } else {
            buckets
        };
        IndexConfig { kind, buckets }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            kind: IndexKind::Ordered,
            buckets: MOD,
        }
    }
}

/// One of the three index structures
#[derive(Debug)]
pub enum AnyIndex {
    Ordered(OrderedIndex),
    Balanced(BalancedIndex),
    Hashed(HashedIndex),
}

impl AnyIndex {
    /// Build an empty index as described by `config`
    pub fn new(config: &IndexConfig) -> Self {
        match config.kind {
            IndexKind::Ordered => AnyIndex::Ordered(OrderedIndex::new()),
            IndexKind::Balanced => AnyIndex::Balanced(BalancedIndex::new()),
            IndexKind::Hashed => AnyIndex::Hashed(HashedIndex::with_buckets(config.buckets)),
        }
    }

    pub fn kind(&self) -> IndexKind {
        match self {
            AnyIndex::Ordered(_) => IndexKind::Ordered,
            AnyIndex::Balanced(_) => IndexKind::Balanced,
            AnyIndex::Hashed(_) => IndexKind::Hashed,
        }
    }

    pub fn as_index(&self) -> &dyn RecordIndex {
        match self {
            AnyIndex::Ordered(index) => index,
            AnyIndex::Balanced(index) => index,
            AnyIndex::Hashed(index) => index,
        }
    }

    pub fn as_index_mut(&mut self) -> &mut dyn RecordIndex {
        match self {
            AnyIndex::Ordered(index) => index,
            AnyIndex::Balanced(index) => index,
            AnyIndex::Hashed(index) => index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::test_support::record;
    use rstest::rstest;

    #[rstest]
    #[case::ordered(IndexKind::Ordered, "ordered")]
    #[case::balanced(IndexKind::Balanced, "balanced")]
    #[case::hashed(IndexKind::Hashed, "hashed")]
    fn test_new_builds_requested_kind(#[case] kind: IndexKind, #[case] name: &str) {
        let index = AnyIndex::new(&IndexConfig::new(kind, MOD));
        assert_eq!(index.kind(), kind);
        assert_eq!(index.as_index().name(), name);
        assert!(index.as_index().is_empty());
    }

    #[rstest]
    fn test_insert_through_trait_object(
        #[values(IndexKind::Ordered, IndexKind::Balanced, IndexKind::Hashed)] kind: IndexKind,
    ) {
        let mut index = AnyIndex::new(&IndexConfig::new(kind, MOD));
        let target = index.as_index_mut();
        target.insert(record("2/1/2010", 2)).unwrap();
        target.insert(record("1/1/2010", 1)).unwrap();

        assert_eq!(index.as_index().count(), 2);
        assert_eq!(index.as_index().records().count(), 2);
    }

    #[test]
    fn test_hashed_uses_configured_buckets() {
        let index = AnyIndex::new(&IndexConfig::new(IndexKind::Hashed, 31));
        match index {
            AnyIndex::Hashed(table) => assert_eq!(table.bucket_count(), 31),
            other => panic!("expected hashed index, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_zero_buckets_fall_back() {
        assert_eq!(IndexConfig::new(IndexKind::Hashed, 0).buckets, MOD);
    }
}
