//! Ordered index: an unbalanced binary search tree keyed by date ordinal
//!
//! Records are ordered by [`date_ordinal`](crate::types::date_ordinal). The
//! tree is never rebalanced, so insertion order decides its shape.
//!
//! # Duplicate Handling
//!
//! Records that share an ordinal are all kept. An equal key is pushed into
//! the right subtree, so ties enumerate in insertion order and `search`
//! returns the earliest inserted one.
//!
//! # Updates
//!
//! `update` replaces a node's payload in place. A payload whose ordinal
//! differs from the node key would break the ordering, so such updates are
//! carried out as delete followed by insert.

use crate::core::traits::{BinaryNode, RecordIndex};
use crate::core::traversal::{tree_height, InOrder};
use crate::types::{DateOrdinal, IndexError, Record};

const NAME: &str = "ordered";

/// Tree node owning one record and both subtrees
#[derive(Debug)]
pub struct OrderedNode {
    key: DateOrdinal,
    record: Record,
    left: Option<Box<OrderedNode>>,
    right: Option<Box<OrderedNode>>,
}

impl OrderedNode {
    fn new(key: DateOrdinal, record: Record) -> Self {
        OrderedNode {
            key,
            record,
            left: None,
            right: None,
        }
    }

    pub fn key(&self) -> DateOrdinal {
        self.key
    }
}

impl BinaryNode for OrderedNode {
    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    fn record(&self) -> &Record {
        &self.record
    }
}

/// Unbalanced BST over date ordinals
#[derive(Debug, Default)]
pub struct OrderedIndex {
    root: Option<Box<OrderedNode>>,
}

impl OrderedIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        OrderedIndex { root: None }
    }

    /// Insert a record under its date ordinal
    ///
    /// Equal ordinals descend right. Fails only when the record's date cannot
    /// be converted to an ordinal.
    pub fn insert(&mut self, record: Record) -> Result<(), IndexError> {
        let key = record
            .date_ordinal()
            .ok_or_else(|| IndexError::invalid_date(&record.date))?;

        let mut link = &mut self.root;
        while let Some(node) = link {
            link = if key < node.key {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *link = Some(Box::new(OrderedNode::new(key, record)));
        Ok(())
    }

    /// Find the first record stored under `key`
    pub fn search(&self, key: DateOrdinal) -> Option<&Record> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if key == node.key {
                return Some(&node.record);
            }
            current = if key < node.key {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
        }
        None
    }

    /// Find the first record for a `D/M/Y` date string
    pub fn search_date(&self, date: &str) -> Result<Option<&Record>, IndexError> {
        Ok(self.search(parse_ordinal(date)?))
    }

    /// Replace the payload of the first record stored under `key`
    ///
    /// The node is updated in place when `record` keeps the same ordinal.
    /// Otherwise the old node is deleted and `record` is inserted under its
    /// own ordinal, so the tree stays ordered.
    ///
    /// # Errors
    ///
    /// * `NotFound` if no record is stored under `key`
    /// * `InvalidDate` if `record.date` has no ordinal
    pub fn update(&mut self, key: DateOrdinal, record: Record) -> Result<(), IndexError> {
        let new_key = record
            .date_ordinal()
            .ok_or_else(|| IndexError::invalid_date(&record.date))?;

        if new_key != key {
            self.delete(key).ok_or_else(|| IndexError::not_found(key))?;
            tracing::debug!(from = key, to = new_key, "ordinal changed, re-inserting record");
            return self.insert(record);
        }

        let node = self
            .find_node_mut(key)
            .ok_or_else(|| IndexError::not_found(key))?;
        node.record = record;
        Ok(())
    }

    /// Set the `value` of the first record stored for `date`
    pub fn update_date(&mut self, date: &str, value: i64) -> Result<(), IndexError> {
        let key = parse_ordinal(date)?;
        let node = self
            .find_node_mut(key)
            .ok_or_else(|| IndexError::not_found(date))?;
        node.record.value = value;
        Ok(())
    }

    /// Remove the first record stored under `key` and return it
    ///
    /// - a leaf is unlinked directly
    /// - a node with one child is replaced by that child
    /// - a node with two children takes the payload of its in-order
    ///   successor, which is then unlinked from the right subtree
    pub fn delete(&mut self, key: DateOrdinal) -> Option<Record> {
        let mut link = &mut self.root;
        while link.as_ref().is_some_and(|node| node.key != key) {
            let node = link.as_mut()?;
            link = if key < node.key {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        let node = link.as_mut()?;
        if node.left.is_some() && node.right.is_some() {
            let successor = take_min(&mut node.right)?;
            node.key = successor.key;
            return Some(std::mem::replace(&mut node.record, successor.record));
        }

        let mut removed = link.take()?;
        *link = removed.left.take().or_else(|| removed.right.take());
        Some(removed.record)
    }

    /// Remove the first record stored for a `D/M/Y` date string
    pub fn delete_date(&mut self, date: &str) -> Result<Option<Record>, IndexError> {
        Ok(self.delete(parse_ordinal(date)?))
    }

    /// In-order iterator, ascending by date ordinal
    pub fn enumerate(&self) -> InOrder<'_, OrderedNode> {
        InOrder::new(self.root.as_deref())
    }

    /// Total node count, by full traversal
    pub fn count(&self) -> usize {
        self.enumerate().count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn height(&self) -> usize {
        tree_height(self.root.as_deref())
    }

    pub fn root(&self) -> Option<&OrderedNode> {
        self.root.as_deref()
    }

    fn find_node_mut(&mut self, key: DateOrdinal) -> Option<&mut OrderedNode> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            if key == node.key {
                return Some(node);
            }
            current = if key < node.key {
                node.left.as_deref_mut()
            } else {
                node.right.as_deref_mut()
            };
        }
        None
    }
}

/// Detach the leftmost node of a subtree, splicing its right child in place
fn take_min(mut link: &mut Option<Box<OrderedNode>>) -> Option<Box<OrderedNode>> {
    while link.as_ref()?.left.is_some() {
        link = &mut link.as_mut()?.left;
    }
    let mut min = link.take()?;
    *link = min.right.take();
    Some(min)
}

fn parse_ordinal(date: &str) -> Result<DateOrdinal, IndexError> {
    crate::types::date_ordinal(date).ok_or_else(|| IndexError::invalid_date(date))
}

impl RecordIndex for OrderedIndex {
    fn name(&self) -> &'static str {
        NAME
    }

    fn insert(&mut self, record: Record) -> Result<(), IndexError> {
        OrderedIndex::insert(self, record)
    }

    fn count(&self) -> usize {
        OrderedIndex::count(self)
    }

    fn is_empty(&self) -> bool {
        OrderedIndex::is_empty(self)
    }

    fn records(&self) -> Box<dyn Iterator<Item = &Record> + '_> {
        Box::new(self.enumerate())
    }
}

// Equal keys build long right spines; drop them without recursion.
impl Drop for OrderedIndex {
    fn drop(&mut self) {
        let mut pending: Vec<Box<OrderedNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::test_support::record;
    use crate::types::date_ordinal;
    use rstest::rstest;

    fn build(dates: &[&str]) -> OrderedIndex {
        let mut index = OrderedIndex::new();
        for (i, date) in dates.iter().enumerate() {
            index.insert(record(date, i as i64)).unwrap();
        }
        index
    }

    fn ordinals(index: &OrderedIndex) -> Vec<DateOrdinal> {
        index
            .enumerate()
            .map(|r| r.date_ordinal().unwrap())
            .collect()
    }

    #[test]
    fn test_new_index_is_empty() {
        let index = OrderedIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.count(), 0);
        assert_eq!(index.enumerate().next(), None);
        assert_eq!(index.search(1), None);
    }

    #[rstest]
    #[case::ascending(&["1/1/2010", "2/1/2010", "3/1/2010", "4/1/2010"])]
    #[case::descending(&["4/1/2010", "3/1/2010", "2/1/2010", "1/1/2010"])]
    #[case::mixed(&["15/6/2016", "1/1/2015", "30/12/2019", "2/2/2015", "7/7/2017"])]
    #[case::with_ties(&["2/1/2010", "1/1/2010", "2/1/2010", "3/1/2010", "2/1/2010"])]
    fn test_enumeration_is_sorted(#[case] dates: &[&str]) {
        let index = build(dates);
        let keys = ordinals(&index);
        assert_eq!(keys.len(), dates.len());
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_round_trip_keeps_every_record() {
        let dates: Vec<String> = (0..200)
            .map(|i| format!("{}/{}/{}", i % 28 + 1, i % 12 + 1, 2015 + i % 5))
            .collect();
        let mut index = OrderedIndex::new();
        for (i, date) in dates.iter().enumerate() {
            index.insert(record(date, i as i64)).unwrap();
        }

        let mut values: Vec<i64> = index.enumerate().map(|r| r.value).collect();
        values.sort_unstable();
        assert_eq!(values, (0..200).collect::<Vec<_>>());
        assert_eq!(index.count(), 200);
    }

    #[test]
    fn test_enumeration_is_restartable() {
        let index = build(&["2/1/2010", "1/1/2010"]);
        assert_eq!(index.enumerate().count(), 2);
        assert_eq!(index.enumerate().count(), 2);
    }

    #[test]
    fn test_ties_go_right_and_keep_insertion_order() {
        let index = build(&["1/1/2010", "1/1/2010", "1/1/2010"]);
        let root = index.root().unwrap();
        assert!(root.left().is_none());
        assert!(root.right().is_some());

        let values: Vec<i64> = index.enumerate().map(|r| r.value).collect();
        assert_eq!(values, vec![0, 1, 2]);
        assert_eq!(index.search(1).unwrap().value, 0);
    }

    #[test]
    fn test_search_hits_and_misses() {
        let index = build(&["5/1/2010", "2/1/2010", "9/1/2010"]);
        assert_eq!(index.search(2).unwrap().date, "2/1/2010");
        assert_eq!(index.search(9).unwrap().date, "9/1/2010");
        assert!(index.search(4).is_none());
        assert_eq!(
            index.search_date("05/01/2010").unwrap().unwrap().date,
            "5/1/2010"
        );
        assert!(matches!(
            index.search_date("garbage"),
            Err(IndexError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_insert_rejects_bad_date() {
        let mut index = OrderedIndex::new();
        let result = index.insert(record("not-a-date", 1));
        assert_eq!(result, Err(IndexError::invalid_date("not-a-date")));
        assert!(index.is_empty());
    }

    #[rstest]
    #[case::leaf(&["5/1/2010", "2/1/2010", "9/1/2010"], "2/1/2010")]
    #[case::root_with_two_children(&["5/1/2010", "2/1/2010", "9/1/2010", "7/1/2010"], "5/1/2010")]
    #[case::one_child(&["5/1/2010", "2/1/2010", "1/1/2010"], "2/1/2010")]
    #[case::only_node(&["5/1/2010"], "5/1/2010")]
    #[case::successor_deep(
        &["10/1/2010", "5/1/2010", "20/1/2010", "15/1/2010", "25/1/2010", "12/1/2010", "13/1/2010"],
        "10/1/2010"
    )]
    fn test_delete_shrinks_count(#[case] dates: &[&str], #[case] target: &str) {
        let mut index = build(dates);
        let before = index.count();
        let removed = index.delete_date(target).unwrap();

        assert_eq!(removed.unwrap().date, target);
        assert_eq!(index.count(), before - 1);
        assert!(index.search_date(target).unwrap().is_none());

        let keys = ordinals(&index);
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_delete_missing_key_is_noop() {
        let mut index = build(&["5/1/2010", "2/1/2010"]);
        assert!(index.delete(date_ordinal("3/1/2010").unwrap()).is_none());
        assert_eq!(index.count(), 2);

        let mut empty = OrderedIndex::new();
        assert!(empty.delete(1).is_none());
    }

    #[test]
    fn test_delete_one_of_several_ties() {
        let mut index = build(&["1/1/2010", "1/1/2010", "1/1/2010"]);
        assert_eq!(index.delete(1).unwrap().value, 0);
        assert_eq!(index.count(), 2);
        assert_eq!(index.search(1).unwrap().value, 1);
    }

    #[test]
    fn test_update_in_place_keeps_shape() {
        let mut index = build(&["5/1/2010", "2/1/2010", "9/1/2010"]);
        let height = index.height();
        let key = date_ordinal("2/1/2010").unwrap();

        let mut changed = index.search(key).unwrap().clone();
        changed.value = 999;
        changed.country = "China".to_string();
        index.update(key, changed.clone()).unwrap();

        assert_eq!(index.search(key), Some(&changed));
        assert_eq!(index.height(), height);
        assert_eq!(index.count(), 3);
    }

    #[test]
    fn test_update_with_new_date_reinserts() {
        let mut index = build(&["5/1/2010", "2/1/2010", "9/1/2010"]);
        let old_key = date_ordinal("2/1/2010").unwrap();

        index.update(old_key, record("20/1/2010", 77)).unwrap();

        assert!(index.search(old_key).is_none());
        assert_eq!(index.search(20).unwrap().value, 77);
        assert_eq!(index.count(), 3);
        assert_eq!(ordinals(&index), vec![5, 9, 20]);
    }

    #[test]
    fn test_update_missing_key() {
        let mut index = build(&["5/1/2010"]);
        assert_eq!(
            index.update(3, record("3/1/2010", 1)),
            Err(IndexError::not_found(3))
        );
        assert_eq!(
            index.update_date("3/1/2010", 1),
            Err(IndexError::not_found("3/1/2010"))
        );
    }

    #[test]
    fn test_update_date_sets_value() {
        let mut index = build(&["5/1/2010", "2/1/2010"]);
        index.update_date("2/1/2010", 123).unwrap();
        assert_eq!(index.search(2).unwrap().value, 123);
    }

    #[test]
    fn test_deep_spine_drops_without_overflow() {
        let mut index = OrderedIndex::new();
        for i in 0..10_000 {
            index.insert(record("1/1/2015", i)).unwrap();
        }
        assert_eq!(index.count(), 10_000);
        drop(index);
    }
}
