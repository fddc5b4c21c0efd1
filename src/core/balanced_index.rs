//! Balanced index: an AVL tree keyed by the record `value`
//!
//! Every node caches the height of its subtree, so the balance factor
//! `height(left) - height(right)` is available in O(1). After each insert
//! and delete the recursion unwinds bottom-up, refreshing heights and
//! rotating wherever the factor leaves `[-1, 1]`.
//!
//! # Duplicate Handling
//!
//! Values are unique. Inserting a record whose value is already present is a
//! no-op: the first insertion wins.

use crate::core::traits::{BinaryNode, RecordIndex};
use crate::core::traversal::InOrder;
use crate::types::{IndexError, Record};
use std::cmp::Ordering;

const NAME: &str = "balanced";

type Link = Option<Box<AvlNode>>;

/// AVL node owning one record, both subtrees and the cached subtree height
#[derive(Debug)]
pub struct AvlNode {
    record: Record,
    left: Link,
    right: Link,
    height: i32,
}

impl AvlNode {
    fn new(record: Record) -> Self {
        AvlNode {
            record,
            left: None,
            right: None,
            height: 1,
        }
    }

    fn key(&self) -> i64 {
        self.record.value
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn balance_factor(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }

    fn update_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }
}

impl BinaryNode for AvlNode {
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

fn height(link: &Link) -> i32 {
    link.as_ref().map_or(0, |node| node.height)
}

/// Rotate right around `node`; its left child becomes the subtree root
fn rotate_right(mut node: Box<AvlNode>) -> Box<AvlNode> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

/// Rotate left around `node`; its right child becomes the subtree root
fn rotate_left(mut node: Box<AvlNode>) -> Box<AvlNode> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// Insert below `link` and return the rebalanced subtree root
///
/// `inserted` is set when a new node was created.
fn insert_node(link: Link, record: Record, inserted: &mut bool) -> Box<AvlNode> {
    let Some(mut node) = link else {
        *inserted = true;
        return Box::new(AvlNode::new(record));
    };

    let key = record.value;
    match key.cmp(&node.key()) {
        Ordering::Less => node.left = Some(insert_node(node.left.take(), record, inserted)),
        Ordering::Greater => node.right = Some(insert_node(node.right.take(), record, inserted)),
        Ordering::Equal => return node,
    }

    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        let left_key = node.left.as_ref().map_or(key, |left| left.key());
        if key > left_key {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if balance < -1 {
        let right_key = node.right.as_ref().map_or(key, |right| right.key());
        if key < right_key {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }
    node
}

/// Restore balance at `node` after a deletion below it
///
/// Deletions have no inserted key to compare against, so the child's own
/// balance factor picks between the single and double rotations.
fn rebalance(mut node: Box<AvlNode>) -> Box<AvlNode> {
    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        if node.left.as_ref().is_some_and(|left| left.balance_factor() < 0) {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if balance < -1 {
        if node.right.as_ref().is_some_and(|right| right.balance_factor() > 0) {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }
    node
}

/// Remove `key` below `link`; returns the new subtree and the removed record
fn delete_node(link: Link, key: i64) -> (Link, Option<Record>) {
    let Some(mut node) = link else {
        return (None, None);
    };

    let removed = match key.cmp(&node.key()) {
        Ordering::Less => {
            let (left, removed) = delete_node(node.left.take(), key);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = delete_node(node.right.take(), key);
            node.right = right;
            removed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => return (None, Some(node.record)),
            (Some(child), None) | (None, Some(child)) => return (Some(child), Some(node.record)),
            (Some(left), Some(right)) => {
                let (right, successor) = take_min(right);
                node.left = Some(left);
                node.right = right;
                Some(std::mem::replace(&mut node.record, successor))
            }
        },
    };

    (Some(rebalance(node)), removed)
}

/// Detach the minimum of a non-empty subtree, rebalancing on the way up
fn take_min(mut node: Box<AvlNode>) -> (Link, Record) {
    match node.left.take() {
        None => (node.right.take(), node.record),
        Some(left) => {
            let (left, min) = take_min(left);
            node.left = left;
            (Some(rebalance(node)), min)
        }
    }
}

/// AVL tree over record values
#[derive(Debug, Default)]
pub struct BalancedIndex {
    root: Link,
}

impl BalancedIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        BalancedIndex { root: None }
    }

    /// Insert a record keyed on its value
    ///
    /// Returns `false` when a record with the same value already exists; the
    /// stored record is left untouched in that case.
    pub fn insert(&mut self, record: Record) -> bool {
        let mut inserted = false;
        let value = record.value;
        self.root = Some(insert_node(self.root.take(), record, &mut inserted));
        if !inserted {
            tracing::trace!(value, "duplicate value dropped");
        }
        inserted
    }

    /// Record with the given value, if any
    pub fn search(&self, value: i64) -> Option<&Record> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(&node.key()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.record),
            };
        }
        None
    }

    /// Replace the record stored under `value`
    ///
    /// When the new record keeps the same value the payload is swapped in
    /// place. Otherwise the old record is deleted and the new one inserted,
    /// which may rebalance the tree.
    ///
    /// # Errors
    ///
    /// * `NotFound` if no record is stored under `value`
    /// * `DuplicateValue` if the new value already belongs to another
    ///   record; the tree is left unchanged
    pub fn update(&mut self, value: i64, record: Record) -> Result<(), IndexError> {
        if record.value != value && self.search(record.value).is_some() {
            return Err(IndexError::duplicate_value(record.value));
        }
        if record.value == value {
            let node = self
                .find_node_mut(value)
                .ok_or_else(|| IndexError::not_found(value))?;
            node.record = record;
            return Ok(());
        }

        self.delete(value)
            .ok_or_else(|| IndexError::not_found(value))?;
        self.insert(record);
        Ok(())
    }

    /// Remove and return the record stored under `value`
    pub fn delete(&mut self, value: i64) -> Option<Record> {
        let (root, removed) = delete_node(self.root.take(), value);
        self.root = root;
        removed
    }

    /// Record with the smallest value
    pub fn min_value_node(&self) -> Result<&Record, IndexError> {
        let mut node = self
            .root
            .as_deref()
            .ok_or_else(|| IndexError::empty_index(NAME))?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(&node.record)
    }

    /// Record with the largest value
    pub fn max_value_node(&self) -> Result<&Record, IndexError> {
        let mut node = self
            .root
            .as_deref()
            .ok_or_else(|| IndexError::empty_index(NAME))?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(&node.record)
    }

    /// Every record whose date equals `date`, by full traversal
    pub fn records_with_date(&self, date: &str) -> Vec<&Record> {
        self.enumerate().filter(|r| r.date == date).collect()
    }

    /// In-order iterator, ascending by value
    pub fn enumerate(&self) -> InOrder<'_, AvlNode> {
        InOrder::new(self.root.as_deref())
    }

    /// Total node count, by full traversal
    pub fn count(&self) -> usize {
        self.enumerate().count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree, read from the root's cached height
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    pub fn root(&self) -> Option<&AvlNode> {
        self.root.as_deref()
    }

    fn find_node_mut(&mut self, value: i64) -> Option<&mut AvlNode> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match value.cmp(&node.key()) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }
}

impl RecordIndex for BalancedIndex {
    fn name(&self) -> &'static str {
        NAME
    }

    fn insert(&mut self, record: Record) -> Result<(), IndexError> {
        BalancedIndex::insert(self, record);
        Ok(())
    }

    fn count(&self) -> usize {
        BalancedIndex::count(self)
    }

    fn is_empty(&self) -> bool {
        BalancedIndex::is_empty(self)
    }

    fn records(&self) -> Box<dyn Iterator<Item = &Record> + '_> {
        Box::new(self.enumerate())
    }
}
