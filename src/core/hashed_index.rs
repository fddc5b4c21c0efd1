//! Hashed index: a fixed-size table of collision chains keyed by date
//!
//! The bucket of a date is the sum of its character codes modulo the bucket
//! count ([`MOD`] by default). This is a deliberately weak hash, so
//! collisions are common and resolved by chaining: each bucket holds a
//! singly linked list of records in insertion order.
//!
//! # Duplicate Handling
//!
//! No duplicate check is made. Inserting the same date twice yields two
//! chain entries; `search`, `update` and `delete` act on the earliest one.

use crate::core::traits::RecordIndex;
use crate::types::{IndexError, Record};

/// Default number of buckets
pub const MOD: usize = 11;

const NAME: &str = "hashed";

/// Additive character-sum hash of `key` into `[0, MOD)`
///
/// ```
/// use effects_index::core::hashed_index::hash;
///
/// assert_eq!(hash("A"), 10); // 65 % 11
/// assert_eq!(hash("L"), 10); // 76 % 11
/// ```
pub fn hash(key: &str) -> usize {
    hash_with(key, MOD)
}

/// Additive character-sum hash of `key` into `[0, buckets)`
pub fn hash_with(key: &str, buckets: usize) -> usize {
    key.chars()
        .fold(0usize, |sum, c| (sum + c as usize % buckets) % buckets)
}

/// Chain node owning one record and the rest of the chain
#[derive(Debug)]
struct ChainNode {
    record: Record,
    next: Option<Box<ChainNode>>,
}

/// Chained hash table over date strings
#[derive(Debug)]
pub struct HashedIndex {
    buckets: Vec<Option<Box<ChainNode>>>,
}

impl HashedIndex {
    /// Create an empty table with [`MOD`] buckets
    pub fn new() -> Self {
        Self::with_buckets(MOD)
    }

    /// Create an empty table with `buckets` chains (zero falls back to [`MOD`])
    pub fn with_buckets(buckets: usize) -> Self {
        let buckets = if buckets == 0 { MOD } else { buckets };
        HashedIndex {
            buckets: std::iter::repeat_with(|| None).take(buckets).collect(),
        }
    }

    /// Number of buckets in the table
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket a date string hashes to
    pub fn bucket_of(&self, date: &str) -> usize {
        hash_with(date, self.buckets.len())
    }

    /// Append a record to the tail of its bucket's chain
    pub fn insert(&mut self, record: Record) {
        let bucket = self.bucket_of(&record.date);
        let mut link = &mut self.buckets[bucket];
        while let Some(node) = link {
            link = &mut node.next;
        }
        *link = Some(Box::new(ChainNode { record, next: None }));
    }

    /// Earliest inserted record with exactly this date
    pub fn search(&self, date: &str) -> Option<&Record> {
        self.chain(self.bucket_of(date)).find(|r| r.date == date)
    }

    /// Replace the `value` of the earliest record with this date
    ///
    /// Every other field of the record is left untouched.
    pub fn update(&mut self, date: &str, value: i64) -> Result<(), IndexError> {
        let bucket = self.bucket_of(date);
        let mut current = self.buckets[bucket].as_deref_mut();
        while let Some(node) = current {
            if node.record.date == date {
                node.record.value = value;
                return Ok(());
            }
            current = node.next.as_deref_mut();
        }
        Err(IndexError::not_found(date))
    }

    /// Unlink and return the earliest record with this date
    pub fn delete(&mut self, date: &str) -> Option<Record> {
        let bucket = self.bucket_of(date);
        let mut link = &mut self.buckets[bucket];
        while link.as_ref().is_some_and(|node| node.record.date != date) {
            link = &mut link.as_mut()?.next;
        }
        let mut removed = link.take()?;
        *link = removed.next.take();
        Some(removed.record)
    }

    /// Records of one bucket, head to tail
    pub fn chain(&self, bucket: usize) -> Chain<'_> {
        Chain {
            next: self.buckets.get(bucket).and_then(|head| head.as_deref()),
        }
    }

    /// Length of every chain, in bucket order
    pub fn chain_lengths(&self) -> Vec<usize> {
        (0..self.buckets.len())
            .map(|bucket| self.chain(bucket).count())
            .collect()
    }

    /// All records, bucket by bucket, each chain head to tail
    pub fn enumerate(&self) -> impl Iterator<Item = &Record> + '_ {
        (0..self.buckets.len()).flat_map(move |bucket| self.chain(bucket))
    }

    /// Total record count, by walking every chain
    pub fn count(&self) -> usize {
        self.enumerate().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Option::is_none)
    }
}

impl Default for HashedIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over one collision chain
pub struct Chain<'a> {
    next: Option<&'a ChainNode>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(&node.record)
    }
}

impl RecordIndex for HashedIndex {
    fn name(&self) -> &'static str {
        NAME
    }

    fn insert(&mut self, record: Record) -> Result<(), IndexError> {
        HashedIndex::insert(self, record);
        Ok(())
    }

    fn count(&self) -> usize {
        HashedIndex::count(self)
    }

    fn is_empty(&self) -> bool {
        HashedIndex::is_empty(self)
    }

    fn records(&self) -> Box<dyn Iterator<Item = &Record> + '_> {
        Box::new(self.enumerate())
    }
}

impl Drop for HashedIndex {
    fn drop(&mut self) {
        for head in &mut self.buckets {
            let mut next = head.take();
            while let Some(mut node) = next {
                next = node.next.take();
            }
        }
    }
}
