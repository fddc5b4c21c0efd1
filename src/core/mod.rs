//! Core indexing module
//!
//! This module contains the three index structures and what they share:
//! - `traits` - the common [`RecordIndex`] surface
//! - `ordered_index` - unbalanced BST keyed by date ordinal
//! - `balanced_index` - AVL tree keyed by value
//! - `hashed_index` - chained hash table keyed by date string
//! - `traversal` - lazy in-order iteration over the trees
//! - `any_index` - the index selected for a run

pub mod any_index;
pub mod balanced_index;
pub mod hashed_index;
pub mod ordered_index;
pub mod traits;
pub mod traversal;

pub use any_index::{AnyIndex, IndexConfig};
pub use balanced_index::BalancedIndex;
pub use hashed_index::HashedIndex;
pub use ordered_index::OrderedIndex;
pub use traits::RecordIndex;
