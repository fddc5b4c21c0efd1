//! Trade-effects record indexing library
//! # Overview
//!
//! This library loads rows of a trade-effects dataset and holds them in one
//! of three index structures, each keyed differently, so the same records
//! can be browsed and edited interactively.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Record, date ordinal, errors)
//! - [`cli`] - CLI arguments parsing and the interactive menu
//! - [`core`] - The index structures:
//!   - [`core::ordered_index`] - Unbalanced binary search tree keyed by date ordinal
//!   - [`core::balanced_index`] - AVL tree keyed by value
//!   - [`core::hashed_index`] - Chained hash table keyed by the date string
//! - [`io`] - Field splitting, record conversion and CSV output
//! - [`strategy`] - Pluggable loaders (line splitter or csv crate)
//!
//! # Date Ordinal
//!
//! Dates are `D/M/Y` strings. The ordered index compares them through
//! `(year - 2010) * 365 + (month - 1) * 30 + day`, an order-preserving
//! linearization that ignores real month lengths.
//!
//! # Duplicate Policies
//!
//! - Ordered: equal dates are all kept, later ones to the right
//! - Balanced: a record whose value is already present is dropped
//! - Hashed: everything is kept, in insertion order per chain

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{AnyIndex, BalancedIndex, HashedIndex, IndexConfig, OrderedIndex, RecordIndex};
pub use io::write_records_csv;
pub use types::{date_ordinal, DateOrdinal, IndexError, LoadError, Record};
