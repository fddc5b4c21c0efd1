//! Benchmark suite for loading datasets into each index
//!
//! Compares the three index structures and the two parsers using the divan
//! benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```
//!
//! # Benchmark Fixtures
//!
//! - `benchmark_small.csv` - Small dataset (100 records)
//! - `benchmark_medium.csv` - Medium dataset (5,000 records)
//!
//! Dates are shuffled so the ordered index stays reasonably shallow, and
//! about a third of the commodities are quoted fields containing commas.

use effects_index::cli::{IndexKind, ParserType};
use effects_index::core::{AnyIndex, IndexConfig};
use effects_index::strategy::create_strategy;
use std::path::Path;

fn main() {
    divan::main();
}

fn load(kind: IndexKind, parser: ParserType, fixture: &str) -> AnyIndex {
    let mut index = AnyIndex::new(&IndexConfig::new(kind, 11));
    create_strategy(parser)
        .load(Path::new(fixture), index.as_index_mut())
        .expect("Loading failed");
    index
}

const SMALL: &str = "benches/fixtures/benchmark_small.csv";
const MEDIUM: &str = "benches/fixtures/benchmark_medium.csv";

/// Ordered index, line splitter, small dataset
#[divan::bench]
fn ordered_split_small() -> AnyIndex {
    load(IndexKind::Ordered, ParserType::Split, SMALL)
}

/// Ordered index, line splitter, medium dataset
#[divan::bench]
fn ordered_split_medium() -> AnyIndex {
    load(IndexKind::Ordered, ParserType::Split, MEDIUM)
}

/// Ordered index, csv crate, medium dataset
#[divan::bench]
fn ordered_csv_medium() -> AnyIndex {
    load(IndexKind::Ordered, ParserType::Csv, MEDIUM)
}

/// Balanced index, line splitter, small dataset
#[divan::bench]
fn balanced_split_small() -> AnyIndex {
    load(IndexKind::Balanced, ParserType::Split, SMALL)
}

/// Balanced index, line splitter, medium dataset
#[divan::bench]
fn balanced_split_medium() -> AnyIndex {
    load(IndexKind::Balanced, ParserType::Split, MEDIUM)
}

/// Hashed index, line splitter, small dataset
#[divan::bench]
fn hashed_split_small() -> AnyIndex {
    load(IndexKind::Hashed, ParserType::Split, SMALL)
}

/// Hashed index, line splitter, medium dataset
#[divan::bench]
fn hashed_split_medium() -> AnyIndex {
    load(IndexKind::Hashed, ParserType::Split, MEDIUM)
}

/// Balanced extremal lookups on a loaded medium dataset
#[divan::bench]
fn balanced_extremal_lookup(bencher: divan::Bencher) {
    let index = load(IndexKind::Balanced, ParserType::Split, MEDIUM);
    let AnyIndex::Balanced(tree) = &index else {
        unreachable!("balanced index requested");
    };

    bencher.bench_local(|| {
        let max = tree.max_value_node().expect("non-empty");
        let min = tree.min_value_node().expect("non-empty");
        (max.value, min.value)
    });
}

/// Hashed search over every date of a loaded medium dataset
#[divan::bench]
fn hashed_search_all(bencher: divan::Bencher) {
    let index = load(IndexKind::Hashed, ParserType::Split, MEDIUM);
    let AnyIndex::Hashed(table) = &index else {
        unreachable!("hashed index requested");
    };
    let dates: Vec<String> = table.enumerate().map(|r| r.date.clone()).collect();

    bencher.bench_local(|| dates.iter().filter(|d| table.search(d).is_some()).count());
}
