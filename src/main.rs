//! Trade-effects index CLI
//!
//! Loads a trade-effects CSV file into the selected index and opens an
//! interactive menu on stdin/stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- effects.csv
//! cargo run -- --index balanced effects.csv
//! cargo run -- --index hashed --buckets 31 effects.csv
//! cargo run -- --parser csv --dump effects.csv > sorted.csv
//! ```
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG=debug` for
//! more detail.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, malformed row, etc.)

use effects_index::cli;
use effects_index::core::AnyIndex;
use effects_index::io::write_records_csv;
use effects_index::strategy;
use std::error::Error;
use std::io::{self, Write};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let args = cli::parse_args();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &cli::CliArgs) -> Result<(), Box<dyn Error>> {
    let mut index = AnyIndex::new(&args.to_index_config());
    let strategy = strategy::create_strategy(args.parser);

    let summary = strategy.load(&args.input_file, index.as_index_mut())?;

    let stdout = io::stdout();
    let mut output = stdout.lock();

    if args.dump {
        write_records_csv(index.as_index().records(), &mut output)?;
        return Ok(());
    }

    writeln!(
        output,
        "Loaded {} records ({} stored) in {}ms",
        summary.rows,
        summary.stored,
        summary.elapsed.as_millis()
    )?;
    cli::run_menu(&mut index, io::stdin().lock(), &mut output)?;
    Ok(())
}
