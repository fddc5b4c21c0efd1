// CLI module
// Command-line interface, argument parsing and the interactive menu

mod args;
pub mod menu;

pub use args::{CliArgs, IndexKind, ParserType};
pub use menu::run_menu;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing input path, or `--help`),
/// clap prints an error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
