//! User interface and interaction
//!
//! CLI parsing, output formatting and progress reporting for both binaries.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used items
pub use cli::{AggregateCli, CompareCli, aggregate_cli_to_config, compare_cli_to_config};
pub use progress::ProgressReporter;
