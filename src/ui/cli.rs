// Command-line interface definitions for the two recsys-eval binaries

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use clap::Parser;

/// Collect RPrecision and nDCG@20 scores from experiment logs into TSV tables
#[derive(Parser, Debug)]
#[command(name = "aggregate-logs", author, version, about, long_about = None)]
pub struct AggregateCli {
    /// Directory holding the experiment logs
    pub log_dir: String,

    // Output
    /// Directory the TSV tables are written to (default: current directory)
    #[arg(short = 'o', long, value_name = "DIR", help_heading = "Output")]
    pub output_dir: Option<String>,

    // Output & Verbosity
    /// Suppress progress and summary output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable progress bars
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Test whether two evaluation runs differ significantly on a per-user metric
#[derive(Parser, Debug)]
#[command(name = "compare-significance", author, version, about, long_about = None)]
pub struct CompareCli {
    /// Evaluator output of the first run
    pub first: String,

    /// Evaluator output of the second run
    pub second: String,

    /// Per-user metric to compare (Precision, Recall, RPrecision, NDCG, RNDCG)
    pub metric: String,

    /// t-test to run (ind, 1samp)
    pub test: String,

    // Output & Verbosity
    /// Output format
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Suppress warnings
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Convert aggregate arguments to CliConfig
pub fn aggregate_cli_to_config(cli: &AggregateCli) -> CliConfig {
    CliConfig {
        output_dir: cli.output_dir.clone(),
        output_format: None,
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_progress: cli.no_progress,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}

/// Convert compare arguments to CliConfig
pub fn compare_cli_to_config(cli: &CompareCli) -> CliConfig {
    CliConfig {
        output_dir: None,
        output_format: cli.format.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_progress: true,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}
