use clap::Parser;
use recsys_eval::config::load_and_merge_config;
use recsys_eval::core::types::{SignificanceMetric, TestKind};
use recsys_eval::reporting::logging;
use recsys_eval::significance::compare_files;
use recsys_eval::ui::output;
use recsys_eval::ui::{CompareCli, compare_cli_to_config};

use std::path::Path;

fn main() {
    let cli = CompareCli::parse();

    match run_compare_logic(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Main comparison logic extracted from main() for testing
pub fn run_compare_logic(cli: &CompareCli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = compare_cli_to_config(cli);
    logging::init_logger(cli_config.verbose, cli_config.quiet);

    let config = load_and_merge_config(&cli_config).inspect_err(|e| {
        logging::log_error("Could not load configuration", Some(e));
    })?;
    if config.verbose.unwrap_or(false) {
        logging::enable_verbose();
    }

    let metric: SignificanceMetric = cli.metric.parse()?;
    let kind: TestKind = cli.test.parse()?;

    let comparison = compare_files(Path::new(&cli.first), Path::new(&cli.second), metric, kind)?;
    logging::log_comparison(&comparison);

    output::display_comparison(&comparison, config.output_format())?;
    Ok(0)
}
