use clap::Parser;
use recsys_eval::aggregate::{AggregateReport, aggregate_directory};
use recsys_eval::config::{Config, load_and_merge_config};
use recsys_eval::reporting::logging;
use recsys_eval::ui::output;
use recsys_eval::ui::{AggregateCli, ProgressReporter, aggregate_cli_to_config};

use std::path::Path;
use std::time::Instant;

fn main() {
    let cli = AggregateCli::parse();

    match run_aggregate_logic(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Main aggregation logic extracted from main() for testing
pub fn run_aggregate_logic(cli: &AggregateCli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = aggregate_cli_to_config(cli);
    logging::init_logger(cli_config.verbose, cli_config.quiet);

    let config = load_and_merge_config(&cli_config).inspect_err(|e| {
        logging::log_error("Could not load configuration", Some(e));
    })?;
    if config.verbose.unwrap_or(false) {
        logging::enable_verbose();
    }
    logging::log_config_info(&config);

    let mut progress = create_progress_reporter(&config);
    let started = Instant::now();
    let report = aggregate_directory(Path::new(&cli.log_dir), &config, progress.as_mut())?;
    logging::log_aggregate_complete(&report, started.elapsed().as_millis());

    display_final_results(&report, cli_config.quiet);
    Ok(0)
}

/// Progress bar over log files unless disabled by config or flags
pub fn create_progress_reporter(config: &Config) -> Option<ProgressReporter> {
    if config.show_progress.unwrap_or(true) {
        Some(ProgressReporter::new(true))
    } else {
        None
    }
}

pub fn display_final_results(report: &AggregateReport, quiet: bool) {
    if !quiet {
        output::display_aggregate_summary(report);
    }
}
