use crate::aggregate::AggregateReport;
use crate::config::Config;
use crate::significance::Comparison;
use log::{LevelFilter, debug, error, info, warn};
use std::path::Path;

/// Logger writing to stderr without timestamps or module paths.
///
/// `env_filters` (the `RUST_LOG` syntax) replace the default of letting
/// everything up to debug through; `quiet` turns the logger off.
fn logger_builder(quiet: bool, env_filters: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    match env_filters {
        _ if quiet => builder.filter_level(LevelFilter::Off),
        Some(filters) => builder.parse_filters(filters),
        None => builder.filter_level(LevelFilter::Debug),
    };
    builder
}

/// Level let through the `log` facade.
///
/// `quiet` silences everything; otherwise `RUST_LOG` wins over the
/// verbosity flag.
pub fn max_level(
    verbose: bool,
    quiet: bool,
    env_filters: Option<&str>,
    logger_filter: LevelFilter,
) -> LevelFilter {
    if quiet {
        LevelFilter::Off
    } else if env_filters.is_some() {
        logger_filter
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Initialize the logger with appropriate level based on verbosity
///
/// Warnings are shown unless `quiet`; `verbose` adds debug output.
pub fn init_logger(verbose: bool, quiet: bool) {
    let env_filters = std::env::var(env_logger::DEFAULT_FILTER_ENV).ok();
    let logger = logger_builder(quiet, env_filters.as_deref()).build();
    let level = max_level(verbose, quiet, env_filters.as_deref(), logger.filter());

    // A second call in the same process keeps the first logger
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }

    debug!("Logger initialized with level: {level:?}");
}

/// Raise the facade to debug, e.g. for `verbose = true` in a config file.
///
/// Has no effect when logging is off or `RUST_LOG` chose the levels.
pub fn enable_verbose() {
    if log::max_level() != LevelFilter::Off
        && std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_none()
    {
        log::set_max_level(LevelFilter::Debug);
    }
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: output_dir={}, log_prefix={}, format={}",
        config.output_dir_path().display(),
        config.log_prefix(),
        config.output_format()
    );
    info!(
        "Display: show_progress={}, verbose={}",
        config.show_progress.unwrap_or(true),
        config.verbose.unwrap_or(false)
    );
}

/// Log file processing information
pub fn log_file_info<P: AsRef<Path>>(file_count: usize, files: &[P]) {
    info!("Processing {file_count} file(s)");
    for (i, file) in files.iter().enumerate() {
        debug!("  {}. {}", i + 1, file.as_ref().display());
    }
}

/// Log aggregation completion
pub fn log_aggregate_complete(report: &AggregateReport, duration_ms: u128) {
    info!(
        "Aggregation complete: {} baseline and {} parameterized run(s), {} table(s) written ({}ms)",
        report.baseline_runs,
        report.parameterized_runs,
        report.tables.len(),
        duration_ms
    );
    for name in &report.skipped {
        debug!("Skipped {name}");
    }
}

/// Log the outcome of a significance test
pub fn log_comparison(comparison: &Comparison) {
    info!(
        "{} {} t-test over {}/{} users: t={}, df={}, p={}",
        comparison.metric,
        comparison.test,
        comparison.users_first,
        comparison.users_second,
        comparison.outcome.statistic,
        comparison.outcome.df,
        comparison.outcome.p_value
    );
    if comparison.outcome.p_value.is_nan() {
        warn!("p-value is undefined for these samples");
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
