//! Run-log aggregation
//!
//! Scrapes the summary scores out of every experiment log in a directory
//! and writes one TSV table per algorithm and score kind.

pub mod aggregator;
pub mod table;

use std::path::Path;

use log::debug;

use crate::config::Config;
use crate::core::error::Result;
use crate::core::types::LogRecord;
use crate::discovery::{extract_run_scores, file_name_str, list_log_files};
use crate::reporting::logging;
use crate::ui::ProgressReporter;

// Re-export commonly used items
pub use aggregator::{Aggregator, WrittenTable};
pub use table::{MetricTable, format_score, read_tsv, write_tsv};

/// Outcome of scanning one log directory
#[derive(Debug, Clone, Default)]
pub struct AggregateReport {
    pub files_scanned: usize,
    pub baseline_runs: usize,
    pub parameterized_runs: usize,
    /// Files that are not experiment logs of a known algorithm
    pub skipped: Vec<String>,
    pub tables: Vec<WrittenTable>,
}

/// Scan `log_dir`, aggregate every run and write the tables.
///
/// The first unreadable or malformed log aborts the run.
pub fn aggregate_directory(
    log_dir: &Path,
    config: &Config,
    mut progress: Option<&mut ProgressReporter>,
) -> Result<AggregateReport> {
    let files = list_log_files(log_dir)?;
    logging::log_file_info(files.len(), &files);
    let mut report = AggregateReport {
        files_scanned: files.len(),
        ..Default::default()
    };

    if let Some(progress) = progress.as_deref_mut() {
        progress.start_file_processing(files.len());
    }

    let mut aggregator = Aggregator::new();
    for (i, path) in files.iter().enumerate() {
        if let Some(progress) = progress.as_deref() {
            progress.update_file_progress(i + 1);
        }

        let Some(file_name) = file_name_str(path) else {
            report.skipped.push(path.display().to_string());
            continue;
        };
        let Some(record) = LogRecord::parse(file_name, config.log_prefix())? else {
            debug!("Skipping {file_name}");
            report.skipped.push(file_name.to_string());
            continue;
        };

        let scores = extract_run_scores(path)?;
        aggregator.add(&record, scores)?;
        if record.algorithm.is_baseline() {
            report.baseline_runs += 1;
        }
    }
    report.parameterized_runs = aggregator.run_count();

    if let Some(progress) = progress.as_deref() {
        progress.finish_file_processing();
    }

    report.tables = aggregator.write_all(&config.output_dir_path())?;
    Ok(report)
}
