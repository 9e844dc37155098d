//! Offline evaluation utilities for recommender experiments
//!
//! Two tools share this library:
//!
//! - `aggregate-logs` scrapes RPrecision and nDCG@20 scores out of
//!   `CFPTest-<algorithm>-<tag>[-<parameter>].log` files into TSV tables.
//! - `compare-significance` runs a t-test on per-user metric values taken
//!   from two evaluator logs and prints the p-value.

pub mod aggregate;
pub mod config;
pub mod core;
pub mod discovery;
pub mod reporting;
pub mod significance;
pub mod ui;

// Re-export commonly used items
pub use aggregate::{AggregateReport, Aggregator, aggregate_directory};
pub use config::{CliConfig, Config, load_and_merge_config};
pub use crate::core::{EvalError, Result};
pub use crate::core::types::{
    Algorithm, AlgorithmFamily, LogRecord, PerformanceMap, RunScores, ScoreKind,
    SignificanceMetric, TestKind,
};
pub use significance::{Comparison, TTestOutcome, compare_files};
