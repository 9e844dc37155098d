//! Significance testing between two evaluation runs
//!
//! Extracts per-user metric values from two evaluator logs and compares
//! them with a t-test.

pub mod reconcile;
pub mod ttest;

use std::path::Path;

use log::{debug, info};
use regex::Regex;
use serde::Serialize;

use crate::core::constants::significance;
use crate::core::error::{EvalError, Result};
use crate::core::types::{PerformanceMap, SignificanceMetric, TestKind};
use crate::discovery::read_performance_map;

// Re-export commonly used items
pub use reconcile::{ReconcileReport, reconcile};
pub use ttest::TTestOutcome;

/// Pattern for `INFO: <metric> for user <id> is <value>` lines.
pub fn user_metric_regex(metric: SignificanceMetric) -> Result<Regex> {
    let pattern = format!(
        r"INFO:\s*{}\s*for\s*user\s*(?P<user>\d+)\s*is\s*(?P<value>\S+)",
        regex::escape(metric.log_name())
    );
    Ok(Regex::new(&pattern)?)
}

/// `map1[k] - map2[k]` for every user of `map1`, in user order.
pub fn paired_differences(map1: &PerformanceMap, map2: &PerformanceMap) -> Result<Vec<f64>> {
    map1.iter()
        .map(|(user, value)| {
            map2.get(user)
                .map(|other| value - other)
                .ok_or(EvalError::MissingPairedUser(*user))
        })
        .collect()
}

/// Run the requested test on two reconciled maps.
pub fn run_test(kind: TestKind, map1: &PerformanceMap, map2: &PerformanceMap) -> Result<TTestOutcome> {
    match kind {
        TestKind::Independent => {
            let a: Vec<f64> = map1.values().copied().collect();
            let b: Vec<f64> = map2.values().copied().collect();
            ttest::independent(&a, &b)
        }
        TestKind::Paired => ttest::one_sample(&paired_differences(map1, map2)?, 0.0),
    }
}

/// Everything known about one comparison
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub metric: String,
    pub test: String,
    pub users_first: usize,
    pub users_second: usize,
    #[serde(flatten)]
    pub reconcile: ReconcileReport,
    #[serde(flatten)]
    pub outcome: TTestOutcome,
}

/// Read both logs, reconcile their users and test them.
pub fn compare_files(
    first: &Path,
    second: &Path,
    metric: SignificanceMetric,
    kind: TestKind,
) -> Result<Comparison> {
    let regex = user_metric_regex(metric)?;
    let mut map1 = read_performance_map(first, &regex)?;
    let mut map2 = read_performance_map(second, &regex)?;
    info!(
        "Read {} {metric} values from {} and {} from {}",
        map1.len(),
        first.display(),
        map2.len(),
        second.display()
    );

    let report = reconcile(&mut map1, &mut map2);
    let outcome = run_test(kind, &map1, &map2)?;
    debug!(
        "{kind} t-test: t={} df={} p={}",
        outcome.statistic, outcome.df, outcome.p_value
    );

    Ok(Comparison {
        metric: metric.to_string(),
        test: kind.to_string(),
        users_first: map1.len(),
        users_second: map2.len(),
        reconcile: report,
        outcome,
    })
}

/// Fixed six-decimal rendering of a p-value; non-finite values as `nan`/`inf`.
pub fn format_p_value(p_value: f64) -> String {
    if p_value.is_nan() {
        "nan".to_string()
    } else if p_value.is_infinite() {
        if p_value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{p_value:.prec$}", prec = significance::P_VALUE_PRECISION)
    }
}
