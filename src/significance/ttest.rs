// Student t-tests over per-user metric samples.
//
// Follows the usual SciPy conventions: `independent` pools the variance of
// both samples, `one_sample` tests the mean against a population mean, and
// both report a two-sided p-value.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::core::error::{EvalError, Result};

/// Result of a t-test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TTestOutcome {
    /// t-statistic value
    pub statistic: f64,
    /// Degrees of freedom
    pub df: f64,
    /// Two-sided p-value
    pub p_value: f64,
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sum of squared deviations from the mean
fn sum_of_squares(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|v| (v - mean).powi(2)).sum()
}

/// Two-sided p-value of `statistic` under Student's t with `df` degrees of freedom.
fn two_sided_p_value(statistic: f64, df: f64) -> Result<f64> {
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| EvalError::Statistics(e.to_string()))?;
    Ok((2.0 * dist.sf(statistic.abs())).min(1.0))
}

/// Turn a mean difference and its standard error into an outcome.
///
/// A zero difference is never significant, whatever the spread. A nonzero
/// difference needs at least one degree of freedom; with zero spread it is
/// infinitely significant.
fn outcome(difference: f64, standard_error: f64, df: f64) -> Result<TTestOutcome> {
    if difference == 0.0 {
        return Ok(TTestOutcome {
            statistic: 0.0,
            df,
            p_value: 1.0,
        });
    }
    if df < 1.0 {
        return Ok(TTestOutcome {
            statistic: f64::NAN,
            df,
            p_value: f64::NAN,
        });
    }
    if standard_error == 0.0 {
        return Ok(TTestOutcome {
            statistic: f64::INFINITY.copysign(difference),
            df,
            p_value: 0.0,
        });
    }

    let statistic = difference / standard_error;
    Ok(TTestOutcome {
        statistic,
        df,
        p_value: two_sided_p_value(statistic, df)?,
    })
}

/// Two independent samples with pooled variance.
pub fn independent(a: &[f64], b: &[f64]) -> Result<TTestOutcome> {
    if a.is_empty() || b.is_empty() {
        return Err(EvalError::InsufficientData(
            "independent t-test needs at least one value per sample".to_string(),
        ));
    }

    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let (mean1, mean2) = (mean(a), mean(b));
    let df = n1 + n2 - 2.0;

    let standard_error = if df > 0.0 {
        let pooled_variance = (sum_of_squares(a, mean1) + sum_of_squares(b, mean2)) / df;
        (pooled_variance * (1.0 / n1 + 1.0 / n2)).sqrt()
    } else {
        f64::NAN
    };

    outcome(mean1 - mean2, standard_error, df)
}

/// One sample against the population mean `popmean`.
pub fn one_sample(values: &[f64], popmean: f64) -> Result<TTestOutcome> {
    if values.is_empty() {
        return Err(EvalError::InsufficientData(
            "one-sample t-test needs at least one value".to_string(),
        ));
    }

    let n = values.len() as f64;
    let sample_mean = mean(values);
    let df = n - 1.0;

    let standard_error = if df > 0.0 {
        (sum_of_squares(values, sample_mean) / df / n).sqrt()
    } else {
        f64::NAN
    };

    outcome(sample_mean - popmean, standard_error, df)
}
