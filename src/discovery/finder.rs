use grep::regex::RegexMatcher;
use grep::searcher::Searcher;
use grep::searcher::sinks::UTF8;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::{EvalError, Result};
use crate::core::types::{PerformanceMap, RunScores, ScoreKind};

use std::path::Path;

static RPRECISION_MATCHER: Lazy<RegexMatcher> = Lazy::new(|| {
    RegexMatcher::new(&line_start_pattern(ScoreKind::RPrecision.line_prefix()))
        .expect("Failed to compile RPrecision pattern")
});

static NDCG_MATCHER: Lazy<RegexMatcher> = Lazy::new(|| {
    RegexMatcher::new(&line_start_pattern(ScoreKind::Ndcg20.line_prefix()))
        .expect("Failed to compile nDCG pattern")
});

fn line_start_pattern(prefix: &str) -> String {
    format!("(?m)^{}", regex::escape(prefix))
}

fn compile_matcher(pattern: &str) -> Result<RegexMatcher> {
    RegexMatcher::new(pattern).map_err(|e| {
        EvalError::InvalidArgument(format!("could not compile pattern '{pattern}': {e}"))
    })
}

/// Collect every line of `path` matching `matcher`, without line terminators.
fn matching_lines(path: &Path, matcher: &RegexMatcher) -> Result<Vec<String>> {
    let mut lines = vec![];
    Searcher::new().search_path(
        matcher,
        path,
        UTF8(|_line_number, line| {
            lines.push(line.trim_end_matches(['\r', '\n']).to_string());
            Ok(true)
        }),
    )?;

    Ok(lines)
}

/// Read the single `<prefix> <float>` summary line of a run log.
fn score_with(path: &Path, prefix: &str, matcher: &RegexMatcher) -> Result<f64> {
    let lines = matching_lines(path, matcher)?;
    let candidates: Vec<&str> = lines
        .iter()
        .filter_map(|line| line.strip_prefix(prefix))
        .collect();

    let value = match candidates.as_slice() {
        [] => {
            return Err(EvalError::MissingMetric {
                path: path.display().to_string(),
                prefix: prefix.to_string(),
            });
        }
        [value] => value.trim(),
        _ => {
            return Err(EvalError::AmbiguousMetric {
                path: path.display().to_string(),
                prefix: prefix.to_string(),
            });
        }
    };

    value.parse::<f64>().map_err(|_| EvalError::InvalidNumber {
        path: path.display().to_string(),
        value: value.to_string(),
    })
}

/// Read both summary scores of a run log.
pub fn extract_run_scores(path: &Path) -> Result<RunScores> {
    Ok(RunScores {
        rprecision: score_with(path, ScoreKind::RPrecision.line_prefix(), &RPRECISION_MATCHER)?,
        ndcg20: score_with(path, ScoreKind::Ndcg20.line_prefix(), &NDCG_MATCHER)?,
    })
}

/// Build `user id -> value` from every line of `path` matching `regex`.
///
/// `regex` must define `user` and `value` capture groups. When a user
/// appears on several lines the last one wins.
pub fn read_performance_map(path: &Path, regex: &Regex) -> Result<PerformanceMap> {
    if !path.is_file() {
        return Err(EvalError::FileNotFound(path.display().to_string()));
    }

    let mut map = PerformanceMap::new();
    let matcher = compile_matcher(regex.as_str())?;
    for line in matching_lines(path, &matcher)? {
        let Some(caps) = regex.captures(&line) else {
            continue;
        };
        let user = caps["user"].parse::<u64>().map_err(|_| EvalError::InvalidNumber {
            path: path.display().to_string(),
            value: caps["user"].to_string(),
        })?;
        let value = caps["value"]
            .parse::<f64>()
            .map_err(|_| EvalError::InvalidNumber {
                path: path.display().to_string(),
                value: caps["value"].to_string(),
            })?;
        map.insert(user, value);
    }

    Ok(map)
}
