use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::core::constants::{log_files, score_prefixes, significance};
use crate::core::error::{EvalError, Result};

/// Per-user metric values extracted from one log, ordered by user id.
pub type PerformanceMap = BTreeMap<u64, f64>;

/// Which knob a parameterized algorithm is swept over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmFamily {
    /// Collaborative filtering swept over neighborhood size
    Neighbor,
    /// Latent-factor models swept over factor count
    Factor,
}

impl AlgorithmFamily {
    /// Character that tags the parameter segment (`b12`, `f5`)
    pub fn marker(self) -> char {
        match self {
            Self::Neighbor => 'b',
            Self::Factor => 'f',
        }
    }

    /// First column of a table header row
    pub fn label(self) -> &'static str {
        match self {
            Self::Neighbor => "neighbor",
            Self::Factor => "factor",
        }
    }
}

/// Score kinds scraped from the summary lines of a run log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScoreKind {
    RPrecision,
    Ndcg20,
}

impl ScoreKind {
    pub const ALL: [ScoreKind; 2] = [ScoreKind::RPrecision, ScoreKind::Ndcg20];

    /// Prefix of the log line holding this score
    pub fn line_prefix(self) -> &'static str {
        match self {
            Self::RPrecision => score_prefixes::RPRECISION,
            Self::Ndcg20 => score_prefixes::NDCG,
        }
    }

    /// Second column of a table header row
    pub fn header(self) -> &'static str {
        match self {
            Self::RPrecision => "RPrecision",
            Self::Ndcg20 => "nDCG@20",
        }
    }
}

/// Every algorithm the experiment harness names its logs after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    Popularity,
    Name,
    UserCf,
    UserCfIdf,
    UserCfIdf2,
    UserCfIdf3,
    Lfm,
    Sm,
    Sdm,
    Sdpm,
    Sdrpm,
}

impl Algorithm {
    /// Parameterized algorithms in output order
    pub const PARAMETERIZED: [Algorithm; 9] = [
        Algorithm::UserCf,
        Algorithm::UserCfIdf,
        Algorithm::UserCfIdf2,
        Algorithm::UserCfIdf3,
        Algorithm::Lfm,
        Algorithm::Sm,
        Algorithm::Sdm,
        Algorithm::Sdpm,
        Algorithm::Sdrpm,
    ];

    /// Look up an algorithm by the name used in log file names
    pub fn from_log_name(name: &str) -> Option<Self> {
        let algorithm = match name {
            "Popularity" => Self::Popularity,
            "Name" => Self::Name,
            "UserCF" => Self::UserCf,
            "UserCFIDF" => Self::UserCfIdf,
            "UserCFIDF2" => Self::UserCfIdf2,
            "UserCFIDF3" => Self::UserCfIdf3,
            "LFM" => Self::Lfm,
            "SM" => Self::Sm,
            "SDM" => Self::Sdm,
            "SDPM" => Self::Sdpm,
            "SDRPM" => Self::Sdrpm,
            _ => return None,
        };
        Some(algorithm)
    }

    pub fn log_name(self) -> &'static str {
        match self {
            Self::Popularity => "Popularity",
            Self::Name => "Name",
            Self::UserCf => "UserCF",
            Self::UserCfIdf => "UserCFIDF",
            Self::UserCfIdf2 => "UserCFIDF2",
            Self::UserCfIdf3 => "UserCFIDF3",
            Self::Lfm => "LFM",
            Self::Sm => "SM",
            Self::Sdm => "SDM",
            Self::Sdpm => "SDPM",
            Self::Sdrpm => "SDRPM",
        }
    }

    /// `None` for the two baselines
    pub fn family(self) -> Option<AlgorithmFamily> {
        match self {
            Self::Popularity | Self::Name => None,
            Self::UserCf | Self::UserCfIdf | Self::UserCfIdf2 | Self::UserCfIdf3 => {
                Some(AlgorithmFamily::Neighbor)
            }
            Self::Lfm | Self::Sm | Self::Sdm | Self::Sdpm | Self::Sdrpm => {
                Some(AlgorithmFamily::Factor)
            }
        }
    }

    pub fn is_baseline(self) -> bool {
        self.family().is_none()
    }

    /// Output table name for a parameterized algorithm; `None` for baselines,
    /// which share a single table per algorithm.
    pub fn table_file_name(self, kind: ScoreKind) -> Option<&'static str> {
        use ScoreKind::{Ndcg20, RPrecision};

        let name = match (self, kind) {
            (Self::UserCf, RPrecision) => "neighborhood_rprec.tsv",
            (Self::UserCf, Ndcg20) => "neighborhood_ndcg20.tsv",
            (Self::UserCfIdf, RPrecision) => "neighborhood_idf_rprec.tsv",
            (Self::UserCfIdf, Ndcg20) => "neighborhood_idf_ndcg20.tsv",
            (Self::UserCfIdf2, RPrecision) => "neighborhood_idf2_rprec.tsv",
            (Self::UserCfIdf2, Ndcg20) => "neighborhood_idf2_ndcg20.tsv",
            (Self::UserCfIdf3, RPrecision) => "neighborhood_idf3_rprec.tsv",
            (Self::UserCfIdf3, Ndcg20) => "neighborhood_idf3_ndcg20.tsv",
            (Self::Lfm, RPrecision) => "lfm_rprec.tsv",
            (Self::Lfm, Ndcg20) => "lfm_ndcg20.tsv",
            (Self::Sm, RPrecision) => "sm_rprec.tsv",
            (Self::Sm, Ndcg20) => "sm_ndcg20.tsv",
            (Self::Sdm, RPrecision) => "sdm_rprec.tsv",
            (Self::Sdm, Ndcg20) => "sdm_ndcg20.tsv",
            (Self::Sdpm, RPrecision) => "sdpm_rprec.tsv",
            (Self::Sdpm, Ndcg20) => "sdpm_ndcg20.tsv",
            (Self::Sdrpm, RPrecision) => "sdrpm_rprec.tsv",
            (Self::Sdrpm, Ndcg20) => "sdrpm_ndcg20.tsv",
            (Self::Popularity | Self::Name, _) => return None,
        };
        Some(name)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.log_name())
    }
}

/// A run log decomposed from its file name.
///
/// Names follow `<prefix>-<algo>-<tag>[-<param>].log`, where `<param>` is the
/// swept value tagged with the family marker, e.g. `CFPTest-UserCF-run1-b12.log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub algorithm: Algorithm,
    pub run_tag: String,
    /// Swept parameter; `None` for baselines
    pub parameter: Option<u32>,
}

impl LogRecord {
    /// Parse a log file name.
    ///
    /// Returns `Ok(None)` for files that are not experiment logs or name an
    /// algorithm outside the known families.
    pub fn parse(file_name: &str, prefix: &str) -> Result<Option<Self>> {
        let Some(stem) = file_name.strip_suffix(log_files::EXTENSION) else {
            return Ok(None);
        };

        let mut segments = stem.split(log_files::SEGMENT_SEPARATOR);
        if segments.next() != Some(prefix) {
            return Ok(None);
        }

        let (Some(algorithm_name), Some(run_tag)) = (segments.next(), segments.next()) else {
            return Err(EvalError::MalformedFileName(file_name.to_string()));
        };

        let Some(algorithm) = Algorithm::from_log_name(algorithm_name) else {
            return Ok(None);
        };

        let parameter = match algorithm.family() {
            None => None,
            Some(family) => {
                let token = segments
                    .next()
                    .ok_or_else(|| EvalError::MissingParameter(file_name.to_string()))?;
                Some(parse_parameter(token, family).ok_or_else(|| {
                    EvalError::InvalidParameter {
                        file_name: file_name.to_string(),
                        token: token.to_string(),
                    }
                })?)
            }
        };

        Ok(Some(Self {
            algorithm,
            run_tag: run_tag.to_string(),
            parameter,
        }))
    }
}

/// Drop every family marker from the token and read what is left as an integer.
pub fn parse_parameter(token: &str, family: AlgorithmFamily) -> Option<u32> {
    let digits: String = token.chars().filter(|&c| c != family.marker()).collect();
    digits.parse().ok()
}

/// The two summary scores of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunScores {
    pub rprecision: f64,
    pub ndcg20: f64,
}

impl RunScores {
    pub fn get(&self, kind: ScoreKind) -> f64 {
        match kind {
            ScoreKind::RPrecision => self.rprecision,
            ScoreKind::Ndcg20 => self.ndcg20,
        }
    }
}

/// Metrics reported per user in evaluator logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignificanceMetric {
    Precision,
    Recall,
    RPrecision,
    Ndcg,
    Rndcg,
}

impl SignificanceMetric {
    pub const ALL: [SignificanceMetric; 5] = [
        SignificanceMetric::Precision,
        SignificanceMetric::Recall,
        SignificanceMetric::RPrecision,
        SignificanceMetric::Ndcg,
        SignificanceMetric::Rndcg,
    ];

    /// Name as written in `INFO: <metric> for user ...` lines
    pub fn log_name(self) -> &'static str {
        match self {
            Self::Precision => "Precision",
            Self::Recall => "Recall",
            Self::RPrecision => "RPrecision",
            Self::Ndcg => "NDCG",
            Self::Rndcg => "RNDCG",
        }
    }
}

impl FromStr for SignificanceMetric {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.log_name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|m| m.log_name()).collect();
                EvalError::InvalidArgument(format!(
                    "metric name is limited to one of {}",
                    names.join(", ")
                ))
            })
    }
}

impl fmt::Display for SignificanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.log_name())
    }
}

/// Flavour of t-test to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestKind {
    /// Two independent samples, pooled variance
    Independent,
    /// Per-user differences tested against zero
    Paired,
}

impl FromStr for TestKind {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            significance::TEST_INDEPENDENT => Ok(Self::Independent),
            significance::TEST_PAIRED => Ok(Self::Paired),
            _ => Err(EvalError::InvalidArgument(format!(
                "test type is limited to one of {}/{}",
                significance::TEST_INDEPENDENT,
                significance::TEST_PAIRED
            ))),
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Independent => f.write_str(significance::TEST_INDEPENDENT),
            Self::Paired => f.write_str(significance::TEST_PAIRED),
        }
    }
}
