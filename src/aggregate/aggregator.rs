use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::aggregate::table::{MetricTable, baseline_rows, write_tsv};
use crate::core::constants::baselines;
use crate::core::error::{EvalError, Result};
use crate::core::types::{Algorithm, LogRecord, RunScores, ScoreKind};

/// A table file written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenTable {
    pub path: PathBuf,
    /// Data rows, header excluded
    pub data_rows: usize,
}

/// Accumulates run scores per algorithm until they are written out.
#[derive(Debug, Default)]
pub struct Aggregator {
    tables: BTreeMap<(Algorithm, ScoreKind), MetricTable>,
    popularity: Option<RunScores>,
    name: Option<RunScores>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the scores of one run.
    ///
    /// Baselines keep only the latest run; parameterized algorithms append a
    /// row to both of their tables.
    pub fn add(&mut self, record: &LogRecord, scores: RunScores) -> Result<()> {
        match (record.algorithm.family(), record.parameter) {
            (None, _) => {
                if record.algorithm == Algorithm::Popularity {
                    self.popularity = Some(scores);
                } else {
                    self.name = Some(scores);
                }
                debug!("{} baseline set from run {}", record.algorithm, record.run_tag);
            }
            (Some(family), Some(parameter)) => {
                for kind in ScoreKind::ALL {
                    self.tables
                        .entry((record.algorithm, kind))
                        .or_insert_with(|| MetricTable::new(family, kind))
                        .push(parameter, scores.get(kind));
                }
                debug!(
                    "{} parameter={parameter} rprec={} ndcg={}",
                    record.algorithm, scores.rprecision, scores.ndcg20
                );
            }
            (Some(_), None) => {
                return Err(EvalError::MissingParameter(format!(
                    "{} run {}",
                    record.algorithm, record.run_tag
                )));
            }
        }
        Ok(())
    }

    pub fn table(&self, algorithm: Algorithm, kind: ScoreKind) -> Option<&MetricTable> {
        self.tables.get(&(algorithm, kind))
    }

    pub fn popularity(&self) -> Option<RunScores> {
        self.popularity
    }

    pub fn name(&self) -> Option<RunScores> {
        self.name
    }

    /// Number of parameterized runs recorded
    pub fn run_count(&self) -> usize {
        Algorithm::PARAMETERIZED
            .iter()
            .filter_map(|a| self.table(*a, ScoreKind::RPrecision))
            .map(MetricTable::len)
            .sum()
    }

    /// Write both baseline tables and all 18 algorithm tables into `output_dir`.
    ///
    /// Algorithms without runs get an empty file.
    pub fn write_all(&self, output_dir: &Path) -> Result<Vec<WrittenTable>> {
        fs::create_dir_all(output_dir)?;
        let mut written = Vec::new();

        for (file_name, scores) in [
            (baselines::POPULARITY_FILE, self.popularity),
            (baselines::NAME_FILE, self.name),
        ] {
            let path = output_dir.join(file_name);
            let rows = baseline_rows(scores);
            write_tsv(&path, &rows)?;
            written.push(WrittenTable {
                path,
                data_rows: rows.len(),
            });
        }

        for kind in ScoreKind::ALL {
            for algorithm in Algorithm::PARAMETERIZED {
                let Some(file_name) = algorithm.table_file_name(kind) else {
                    continue;
                };
                let path = output_dir.join(file_name);
                let rows = self
                    .table(algorithm, kind)
                    .map(MetricTable::to_tsv_rows)
                    .unwrap_or_default();
                write_tsv(&path, &rows)?;
                written.push(WrittenTable {
                    path,
                    data_rows: rows.len().saturating_sub(1),
                });
            }
        }

        Ok(written)
    }
}
