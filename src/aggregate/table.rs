use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::constants::baselines;
use crate::core::error::{EvalError, Result};
use crate::core::types::{AlgorithmFamily, RunScores, ScoreKind};

/// One row of a TSV table
pub type TsvRow = (String, String);

/// Scores of one algorithm for one score kind, keyed by swept parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable {
    family: AlgorithmFamily,
    kind: ScoreKind,
    rows: Vec<(u32, f64)>,
}

impl MetricTable {
    pub fn new(family: AlgorithmFamily, kind: ScoreKind) -> Self {
        Self {
            family,
            kind,
            rows: Vec::new(),
        }
    }

    /// Rows with equal parameters accumulate side by side.
    pub fn push(&mut self, parameter: u32, score: f64) {
        self.rows.push((parameter, score));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows ascending by parameter, ties ordered by score
    pub fn sorted_rows(&self) -> Vec<(u32, f64)> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.total_cmp(&b.1)));
        rows
    }

    pub fn header(&self) -> TsvRow {
        (self.family.label().to_string(), self.kind.header().to_string())
    }

    /// Header row followed by the sorted data rows; nothing at all when empty.
    pub fn to_tsv_rows(&self) -> Vec<TsvRow> {
        if self.rows.is_empty() {
            return Vec::new();
        }

        let mut rows = Vec::with_capacity(self.rows.len() + 1);
        rows.push(self.header());
        rows.extend(
            self.sorted_rows()
                .into_iter()
                .map(|(parameter, score)| (parameter.to_string(), format_score(score))),
        );
        rows
    }
}

/// Rows of a baseline table: nDCG@20 first, then RPrecision.
pub fn baseline_rows(scores: Option<RunScores>) -> Vec<TsvRow> {
    let (ndcg, rprec) = scores.map_or(
        (baselines::MISSING_SCORE, baselines::MISSING_SCORE),
        |s| (s.ndcg20, s.rprecision),
    );
    vec![
        (baselines::NDCG_LABEL.to_string(), format_score(ndcg)),
        (baselines::RPREC_LABEL.to_string(), format_score(rprec)),
    ]
}

/// Render a float the way the downstream plotting scripts expect: shortest
/// round-trip digits, always with a decimal point, exponent outside
/// `1e-4..1e16`.
pub fn format_score(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .map(|(m, e)| (m.to_string(), e.parse::<i32>().unwrap_or(0)))
        .unwrap_or((scientific.clone(), 0));

    if (-4..16).contains(&exponent) {
        let plain = format!("{value}");
        if plain.contains('.') {
            plain
        } else {
            format!("{plain}.0")
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    }
}

/// Write rows as `first\tsecond` lines, truncating any existing file.
pub fn write_tsv(path: &Path, rows: &[TsvRow]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for (first, second) in rows {
        writeln!(writer, "{first}\t{second}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a two-column TSV file back into rows.
pub fn read_tsv(path: &Path) -> Result<Vec<TsvRow>> {
    let content = fs::read_to_string(path)?;
    content
        .lines()
        .enumerate()
        .map(|(i, line)| {
            line.split_once('\t')
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .ok_or_else(|| {
                    EvalError::InvalidArgument(format!(
                        "line {} of '{}' is not a two-column row",
                        i + 1,
                        path.display()
                    ))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.42), "0.42");
        assert_eq!(format_score(1.0), "1.0");
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_score(0.0001), "0.0001");
        assert_eq!(format_score(0.00001), "1e-05");
        assert_eq!(format_score(1.5e-7), "1.5e-07");
        assert_eq!(format_score(1e16), "1e+16");
        assert_eq!(format_score(123456.0), "123456.0");
        assert_eq!(format_score(f64::NAN), "nan");
        assert_eq!(format_score(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_to_tsv_rows__sorted_with_header() {
        let mut table = MetricTable::new(AlgorithmFamily::Neighbor, ScoreKind::RPrecision);
        table.push(50, 0.3);
        table.push(10, 0.1);
        table.push(20, 0.2);

        let rows = table.to_tsv_rows();

        assert_eq!(
            rows,
            vec![
                ("neighbor".to_string(), "RPrecision".to_string()),
                ("10".to_string(), "0.1".to_string()),
                ("20".to_string(), "0.2".to_string()),
                ("50".to_string(), "0.3".to_string()),
            ]
        );
    }

    #[test]
    fn test_to_tsv_rows__keeps_duplicate_parameters() {
        let mut table = MetricTable::new(AlgorithmFamily::Factor, ScoreKind::Ndcg20);
        table.push(5, 0.9);
        table.push(5, 0.4);

        let rows = table.to_tsv_rows();

        assert_eq!(rows[0], ("factor".to_string(), "nDCG@20".to_string()));
        assert_eq!(rows[1], ("5".to_string(), "0.4".to_string()));
        assert_eq!(rows[2], ("5".to_string(), "0.9".to_string()));
    }

    #[test]
    fn test_to_tsv_rows__empty_table_has_no_header() {
        let table = MetricTable::new(AlgorithmFamily::Factor, ScoreKind::Ndcg20);
        assert!(table.is_empty());
        assert!(table.to_tsv_rows().is_empty());
    }

    #[test]
    fn test_baseline_rows() {
        let rows = baseline_rows(Some(RunScores {
            rprecision: 0.42,
            ndcg20: 0.31,
        }));
        assert_eq!(
            rows,
            vec![
                ("ndcg".to_string(), "0.31".to_string()),
                ("rprec".to_string(), "0.42".to_string()),
            ]
        );

        let missing = baseline_rows(None);
        assert_eq!(missing[0].1, "0.0");
        assert_eq!(missing[1].1, "0.0");
    }

    #[test]
    fn test_write_then_read_tsv() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("lfm_rprec.tsv");
        let mut table = MetricTable::new(AlgorithmFamily::Factor, ScoreKind::RPrecision);
        table.push(20, 0.125);
        table.push(10, 0.5);

        write_tsv(&path, &table.to_tsv_rows())?;

        assert_eq!(
            fs::read_to_string(&path)?,
            "factor\tRPrecision\n10\t0.5\n20\t0.125\n"
        );
        assert_eq!(read_tsv(&path)?, table.to_tsv_rows());
        Ok(())
    }

    #[test]
    fn test_write_tsv__empty_rows_create_empty_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("sm_ndcg20.tsv");

        write_tsv(&path, &[])?;

        assert_eq!(fs::read_to_string(&path)?, "");
        Ok(())
    }

    #[test]
    fn test_read_tsv__rejects_single_column() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("broken.tsv");
        fs::write(&path, "neighbor\tRPrecision\njunk\n")?;

        let err = read_tsv(&path).unwrap_err();
        assert!(format!("{err}").contains("line 2"));
        Ok(())
    }
}
