//! Output formatting and display logic for recsys-eval

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::aggregate::AggregateReport;
use crate::core::constants::output_formats;
use crate::core::error::Result;
use crate::significance::{Comparison, format_p_value};

/// Summary of one aggregation run, one written table per line
pub fn render_aggregate_summary(report: &AggregateReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Scanned {} file(s): {} baseline run(s), {} parameterized run(s), {} skipped",
        report.files_scanned,
        report.baseline_runs,
        report.parameterized_runs,
        report.skipped.len()
    );

    for table in &report.tables {
        let _ = writeln!(
            out,
            "  {} ({} row{})",
            table.path.display(),
            table.data_rows,
            if table.data_rows == 1 { "" } else { "s" }
        );
    }
    out
}

pub fn display_aggregate_summary(report: &AggregateReport) {
    print!("{}", render_aggregate_summary(report));
}

/// Render a comparison in `output_format`.
///
/// The text form is the bare p-value with no line terminator.
pub fn render_comparison(comparison: &Comparison, output_format: &str) -> Result<String> {
    match output_format {
        output_formats::JSON => Ok(serde_json::to_string(comparison)?),
        _ => Ok(format_p_value(comparison.outcome.p_value)),
    }
}

pub fn display_comparison(comparison: &Comparison, output_format: &str) -> Result<()> {
    let rendered = render_comparison(comparison, output_format)?;
    let mut stdout = io::stdout().lock();
    if output_format == output_formats::JSON {
        writeln!(stdout, "{rendered}")?;
    } else {
        write!(stdout, "{rendered}")?;
    }
    stdout.flush()?;
    Ok(())
}
