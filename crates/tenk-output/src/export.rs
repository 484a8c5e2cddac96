//! Export functionality for normalized statements and ratio tables.
//!
//! Serializes the pipeline's outputs to flat files: one CSV or JSON per
//! statement, a footnote sidecar, and the stacked ratio report.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use tenk_extract::{Footnote, NormalizedStatement};
use tenk_ratios::{RatioReport, RatioTable};
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Pretty-printed JSON format.
    Json,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Render a missing-aware value for CSV (missing is the empty field).
fn field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Render a normalized statement as CSV text.
///
/// One row per account: label, enclosing section (empty when none), then
/// one column per period.
pub fn statement_csv(statement: &NormalizedStatement) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);

        let mut header = vec!["Account".to_string(), "Section".to_string()];
        header.extend(statement.periods().iter().cloned());
        writer.write_record(&header)?;

        for (row, label) in statement.labels().iter().enumerate() {
            let mut record = vec![
                label.clone(),
                statement.section_of(row).unwrap_or_default().to_string(),
            ];
            for period in 0..statement.period_count() {
                record.push(field(statement.value(row, period)));
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Render footnotes as CSV text: index, text, referencing account labels.
pub fn footnotes_csv(footnotes: &[Footnote]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(["Index", "Text", "Referenced accounts"])?;
        for footnote in footnotes {
            writer.write_record([
                footnote.index.to_string(),
                footnote.text.clone(),
                footnote.referents.join("; "),
            ])?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Render the three ratio tables stacked into one CSV document, the way a
/// combined analysis sheet reads: title row, header row, ratio rows, blank
/// line between tables.
pub fn ratio_report_csv(report: &RatioReport) -> Result<String, ExportError> {
    let mut out = String::new();
    for table in report.tables() {
        out.push_str(&ratio_table_csv(table)?);
        out.push('\n');
    }
    Ok(out)
}

fn ratio_table_csv(table: &RatioTable) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);

        let mut header = vec![table.title().to_string()];
        header.extend(table.periods().iter().cloned());
        writer.write_record(&header)?;

        for (name, values) in table.rows() {
            let mut record = vec![name.to_string()];
            record.extend(values.iter().map(|v| field(*v)));
            writer.write_record(&record)?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write a normalized statement to `path` in the requested format.
pub fn export_statement<P: AsRef<Path>>(
    path: P,
    statement: &NormalizedStatement,
    format: ExportFormat,
) -> Result<(), ExportError> {
    let body = match format {
        ExportFormat::Csv => statement_csv(statement)?,
        ExportFormat::Json => serde_json::to_string_pretty(statement)?,
    };
    write_file(path, &body)
}

/// Write footnote records to `path` as CSV.
pub fn export_footnotes<P: AsRef<Path>>(
    path: P,
    footnotes: &[Footnote],
) -> Result<(), ExportError> {
    write_file(path, &footnotes_csv(footnotes)?)
}

/// Write the combined ratio report to `path` in the requested format.
pub fn export_ratio_report<P: AsRef<Path>>(
    path: P,
    report: &RatioReport,
    format: ExportFormat,
) -> Result<(), ExportError> {
    let body = match format {
        ExportFormat::Csv => ratio_report_csv(report)?,
        ExportFormat::Json => serde_json::to_string_pretty(report)?,
    };
    write_file(path, &body)
}

fn write_file<P: AsRef<Path>>(path: P, body: &str) -> Result<(), ExportError> {
    let mut file = File::create(path)?;
    file.write_all(body.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenk_ratios::ConceptDictionary;

    fn sample_statement() -> NormalizedStatement {
        NormalizedStatement::new(
            vec!["Cash".to_string(), "Total assets".to_string()],
            vec!["2023".to_string(), "2022".to_string()],
            vec![vec![Some(100.0), Some(90.0)], vec![Some(500.0), None]],
            vec![Some("Current assets:".to_string()), None],
            vec![Footnote {
                index: 1,
                text: "Includes restricted cash.".to_string(),
                referents: vec!["Cash".to_string()],
                positions: vec![(0, 1)],
            }],
        )
        .unwrap()
    }

    #[test]
    fn test_statement_csv_shape() {
        let csv = statement_csv(&sample_statement()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Account,Section,2023,2022"));
        assert_eq!(lines.next(), Some("Cash,Current assets:,100,90"));
        // Missing values render as empty fields, not zeros
        assert_eq!(lines.next(), Some("Total assets,,500,"));
    }

    #[test]
    fn test_footnotes_csv() {
        let csv = footnotes_csv(sample_statement().footnotes()).unwrap();
        assert!(csv.contains("Includes restricted cash."));
        assert!(csv.contains("Cash"));
    }

    #[test]
    fn test_ratio_report_csv_stacks_tables() {
        let dict = ConceptDictionary::default();
        let report = RatioReport::compute(None, None, None, &dict);
        let csv = ratio_report_csv(&report).unwrap();
        assert!(csv.contains("Profitability"));
        assert!(csv.contains("Liquidity"));
        assert!(csv.contains("Solvency"));
    }

    #[test]
    fn test_statement_json_round_trips_labels() {
        let json = serde_json::to_string(&sample_statement()).unwrap();
        assert!(json.contains("Total assets"));
        assert!(json.contains("Includes restricted cash."));
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
    }
}
