use super::summary::Report;
use std::io::Write;

/// Final scores are rounded to hundredths, so the export never prints fewer
/// decimals than that.
pub const DEFAULT_SCORE_PRECISION: usize = 2;

/// Formatting knobs for the CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Decimal places used for the final score. Values below
    /// [`DEFAULT_SCORE_PRECISION`] are widened to it.
    pub score_precision: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            score_precision: DEFAULT_SCORE_PRECISION,
        }
    }
}

impl ExportOptions {
    pub fn final_score_precision(&self) -> usize {
        self.score_precision.max(DEFAULT_SCORE_PRECISION)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV buffer: {0}")]
    Io(#[from] std::io::Error),
}

pub fn content_type() -> mime::Mime {
    mime::TEXT_CSV_UTF_8
}

/// Serialize a report as a metadata block, a blank line, then the detail
/// table, all comma-separated UTF-8.
pub fn export_csv(report: &Report, options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    let mut meta = writer(Vec::new());
    meta.write_record(["Key", "Value"])?;
    meta.write_record(["Company", report.company_name.as_str()])?;
    meta.write_record(["Evaluated On", report.evaluated_on_label().as_str()])?;
    meta.write_record([
        "Final Score",
        format!("{:.*}", options.final_score_precision(), report.final_score).as_str(),
    ])?;
    meta.write_record(["Readiness", report.readiness.as_str()])?;
    let mut buffer = meta
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;

    buffer.write_all(b"\n")?;

    let mut details = writer(buffer);
    details.write_record(["Section", "Question", "Response", "Score"])?;
    for row in &report.details {
        details.write_record([
            row.section.as_str(),
            row.question.as_str(),
            row.response.as_str(),
            row.score.to_string().as_str(),
        ])?;
    }

    details
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}

fn writer(buffer: Vec<u8>) -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(buffer)
}

impl Report {
    pub fn to_csv(&self) -> Result<Vec<u8>, ExportError> {
        export_csv(self, &ExportOptions::default())
    }
}
