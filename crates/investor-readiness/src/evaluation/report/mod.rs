mod export;
mod summary;

pub use export::{content_type, export_csv, ExportError, ExportOptions, DEFAULT_SCORE_PRECISION};
pub use summary::{DetailRow, Report, EVALUATED_ON_FORMAT};
