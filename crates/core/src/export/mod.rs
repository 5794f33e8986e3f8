//! Spreadsheet export of generated reports.

pub mod error;
pub mod xlsx;

use std::path::PathBuf;

pub use error::ExportError;
pub use xlsx::XlsxExporter;

use crate::reports::SalesReport;

/// Writes a report somewhere and says where.
pub trait ReportExporter: Send + Sync {
    /// Writes `report` as `destination_name` and returns the full path.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be produced or written. No
    /// partial output is left behind.
    fn export(&self, report: &SalesReport, destination_name: &str) -> Result<PathBuf, ExportError>;
}
