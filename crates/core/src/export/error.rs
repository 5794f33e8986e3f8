//! Export error types.

use thiserror::Error;

/// Export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The workbook could not be built.
    #[error("failed to build workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// Filesystem failure.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// Destination is not a plain file name.
    #[error("invalid report file name: '{0}'")]
    InvalidDestination(String),
}
