//! Report error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use ventas_shared::AppError;

use crate::export::ExportError;
use crate::store::StorageError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Reference date outside the years a workbook can hold.
    #[error("Date {0} is outside the supported years 1900 to 9999")]
    UnsupportedDate(NaiveDate),

    /// VAT rate below zero.
    #[error("Invalid VAT rate: {0}")]
    InvalidVatRate(Decimal),

    /// The range query failed; nothing was written.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The spreadsheet could not be written.
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Storage(e) => Self::Storage(e.to_string()),
            ReportError::Export(e) => Self::Export(e.to_string()),
            e @ (ReportError::InvalidDateRange { .. } | ReportError::UnsupportedDate(_)) => {
                Self::Validation(e.to_string())
            }
            e @ ReportError::InvalidVatRate(_) => Self::Configuration(e.to_string()),
        }
    }
}
