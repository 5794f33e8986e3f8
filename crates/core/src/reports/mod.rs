//! Periodic sales reports.
//!
//! This module provides pure business logic for report generation:
//! - Report ranges (daily, weekly, monthly)
//! - Tax normalization of monetary columns
//! - Report assembly and hand-off to an exporter

pub mod error;
pub mod period;
pub mod service;
pub mod tax;
pub mod types;


pub use error::ReportError;
pub use period::{
    ReportKind, ReportRange, SUPPORTED_YEARS, UnknownReportKind, compute_range, is_supported_date,
};
pub use service::ReportService;
pub use tax::{COLUMN_RULES, ColumnRule, DEFAULT_VAT_RATE, TaxNormalizer, remove_tax};
pub use types::*;
