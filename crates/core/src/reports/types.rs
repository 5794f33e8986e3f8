//! Report data types.

use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use ventas_shared::types::SaleId;

use super::period::{ReportKind, ReportRange};
use crate::sales::{MonetaryField, ProductType, SaleAmounts};

/// A sale after tax normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Source sale.
    pub sale_id: SaleId,
    /// Sale date.
    pub date: NaiveDate,
    /// Normalized amounts.
    pub amounts: SaleAmounts,
    /// Product category.
    pub product_type: ProductType,
}

/// Column sums and category counts of a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportTotals {
    /// Sum of each normalized column. Absent amounts count as zero.
    pub amounts: SaleAmounts,
    /// Number of sales per category, every category listed.
    pub by_product_type: Vec<(ProductType, usize)>,
}

impl ReportTotals {
    /// Sums `rows`.
    #[must_use]
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        let mut amounts = SaleAmounts::default();
        for field in MonetaryField::ALL {
            let total: Decimal = rows.iter().filter_map(|r| r.amounts.get(field)).sum();
            *amounts.get_mut(field) = Some(total);
        }

        let by_product_type = ProductType::ALL
            .into_iter()
            .map(|t| (t, rows.iter().filter(|r| r.product_type == t).count()))
            .collect();

        Self {
            amounts,
            by_product_type,
        }
    }
}

/// A generated report, ready to export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesReport {
    /// Report kind.
    pub kind: ReportKind,
    /// Covered dates.
    pub range: ReportRange,
    /// One row per sale, by date.
    pub rows: Vec<ReportRow>,
    /// Column totals.
    pub totals: ReportTotals,
}

impl SalesReport {
    /// Output file name: `report_<kind>_<start date>.xlsx`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("report_{}_{}.xlsx", self.kind.slug(), self.range.start())
    }
}

/// Outcome of the generate-report action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReport {
    /// Where the spreadsheet was written.
    pub path: PathBuf,
    /// Report kind.
    pub kind: ReportKind,
    /// Covered dates.
    pub range: ReportRange,
    /// Number of sale rows written.
    pub row_count: usize,
}
