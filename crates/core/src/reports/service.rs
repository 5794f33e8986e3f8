//! Report generation service.

use chrono::NaiveDate;
use tracing::{debug, info};

use super::error::ReportError;
use super::period::{ReportKind, ReportRange, compute_range, is_supported_date};
use super::tax::TaxNormalizer;
use super::types::{GeneratedReport, ReportTotals, SalesReport};
use crate::export::ReportExporter;
use crate::sales::SaleRecord;
use crate::store::SalesStore;

/// Service for generating periodic sales reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportService {
    normalizer: TaxNormalizer,
}

impl ReportService {
    /// Creates a service that normalizes with `normalizer`.
    #[must_use]
    pub const fn new(normalizer: TaxNormalizer) -> Self {
        Self { normalizer }
    }

    /// Builds a report from already-fetched records.
    #[must_use]
    pub fn build_report(
        &self,
        kind: ReportKind,
        range: ReportRange,
        records: &[SaleRecord],
    ) -> SalesReport {
        let rows: Vec<_> = records.iter().map(|r| self.normalizer.normalize(r)).collect();
        let totals = ReportTotals::from_rows(&rows);

        SalesReport {
            kind,
            range,
            rows,
            totals,
        }
    }

    /// Queries the sales around `reference`, normalizes them, and exports
    /// the result.
    ///
    /// The export only runs once the query has succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::UnsupportedDate`] before querying if the
    /// covered range leaves the years 1900 to 9999. Otherwise returns the store's
    /// error if the query fails, or the exporter's error if writing fails.
    pub async fn generate<S, E>(
        &self,
        store: &S,
        exporter: &E,
        kind: ReportKind,
        reference: NaiveDate,
    ) -> Result<GeneratedReport, ReportError>
    where
        S: SalesStore + ?Sized,
        E: ReportExporter + ?Sized,
    {
        let range = compute_range(kind, reference);
        if !(is_supported_date(range.start()) && is_supported_date(range.end())) {
            return Err(ReportError::UnsupportedDate(reference));
        }
        debug!(kind = %kind, %range, "Querying sales for report");

        let records = store.query_by_date_range(range).await?;
        let report = self.build_report(kind, range, &records);

        let path = exporter.export(&report, &report.file_name())?;
        info!(
            kind = %kind,
            %range,
            rows = report.rows.len(),
            path = %path.display(),
            "Report generated"
        );

        Ok(GeneratedReport {
            path,
            kind,
            range,
            row_count: report.rows.len(),
        })
    }
}
