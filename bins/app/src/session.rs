//! The two user actions and their result messages.

use chrono::NaiveDate;
use tracing::warn;
use ventas_core::export::ReportExporter;
use ventas_core::reports::{GeneratedReport, ReportKind, ReportService};
use ventas_core::sales::{SaleForm, SaleService};
use ventas_core::store::SalesStore;
use ventas_shared::types::SaleId;
use ventas_shared::{AppError, AppResult};

/// Store, exporter and normalizer for one run of the program.
pub struct Session<S, E> {
    store: S,
    exporter: E,
    reports: ReportService,
}

impl<S, E> Session<S, E>
where
    S: SalesStore,
    E: ReportExporter,
{
    /// Bundles the collaborators used by both actions.
    pub const fn new(store: S, exporter: E, reports: ReportService) -> Self {
        Self {
            store,
            exporter,
            reports,
        }
    }

    #[cfg(test)]
    pub(crate) const fn store(&self) -> &S {
        &self.store
    }

    /// Validates and inserts a sale.
    pub async fn save_sale(&self, form: SaleForm) -> AppResult<SaleId> {
        SaleService::record(&self.store, form)
            .await
            .map_err(AppError::from)
            .inspect_err(|e| warn!(code = e.error_code(), error = %e, "Save failed"))
    }

    /// Builds the report of `kind` around `reference` and writes it.
    pub async fn generate_report(
        &self,
        kind: ReportKind,
        reference: NaiveDate,
    ) -> AppResult<GeneratedReport> {
        self.reports
            .generate(&self.store, &self.exporter, kind, reference)
            .await
            .map_err(AppError::from)
            .inspect_err(|e| warn!(code = e.error_code(), error = %e, "Report failed"))
    }
}

/// One-line outcome of the save action.
pub fn sale_message(result: &AppResult<SaleId>) -> String {
    match result {
        Ok(_) => "Venta registrada correctamente".to_string(),
        Err(e) => format!("Error al guardar la venta: {e}"),
    }
}

/// One-line outcome of the generate-report action.
pub fn report_message(result: &AppResult<GeneratedReport>) -> String {
    match result {
        Ok(generated) => format!(
            "Reporte generado correctamente: {}",
            generated.path.display()
        ),
        Err(e) => format!("Error al generar el reporte: {e}"),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::PathBuf;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use ventas_core::export::{ExportError, ReportExporter};
    use ventas_core::reports::{ReportRange, SalesReport};
    use ventas_core::sales::{NewSale, SaleRecord};
    use ventas_core::store::{SalesStore, StorageError};
    use ventas_shared::types::SaleId;

    /// In-memory store; fails every call when `offline` is set.
    #[derive(Default)]
    pub struct MemoryStore {
        pub rows: Mutex<Vec<SaleRecord>>,
        pub offline: bool,
    }

    #[async_trait]
    impl SalesStore for MemoryStore {
        async fn insert(&self, sale: &NewSale) -> Result<SaleId, StorageError> {
            if self.offline {
                return Err(StorageError::Database("connection refused".into()));
            }
            let mut rows = self.rows.lock().unwrap();
            let id = SaleId(i64::try_from(rows.len()).unwrap() + 1);
            rows.push(SaleRecord::from_new(id, sale.clone()));
            Ok(id)
        }

        async fn query_by_date_range(
            &self,
            range: ReportRange,
        ) -> Result<Vec<SaleRecord>, StorageError> {
            if self.offline {
                return Err(StorageError::Database("connection refused".into()));
            }
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().filter(|r| range.contains(r.date)).cloned().collect())
        }
    }

    /// Exporter that remembers file names instead of writing.
    #[derive(Default)]
    pub struct NamingExporter {
        pub names: Mutex<Vec<String>>,
    }

    impl ReportExporter for NamingExporter {
        fn export(
            &self,
            _report: &SalesReport,
            destination_name: &str,
        ) -> Result<PathBuf, ExportError> {
            self.names.lock().unwrap().push(destination_name.to_string());
            Ok(PathBuf::from("reportes").join(destination_name))
        }
    }
}
