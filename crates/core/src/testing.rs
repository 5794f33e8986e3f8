//! In-memory collaborators for service tests.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use ventas_shared::types::SaleId;

use crate::export::{ExportError, ReportExporter};
use crate::reports::{ReportRange, SalesReport};
use crate::sales::{NewSale, SaleRecord};
use crate::store::{SalesStore, StorageError};

/// Store backed by a vector, assigning identities like a sequence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<SaleRecord>>,
}

impl MemoryStore {
    pub fn rows(&self) -> Vec<SaleRecord> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl SalesStore for MemoryStore {
    async fn insert(&self, sale: &NewSale) -> Result<SaleId, StorageError> {
        let mut rows = self.rows.lock().unwrap();
        let id = SaleId(i64::try_from(rows.len()).unwrap() + 1);
        rows.push(SaleRecord::from_new(id, sale.clone()));
        Ok(id)
    }

    async fn query_by_date_range(
        &self,
        range: ReportRange,
    ) -> Result<Vec<SaleRecord>, StorageError> {
        let mut found: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| range.contains(r.date))
            .cloned()
            .collect();
        found.sort_by_key(|r| (r.date, r.id));
        Ok(found)
    }
}

/// Store whose every call fails.
pub struct FailingStore;

#[async_trait]
impl SalesStore for FailingStore {
    async fn insert(&self, _sale: &NewSale) -> Result<SaleId, StorageError> {
        Err(StorageError::Database("connection refused".into()))
    }

    async fn query_by_date_range(
        &self,
        _range: ReportRange,
    ) -> Result<Vec<SaleRecord>, StorageError> {
        Err(StorageError::Database("connection refused".into()))
    }
}

/// Exporter that keeps the reports it was handed.
#[derive(Debug, Default)]
pub struct RecordingExporter {
    exported: Mutex<Vec<(String, SalesReport)>>,
}

impl RecordingExporter {
    pub fn exported(&self) -> Vec<(String, SalesReport)> {
        self.exported.lock().unwrap().clone()
    }
}

impl ReportExporter for RecordingExporter {
    fn export(&self, report: &SalesReport, destination_name: &str) -> Result<PathBuf, ExportError> {
        self.exported
            .lock()
            .unwrap()
            .push((destination_name.to_string(), report.clone()));
        Ok(Path::new("/virtual").join(destination_name))
    }
}

/// Exporter whose every call fails.
pub struct FailingExporter;

impl ReportExporter for FailingExporter {
    fn export(&self, _report: &SalesReport, _destination_name: &str) -> Result<PathBuf, ExportError> {
        Err(ExportError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only filesystem",
        )))
    }
}
