//! Persistence contract for sale records.
//!
//! The database crate implements [`SalesStore`] against PostgreSQL. Services
//! in this crate only see the trait.

use async_trait::async_trait;
use thiserror::Error;
use ventas_shared::types::SaleId;

use crate::reports::ReportRange;
use crate::sales::{NewSale, SaleRecord};

/// Storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection, statement, or constraint failure.
    #[error("database error: {0}")]
    Database(String),

    /// A stored row cannot be read back as a sale.
    #[error("corrupt sale row: {0}")]
    Corrupt(String),
}

/// Append-only store of sale records.
#[async_trait]
pub trait SalesStore: Send + Sync {
    /// Inserts a sale and returns its assigned identity.
    async fn insert(&self, sale: &NewSale) -> Result<SaleId, StorageError>;

    /// Returns the sales dated within `range`, both ends inclusive,
    /// ordered by date then identity.
    async fn query_by_date_range(&self, range: ReportRange)
    -> Result<Vec<SaleRecord>, StorageError>;
}
