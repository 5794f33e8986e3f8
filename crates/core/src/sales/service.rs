//! The save action.

use thiserror::Error;
use tracing::info;
use ventas_shared::{AppError, types::SaleId};

use super::types::{NewSale, SaleForm};
use super::validation::ValidationError;
use crate::store::{SalesStore, StorageError};

/// Errors from saving a sale.
#[derive(Debug, Error)]
pub enum SaleError {
    /// Form input rejected; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Insert failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<SaleError> for AppError {
    fn from(err: SaleError) -> Self {
        match err {
            SaleError::Validation(e) => Self::Validation(e.to_string()),
            SaleError::Storage(e) => Self::Storage(e.to_string()),
        }
    }
}

/// Service for recording sales.
pub struct SaleService;

impl SaleService {
    /// Parses and validates form input, then inserts it.
    ///
    /// # Errors
    ///
    /// Returns a validation error before touching the store, or the store's
    /// error if the insert fails.
    pub async fn record<S>(store: &S, form: SaleForm) -> Result<SaleId, SaleError>
    where
        S: SalesStore + ?Sized,
    {
        let sale = NewSale::try_from(form)?;
        Self::record_sale(store, sale).await
    }

    /// Validates an already-parsed sale, then inserts it.
    ///
    /// # Errors
    ///
    /// Same as [`SaleService::record`].
    pub async fn record_sale<S>(store: &S, sale: NewSale) -> Result<SaleId, SaleError>
    where
        S: SalesStore + ?Sized,
    {
        let sale = sale.validate()?;
        let id = store.insert(&sale).await?;
        info!(
            sale_id = %id,
            date = %sale.date,
            product_type = %sale.product_type,
            "Sale recorded"
        );
        Ok(id)
    }
}
