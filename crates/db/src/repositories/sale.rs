//! Sale repository for the ventas table.

use async_trait::async_trait;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{debug, warn};
use ventas_core::reports::ReportRange;
use ventas_core::sales::{NewSale, ProductType, SaleAmounts, SaleRecord};
use ventas_core::store::{SalesStore, StorageError};
use ventas_shared::types::SaleId;

use crate::entities::ventas;

fn db_error(err: DbErr) -> StorageError {
    StorageError::Database(err.to_string())
}

/// Maps a new sale onto an insertable row. The identity is left to the
/// database.
fn to_active_model(sale: &NewSale) -> ventas::ActiveModel {
    let a = &sale.amounts;
    ventas::ActiveModel {
        id: NotSet,
        fecha: Set(sale.date),
        precio_ripley: Set(a.ripley_price),
        precio_otro: Set(a.other_price),
        seguro: Set(a.insurance),
        garantia: Set(a.warranty),
        captacion_express: Set(a.express_acquisition),
        captacion_debito: Set(a.debit_acquisition),
        despacho: Set(a.shipping),
        tipo_producto: Set(Some(sale.product_type.label().to_string())),
    }
}

/// Reads a stored row back as a sale.
///
/// # Errors
///
/// Returns [`StorageError::Corrupt`] if the category is missing or unknown.
pub fn to_record(model: ventas::Model) -> Result<SaleRecord, StorageError> {
    let label = model
        .tipo_producto
        .ok_or_else(|| StorageError::Corrupt(format!("venta {} has no tipo_producto", model.id)))?;
    let product_type = ProductType::from_label(&label).ok_or_else(|| {
        StorageError::Corrupt(format!("venta {} has unknown tipo_producto '{label}'", model.id))
    })?;

    Ok(SaleRecord {
        id: SaleId(model.id),
        date: model.fecha,
        amounts: SaleAmounts {
            ripley_price: model.precio_ripley,
            other_price: model.precio_otro,
            insurance: model.seguro,
            warranty: model.garantia,
            express_acquisition: model.captacion_express,
            debit_acquisition: model.captacion_debito,
            shipping: model.despacho,
        },
        product_type,
    })
}

/// Sale repository backed by PostgreSQL.
#[derive(Debug)]
pub struct SaleRepository {
    db: DatabaseConnection,
}

impl SaleRepository {
    /// Creates a new sale repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SalesStore for SaleRepository {
    async fn insert(&self, sale: &NewSale) -> Result<SaleId, StorageError> {
        let result = ventas::Entity::insert(to_active_model(sale))
            .exec(&self.db)
            .await
            .map_err(db_error)?;
        Ok(SaleId(result.last_insert_id))
    }

    async fn query_by_date_range(
        &self,
        range: ReportRange,
    ) -> Result<Vec<SaleRecord>, StorageError> {
        let rows = ventas::Entity::find()
            .filter(ventas::Column::Fecha.between(range.start(), range.end()))
            .order_by_asc(ventas::Column::Fecha)
            .order_by_asc(ventas::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        debug!(%range, rows = rows.len(), "Fetched sales");

        rows.into_iter()
            .map(|row| {
                to_record(row).inspect_err(|e| warn!(error = %e, "Unreadable sale row"))
            })
            .collect()
    }
}
