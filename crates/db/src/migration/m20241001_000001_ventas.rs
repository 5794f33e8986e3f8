//! Sales table.
//!
//! One row per recorded sale. Rows are never updated or deleted.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(VENTAS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS ventas;").await?;
        Ok(())
    }
}

pub(crate) const VENTAS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS ventas (
    id BIGINT PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
    fecha DATE NOT NULL,
    precio_ripley NUMERIC(10,2),
    precio_otro NUMERIC(10,2),
    seguro NUMERIC(10,2),
    garantia NUMERIC(10,2),
    captacion_express NUMERIC(10,2),
    captacion_debito NUMERIC(10,2),
    despacho NUMERIC(10,2),
    tipo_producto TEXT
);

-- Reports always filter by date range
CREATE INDEX IF NOT EXISTS idx_ventas_fecha ON ventas(fecha);
";
