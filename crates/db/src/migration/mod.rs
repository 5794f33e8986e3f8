//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration. The schema statements are
//! idempotent, so the application also runs them directly on every start.

pub use sea_orm_migration::prelude::*;

pub(crate) mod m20241001_000001_ventas;

pub(crate) use m20241001_000001_ventas::VENTAS_SQL;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20241001_000001_ventas::Migration)]
    }
}
