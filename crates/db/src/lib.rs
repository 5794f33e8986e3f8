//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - The `ventas` entity definition
//! - [`SaleRepository`], the PostgreSQL-backed sales store
//! - Database migrations and the startup schema check

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::SaleRepository;

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::{debug, info};
use ventas_shared::DatabaseConfig;

/// Establishes a connection pool to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    debug!(max_connections = config.max_connections, "Connected to database");
    Ok(db)
}

/// Creates the `ventas` table and its date index if they are missing.
///
/// Safe to run on every start.
///
/// # Errors
///
/// Returns an error if the DDL cannot be executed.
pub async fn ensure_schema<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    db.execute_unprepared(migration::VENTAS_SQL).await?;
    info!("Schema ready");
    Ok(())
}
