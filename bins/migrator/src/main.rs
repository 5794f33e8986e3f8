//! Database migration runner for Ventas.
//!
//! Usage:
//!   migrator up      - Create the ventas table and its index
//!   migrator down    - Drop the ventas table
//!   migrator status  - Show migration status
//!
//! The connection string is read from `DATABASE_URL`.

use sea_orm_migration::prelude::*;
use ventas_db::migration::Migrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The migrator CLI sets up its own tracing
    cli::run_cli(Migrator).await;
}
