//! Ventas terminal front-end.
//!
//! Records sales into PostgreSQL and writes tax-exclusive sales reports as
//! Excel workbooks.

mod cli;
mod form;
mod session;

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ventas_core::export::XlsxExporter;
use ventas_core::reports::{ReportService, TaxNormalizer};
use ventas_db::{SaleRepository, connect, ensure_schema};
use ventas_shared::AppConfig;

use crate::cli::{Cli, Command};
use crate::session::{Session, report_message, sale_message};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ventas=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    ensure_schema(&db).await.context("Failed to prepare schema")?;

    let normalizer = match config.report.vat_rate {
        Some(rate) => TaxNormalizer::new(rate).context("Invalid report.vat_rate")?,
        None => TaxNormalizer::default(),
    };
    info!(
        vat_rate = %normalizer.rate(),
        output_dir = %config.report.output_dir.display(),
        "Ready"
    );

    let session = Session::new(
        SaleRepository::new(db),
        XlsxExporter::new(&config.report.output_dir),
        ReportService::new(normalizer),
    );
    let today = chrono::Local::now().date_naive();

    let succeeded = match cli.command {
        Command::Record(args) => {
            let result = session.save_sale(args.into_form(today)).await;
            println!("{}", sale_message(&result));
            result.is_ok()
        }
        Command::Report { kind, reference } => {
            let result = session
                .generate_report(kind, reference.unwrap_or(today))
                .await;
            println!("{}", report_message(&result));
            result.is_ok()
        }
        Command::Form => {
            form::run(&session, io::stdin().lock(), io::stdout().lock(), today).await?;
            true
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
