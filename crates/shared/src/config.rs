//! Application configuration management.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
///
/// Built once at startup and passed explicitly to whatever needs it.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Report output configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections kept open.
    #[serde(default)]
    pub min_connections: u32,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

// One interactive session, one statement at a time.
fn default_max_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

/// Report configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Directory generated spreadsheets are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// VAT rate override. `None` uses the built-in rate.
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            vat_rate: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `VENTAS__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("VENTAS").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
