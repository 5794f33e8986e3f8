//! Shared types, errors, and configuration for Ventas.
//!
//! This crate provides common types used across all other crates:
//! - Amount parsing and display for form input
//! - Typed IDs for type-safe record references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DatabaseConfig, ReportConfig};
pub use error::{AppError, AppResult};
