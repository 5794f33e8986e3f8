//! Core business logic for Ventas.
//!
//! This crate contains pure business logic with ZERO database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `sales` - Sale records, form validation, and the save action
//! - `store` - Persistence contract implemented by the database layer
//! - `reports` - Report ranges, tax normalization, and report generation
//! - `export` - Spreadsheet output

pub mod export;
pub mod reports;
pub mod sales;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
