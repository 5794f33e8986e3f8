//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::SaleId;
pub use money::{AmountParseError, format_grouped, parse_amount};
