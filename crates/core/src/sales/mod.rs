//! Sale records and the save action.
//!
//! A sale is one day's transaction breakdown: two prices, insurance,
//! warranty, two acquisition-channel commissions, shipping, and a product
//! category. Records are append-only.

pub mod service;
pub mod types;
pub mod validation;

pub use service::{SaleError, SaleService};
pub use types::{MonetaryField, NewSale, ProductType, SaleAmounts, SaleForm, SaleRecord};
pub use validation::ValidationError;
