//! Repository implementations for data access.

pub mod sale;

pub use sale::SaleRepository;
