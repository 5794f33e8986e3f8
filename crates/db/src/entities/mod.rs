//! `SeaORM` entity definitions.

pub mod ventas;
