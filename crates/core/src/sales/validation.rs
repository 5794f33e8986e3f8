//! Form validation.
//!
//! Turns raw form text into a [`NewSale`]. Amounts must be non-negative,
//! carry at most two decimals, and fit a `NUMERIC(10,2)` column.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use ventas_shared::types::parse_amount;

use super::types::{MonetaryField, NewSale, ProductType, SaleAmounts, SaleForm};
use crate::reports::is_supported_date;

/// Largest magnitude a `NUMERIC(10,2)` column holds, exclusive.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Fractional digits stored per amount.
pub const AMOUNT_SCALE: u32 = 2;

/// Malformed or out-of-range form input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Text is not a number.
    #[error("{field}: '{input}' is not a valid amount")]
    InvalidAmount {
        /// Offending field.
        field: MonetaryField,
        /// Text as typed.
        input: String,
    },

    /// Amount below zero.
    #[error("{field}: amount {value} must not be negative")]
    NegativeAmount {
        /// Offending field.
        field: MonetaryField,
        /// Rejected value.
        value: Decimal,
    },

    /// More than two fractional digits.
    #[error("{field}: amount {value} has more than two decimals")]
    TooManyDecimals {
        /// Offending field.
        field: MonetaryField,
        /// Rejected value.
        value: Decimal,
    },

    /// Does not fit the column.
    #[error("{field}: amount {value} is too large")]
    AmountOverflow {
        /// Offending field.
        field: MonetaryField,
        /// Rejected value.
        value: Decimal,
    },

    /// Sale date a report could never include.
    #[error("date {0} is outside the supported years 1900 to 9999")]
    UnsupportedDate(NaiveDate),

    /// Category outside the closed set.
    #[error("unknown product type: '{0}'")]
    UnknownProductType(String),
}

/// Checks one amount against the column constraints.
fn check_amount(field: MonetaryField, value: Decimal) -> Result<Decimal, ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::NegativeAmount { field, value });
    }
    if value.normalize().scale() > AMOUNT_SCALE {
        return Err(ValidationError::TooManyDecimals { field, value });
    }
    if value >= MAX_AMOUNT {
        return Err(ValidationError::AmountOverflow { field, value });
    }

    let mut stored = value;
    stored.rescale(AMOUNT_SCALE);
    Ok(stored)
}

impl NewSale {
    /// Checks the date is reportable, then validates every present amount
    /// and rescales it to two decimals.
    ///
    /// # Errors
    ///
    /// Returns the first constraint violation, date first, then amounts in
    /// column order.
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        if !is_supported_date(self.date) {
            return Err(ValidationError::UnsupportedDate(self.date));
        }
        for field in MonetaryField::ALL {
            let slot = self.amounts.get_mut(field);
            if let Some(value) = *slot {
                *slot = Some(check_amount(field, value)?);
            }
        }
        Ok(self)
    }
}

impl TryFrom<SaleForm> for NewSale {
    type Error = ValidationError;

    fn try_from(form: SaleForm) -> Result<Self, Self::Error> {
        let product_type: ProductType = form.product_type.parse()?;

        let mut amounts = SaleAmounts::default();
        for (field, text) in form.amounts {
            let parsed = parse_amount(&text)
                .map_err(|e| ValidationError::InvalidAmount { field, input: e.input })?;
            *amounts.get_mut(field) = parsed;
        }

        Self {
            date: form.date,
            amounts,
            product_type,
        }
        .validate()
    }
}
