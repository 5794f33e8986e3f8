//! VAT removal for report columns.
//!
//! Stored amounts include VAT. Reports show them net of VAT, except the two
//! acquisition commissions, which are not tax-inclusive prices and pass
//! through untouched.
//!
//! Which columns are taxed is decided by [`COLUMN_RULES`] alone.

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::ReportError;
use super::types::ReportRow;
use crate::sales::{MonetaryField, SaleRecord};

/// VAT rate applied when none is configured (19%).
pub const DEFAULT_VAT_RATE: Decimal = Decimal::from_parts(19, 0, 0, false, 2);

/// Fractional digits of a normalized amount.
const NORMALIZED_SCALE: u32 = 2;

/// How one monetary column appears in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRule {
    /// Source field.
    pub field: MonetaryField,
    /// Report column header.
    pub header: &'static str,
    /// Whether VAT is removed from this column.
    pub apply_tax: bool,
}

/// Report columns between the date and the category, in output order.
pub const COLUMN_RULES: [ColumnRule; 7] = [
    ColumnRule {
        field: MonetaryField::RipleyPrice,
        header: "precio_ripley_sin_iva",
        apply_tax: true,
    },
    ColumnRule {
        field: MonetaryField::OtherPrice,
        header: "precio_otro_sin_iva",
        apply_tax: true,
    },
    ColumnRule {
        field: MonetaryField::Insurance,
        header: "seguro_sin_iva",
        apply_tax: true,
    },
    ColumnRule {
        field: MonetaryField::Warranty,
        header: "garantia_sin_iva",
        apply_tax: true,
    },
    ColumnRule {
        field: MonetaryField::ExpressAcquisition,
        header: "captacion_express",
        apply_tax: false,
    },
    ColumnRule {
        field: MonetaryField::DebitAcquisition,
        header: "captacion_debito",
        apply_tax: false,
    },
    ColumnRule {
        field: MonetaryField::Shipping,
        header: "despacho_sin_iva",
        apply_tax: true,
    },
];

/// Removes a fixed VAT fraction from amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxNormalizer {
    rate: Decimal,
    divisor: Decimal,
}

impl TaxNormalizer {
    /// Creates a normalizer for `rate` (e.g. `0.19`).
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is negative.
    pub fn new(rate: Decimal) -> Result<Self, ReportError> {
        if rate.is_sign_negative() && !rate.is_zero() {
            return Err(ReportError::InvalidVatRate(rate));
        }
        Ok(Self {
            rate,
            divisor: Decimal::ONE + rate,
        })
    }

    /// Configured rate.
    #[must_use]
    pub const fn rate(&self) -> Decimal {
        self.rate
    }

    /// Returns `amount / (1 + rate)` rounded half away from zero to two
    /// decimals. Absent, zero and negative amounts are returned unchanged.
    #[must_use]
    pub fn remove_tax(&self, amount: Option<Decimal>) -> Option<Decimal> {
        match amount {
            Some(value) if value > Decimal::ZERO => Some(
                (value / self.divisor)
                    .round_dp_with_strategy(NORMALIZED_SCALE, RoundingStrategy::MidpointAwayFromZero),
            ),
            other => other,
        }
    }

    /// Applies [`COLUMN_RULES`] to a stored sale.
    #[must_use]
    pub fn normalize(&self, record: &SaleRecord) -> ReportRow {
        let mut amounts = record.amounts.clone();
        for rule in COLUMN_RULES.iter().filter(|r| r.apply_tax) {
            let slot = amounts.get_mut(rule.field);
            *slot = self.remove_tax(*slot);
        }

        ReportRow {
            sale_id: record.id,
            date: record.date,
            amounts,
            product_type: record.product_type,
        }
    }
}

impl Default for TaxNormalizer {
    fn default() -> Self {
        Self {
            rate: DEFAULT_VAT_RATE,
            divisor: Decimal::ONE + DEFAULT_VAT_RATE,
        }
    }
}

/// Removes VAT at [`DEFAULT_VAT_RATE`].
#[must_use]
pub fn remove_tax(amount: Option<Decimal>) -> Option<Decimal> {
    TaxNormalizer::default().remove_tax(amount)
}
