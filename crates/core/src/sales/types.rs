//! Sale data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ventas_shared::types::SaleId;

use super::validation::ValidationError;

/// Product category of a sale. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductType {
    /// Electrónica
    #[serde(rename = "Electrónica")]
    Electronics,
    /// Línea Blanca (appliances)
    #[serde(rename = "Línea Blanca")]
    WhiteGoods,
    /// Muebles
    #[serde(rename = "Muebles")]
    Furniture,
    /// Ropa
    #[serde(rename = "Ropa")]
    Clothing,
    /// Otros
    #[serde(rename = "Otros")]
    Other,
}

impl ProductType {
    /// All categories, in selector order.
    pub const ALL: [Self; 5] = [
        Self::Electronics,
        Self::WhiteGoods,
        Self::Furniture,
        Self::Clothing,
        Self::Other,
    ];

    /// Label shown in the form and stored in `tipo_producto`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Electronics => "Electrónica",
            Self::WhiteGoods => "Línea Blanca",
            Self::Furniture => "Muebles",
            Self::Clothing => "Ropa",
            Self::Other => "Otros",
        }
    }

    /// Exact inverse of [`ProductType::label`]. Used when reading stored
    /// rows, where no other spelling is valid.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    const fn english_name(self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::WhiteGoods => "white goods",
            Self::Furniture => "furniture",
            Self::Clothing => "clothing",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ProductType {
    type Err = ValidationError;

    /// Accepts the stored label or the English name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|t| t.label().to_lowercase() == wanted || t.english_name() == wanted)
            .ok_or_else(|| ValidationError::UnknownProductType(s.to_string()))
    }
}

/// One of the seven monetary columns of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonetaryField {
    /// Price paid with the Ripley card.
    RipleyPrice,
    /// Price paid through any other means.
    OtherPrice,
    /// Insurance.
    Insurance,
    /// Extended warranty.
    Warranty,
    /// Express acquisition commission.
    ExpressAcquisition,
    /// Debit acquisition commission.
    DebitAcquisition,
    /// Shipping.
    Shipping,
}

impl MonetaryField {
    /// All monetary fields, in column order.
    pub const ALL: [Self; 7] = [
        Self::RipleyPrice,
        Self::OtherPrice,
        Self::Insurance,
        Self::Warranty,
        Self::ExpressAcquisition,
        Self::DebitAcquisition,
        Self::Shipping,
    ];

    /// Database column name.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::RipleyPrice => "precio_ripley",
            Self::OtherPrice => "precio_otro",
            Self::Insurance => "seguro",
            Self::Warranty => "garantia",
            Self::ExpressAcquisition => "captacion_express",
            Self::DebitAcquisition => "captacion_debito",
            Self::Shipping => "despacho",
        }
    }

    /// Form label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RipleyPrice => "Precio Ripley",
            Self::OtherPrice => "Precio Otro Medio",
            Self::Insurance => "Seguro",
            Self::Warranty => "Garantía",
            Self::ExpressAcquisition => "Captación Express",
            Self::DebitAcquisition => "Captación Débito",
            Self::Shipping => "Despacho",
        }
    }
}

impl std::fmt::Display for MonetaryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// The seven monetary amounts of a sale. Absent means the field was left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleAmounts {
    /// `precio_ripley`
    pub ripley_price: Option<Decimal>,
    /// `precio_otro`
    pub other_price: Option<Decimal>,
    /// `seguro`
    pub insurance: Option<Decimal>,
    /// `garantia`
    pub warranty: Option<Decimal>,
    /// `captacion_express`
    pub express_acquisition: Option<Decimal>,
    /// `captacion_debito`
    pub debit_acquisition: Option<Decimal>,
    /// `despacho`
    pub shipping: Option<Decimal>,
}

impl SaleAmounts {
    /// Returns the amount stored for `field`.
    #[must_use]
    pub const fn get(&self, field: MonetaryField) -> Option<Decimal> {
        match field {
            MonetaryField::RipleyPrice => self.ripley_price,
            MonetaryField::OtherPrice => self.other_price,
            MonetaryField::Insurance => self.insurance,
            MonetaryField::Warranty => self.warranty,
            MonetaryField::ExpressAcquisition => self.express_acquisition,
            MonetaryField::DebitAcquisition => self.debit_acquisition,
            MonetaryField::Shipping => self.shipping,
        }
    }

    /// Returns a mutable slot for `field`.
    pub fn get_mut(&mut self, field: MonetaryField) -> &mut Option<Decimal> {
        match field {
            MonetaryField::RipleyPrice => &mut self.ripley_price,
            MonetaryField::OtherPrice => &mut self.other_price,
            MonetaryField::Insurance => &mut self.insurance,
            MonetaryField::Warranty => &mut self.warranty,
            MonetaryField::ExpressAcquisition => &mut self.express_acquisition,
            MonetaryField::DebitAcquisition => &mut self.debit_acquisition,
            MonetaryField::Shipping => &mut self.shipping,
        }
    }

    /// Sets `field` and returns self, for building fixtures and forms.
    #[must_use]
    pub fn with(mut self, field: MonetaryField, amount: Decimal) -> Self {
        *self.get_mut(field) = Some(amount);
        self
    }

    /// Iterates `(field, amount)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (MonetaryField, Option<Decimal>)> + '_ {
        MonetaryField::ALL.into_iter().map(|f| (f, self.get(f)))
    }
}

/// A validated sale, ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSale {
    /// Sale date.
    pub date: NaiveDate,
    /// Monetary amounts.
    pub amounts: SaleAmounts,
    /// Product category.
    pub product_type: ProductType,
}

/// A stored sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Identity assigned on insert.
    pub id: SaleId,
    /// Sale date.
    pub date: NaiveDate,
    /// Monetary amounts as entered (tax included).
    pub amounts: SaleAmounts,
    /// Product category.
    pub product_type: ProductType,
}

impl SaleRecord {
    /// Attaches an identity to a new sale.
    #[must_use]
    pub fn from_new(id: SaleId, sale: NewSale) -> Self {
        Self {
            id,
            date: sale.date,
            amounts: sale.amounts,
            product_type: sale.product_type,
        }
    }
}

/// Raw form input, as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleForm {
    /// Date picker value.
    pub date: NaiveDate,
    /// Text of each filled-in amount field. Missing fields are empty.
    pub amounts: Vec<(MonetaryField, String)>,
    /// Category selector value.
    pub product_type: String,
}

impl SaleForm {
    /// Starts a form for `date` with no amounts filled in.
    #[must_use]
    pub fn new(date: NaiveDate, product_type: impl Into<String>) -> Self {
        Self {
            date,
            amounts: Vec::new(),
            product_type: product_type.into(),
        }
    }

    /// Fills in one amount field.
    #[must_use]
    pub fn with_amount(mut self, field: MonetaryField, text: impl Into<String>) -> Self {
        self.amounts.push((field, text.into()));
        self
    }
}
