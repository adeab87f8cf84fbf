//! Line items of a proposal or invoice.
use serde::{Deserialize, Serialize};

use crate::document::DocumentError;
use crate::money::Amount;

/// Identifier of a line item within a document.
pub type ItemId = u32;

/// One priced row of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentItem {
    #[serde(default)]
    pub id: ItemId,

    pub name: String,

    /// Optional profile or sheet size, e.g. "150x20".
    #[serde(default)]
    pub size: Option<String>,

    /// Unit of measure: "м.п.", "шт", "м²", ...
    pub unit: String,

    pub quantity: f64,

    /// Price per unit.
    pub price: Amount,
}

impl DocumentItem {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        unit: impl Into<String>,
        quantity: f64,
        price: Amount,
    ) -> Self {
        DocumentItem {
            id,
            name: name.into(),
            size: None,
            unit: unit.into(),
            quantity,
            price,
        }
    }

    /// Price times quantity, rounded to the nearest tiyn.
    pub fn total(&self) -> Result<Amount, DocumentError> {
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(DocumentError::InvalidQuantity {
                item: self.id,
                quantity: self.quantity,
            });
        }
        Ok(self.price.scale(self.quantity)?)
    }
}
