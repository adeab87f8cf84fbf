//! Text rendering of the item table and totals block.
use serde::Serialize;

use crate::document::{Document, DocumentError};
use crate::money::CurrencyFormatter;

/// Printed in place of an amount that cannot be formatted.
pub const PLACEHOLDER: &str = "—";

/// One row of the item table, with amounts already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRow {
    #[serde(rename = "№")]
    pub position: usize,
    pub name: String,
    pub size: String,
    pub unit: String,
    pub quantity: f64,
    pub price: String,
    pub total: String,
}

/// Formats an amount, or returns [`PLACEHOLDER`] if it is not a valid amount.
pub fn render_amount_or_dash(formatter: &CurrencyFormatter, amount: f64) -> String {
    formatter
        .format(amount)
        .unwrap_or_else(|_| PLACEHOLDER.to_string())
}

/// Builds the item table rows, numbered from one.
pub fn item_rows(
    document: &Document,
    formatter: &CurrencyFormatter,
) -> Result<Vec<ItemRow>, DocumentError> {
    document
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| {
            Ok(ItemRow {
                position: index + 1,
                name: item.name.clone(),
                size: item.size.clone().unwrap_or_default(),
                unit: item.unit.clone(),
                quantity: item.quantity,
                price: formatter.format_amount(item.price),
                total: formatter.format_amount(item.total()?),
            })
        })
        .collect()
}

/// Renders the block printed under the item table: subtotal, VAT line, the
/// item count with the amount due, and the amount due in words.
pub fn render_totals(
    document: &Document,
    formatter: &CurrencyFormatter,
    symbol: &str,
) -> Result<String, DocumentError> {
    let totals = document.totals()?;
    let mut lines = vec![format!(
        "Итого: {} {symbol}",
        formatter.format_amount(totals.subtotal)
    )];

    if let Document::Invoice(_) = document {
        match (totals.vat, document.vat_rate()) {
            (Some(vat), Some(rate)) => lines.push(format!(
                "В том числе НДС ({rate}%): {} {symbol}",
                formatter.format_amount(vat)
            )),
            _ => lines.push("Без НДС: -".to_string()),
        }
    }

    lines.push(format!(
        "Всего наименований {}, на сумму {} {symbol}",
        totals.item_count,
        formatter.format_amount(totals.total)
    ));
    lines.push(
        totals
            .total
            .to_words()
            .unwrap_or_else(|_| PLACEHOLDER.to_string()),
    );
    Ok(lines.join("\n"))
}
