//! Commercial proposals and invoices, and the totals printed at their foot.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{ClientInfo, CompanyInfo, DocumentItem, ItemId};
use crate::money::{Amount, InvalidAmount};

/// VAT rate used when an invoice does not set one.
pub const DEFAULT_VAT_RATE: f64 = 12.0;

/// A commercial proposal ("КП") sent to a prospective client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommercialProposal {
    pub id: u64,
    pub number: String,
    pub date: String,
    pub city: String,
    pub client: ClientInfo,
    pub items: Vec<DocumentItem>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub valid_until: Option<String>,
}

/// An invoice for payment ("Счет на оплату").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: u64,
    pub number: String,
    pub date: String,
    #[serde(default)]
    pub supplier: CompanyInfo,
    pub buyer: ClientInfo,
    pub items: Vec<DocumentItem>,
    #[serde(default)]
    pub contract_number: Option<String>,
    #[serde(default)]
    pub contract_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub include_vat: bool,
    /// VAT percentage, already included in item prices.
    pub vat_rate: f64,
}

impl Invoice {
    /// The "Основание" line, present when a contract number is set.
    pub fn contract_reference(&self) -> Option<String> {
        let number = self.contract_number.as_deref().filter(|n| !n.is_empty())?;
        let date = self.contract_date.as_deref().unwrap_or_default();
        Some(format!("Основание: Договор №{number} от {date}"))
    }
}

/// Discriminates the two document variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    #[serde(rename = "kp")]
    Proposal,
    #[serde(rename = "invoice")]
    Invoice,
}

/// A proposal or an invoice, tagged by the `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Document {
    #[serde(rename = "kp")]
    Proposal(CommercialProposal),
    #[serde(rename = "invoice")]
    Invoice(Invoice),
}

/// Sums printed under the item table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentTotals {
    pub item_count: usize,
    /// Sum of all item totals.
    pub subtotal: Amount,
    /// VAT contained in the subtotal, when the document charges it.
    pub vat: Option<Amount>,
    /// Amount due. VAT is included in prices, so this equals the subtotal.
    pub total: Amount,
}

impl Document {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Proposal(_) => DocumentKind::Proposal,
            Document::Invoice(_) => DocumentKind::Invoice,
        }
    }

    pub fn number(&self) -> &str {
        match self {
            Document::Proposal(p) => &p.number,
            Document::Invoice(i) => &i.number,
        }
    }

    pub fn date(&self) -> &str {
        match self {
            Document::Proposal(p) => &p.date,
            Document::Invoice(i) => &i.date,
        }
    }

    pub fn items(&self) -> &[DocumentItem] {
        match self {
            Document::Proposal(p) => &p.items,
            Document::Invoice(i) => &i.items,
        }
    }

    pub fn items_mut(&mut self) -> &mut Vec<DocumentItem> {
        match self {
            Document::Proposal(p) => &mut p.items,
            Document::Invoice(i) => &mut i.items,
        }
    }

    /// Heading printed at the top of the document.
    pub fn title(&self) -> String {
        let heading = match self {
            Document::Proposal(_) => "КОММЕРЧЕСКОЕ ПРЕДЛОЖЕНИЕ",
            Document::Invoice(_) => "СЧЕТ НА ОПЛАТУ",
        };
        format!("{heading} № {} от {}", self.number(), self.date())
    }

    /// VAT rate in percent when the document charges VAT.
    pub fn vat_rate(&self) -> Option<f64> {
        match self {
            Document::Invoice(i) if i.include_vat => Some(i.vat_rate),
            _ => None,
        }
    }

    /// Adds an item, giving it the next free id when its id is zero.
    pub fn push_item(&mut self, mut item: DocumentItem) -> ItemId {
        let items = self.items_mut();
        if item.id == 0 {
            item.id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        }
        let id = item.id;
        items.push(item);
        id
    }

    /// Removes the item with the given id.
    pub fn remove_item(&mut self, id: ItemId) -> Result<DocumentItem, DocumentError> {
        let items = self.items_mut();
        let index = items
            .iter()
            .position(|i| i.id == id)
            .ok_or(DocumentError::ItemDoesNotExist(id))?;
        Ok(items.remove(index))
    }

    /// Computes subtotal, included VAT, and the amount due.
    pub fn totals(&self) -> Result<DocumentTotals, DocumentError> {
        let subtotal = self
            .items()
            .iter()
            .map(DocumentItem::total)
            .try_fold(Amount::ZERO, |acc, total| {
                acc.checked_add(total?).ok_or(DocumentError::TotalOverflow)
            })?;

        let vat = match self.vat_rate() {
            Some(rate) if !rate.is_finite() || rate < 0.0 => {
                return Err(DocumentError::InvalidVatRate(rate));
            }
            Some(rate) => Some(subtotal.scale(rate / (100.0 + rate))?),
            None => None,
        };

        Ok(DocumentTotals {
            item_count: self.items().len(),
            subtotal,
            vat,
            total: subtotal,
        })
    }
}

/// Errors that can occur while pricing a document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Item {item} has invalid quantity {quantity}")]
    InvalidQuantity { item: ItemId, quantity: f64 },
    #[error("Invalid VAT rate {0}")]
    InvalidVatRate(f64),
    #[error("Item {0} does not exist")]
    ItemDoesNotExist(ItemId),
    #[error("Document total overflows")]
    TotalOverflow,
    #[error(transparent)]
    Amount(#[from] InvalidAmount),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(include_vat: bool, vat_rate: f64) -> Document {
        Document::Invoice(Invoice {
            id: 1,
            number: "15".to_string(),
            date: "01.03.2025".to_string(),
            supplier: CompanyInfo::default(),
            buyer: ClientInfo::new("ТОО Строй"),
            items: vec![
                DocumentItem::new(1, "Рейка", "м.п.", 10.0, Amount::from_tenge(100)),
                DocumentItem::new(2, "Подвес", "шт", 4.0, Amount::from_tenge(125)),
            ],
            contract_number: None,
            contract_date: None,
            notes: None,
            include_vat,
            vat_rate,
        })
    }

    fn proposal() -> Document {
        Document::Proposal(CommercialProposal {
            id: 2,
            number: "КП-7".to_string(),
            date: "02.03.2025".to_string(),
            city: "Алматы".to_string(),
            client: ClientInfo::new("ИП Иванов"),
            items: vec![DocumentItem::new(
                1,
                "Панель",
                "м²",
                2.5,
                Amount::from_tenge(4000),
            )],
            notes: None,
            valid_until: None,
        })
    }

    #[test]
    fn test_invoice_totals_with_vat() {
        let totals = invoice(true, 12.0).totals().unwrap();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.subtotal, Amount::from_tenge(1500));
        assert_eq!(totals.total, Amount::from_tenge(1500));
        assert_eq!(totals.vat, Some(Amount::from_tiyn(16_071)));
    }

    #[test]
    fn test_invoice_totals_without_vat() {
        let totals = invoice(false, 12.0).totals().unwrap();
        assert_eq!(totals.vat, None);
    }

    #[test]
    fn test_invalid_vat_rate() {
        assert!(matches!(
            invoice(true, -5.0).totals(),
            Err(DocumentError::InvalidVatRate(_))
        ));
    }

    #[test]
    fn test_proposal_has_no_vat() {
        let totals = proposal().totals().unwrap();
        assert_eq!(totals.subtotal, Amount::from_tenge(10_000));
        assert_eq!(totals.vat, None);
    }

    #[test]
    fn test_empty_document() {
        let mut doc = proposal();
        doc.items_mut().clear();
        let totals = doc.totals().unwrap();
        assert_eq!(totals.item_count, 0);
        assert_eq!(totals.total, Amount::ZERO);
    }

    #[test]
    fn test_push_and_remove_item() {
        let mut doc = invoice(true, 12.0);
        let id = doc.push_item(DocumentItem::new(0, "Уголок", "м.п.", 1.0, Amount::ZERO));
        assert_eq!(id, 3);
        assert_eq!(doc.remove_item(1).unwrap().name, "Рейка");
        assert!(matches!(
            doc.remove_item(1),
            Err(DocumentError::ItemDoesNotExist(1))
        ));
    }

    #[test]
    fn test_titles() {
        assert_eq!(invoice(true, 12.0).title(), "СЧЕТ НА ОПЛАТУ № 15 от 01.03.2025");
        assert_eq!(proposal().title(), "КОММЕРЧЕСКОЕ ПРЕДЛОЖЕНИЕ № КП-7 от 02.03.2025");
    }

    #[test]
    fn test_contract_reference() {
        let Document::Invoice(mut inv) = invoice(true, 12.0) else {
            unreachable!()
        };
        assert_eq!(inv.contract_reference(), None);
        inv.contract_number = Some("42".to_string());
        inv.contract_date = Some("10.01.2025".to_string());
        assert_eq!(
            inv.contract_reference().as_deref(),
            Some("Основание: Договор №42 от 10.01.2025")
        );
    }

    #[test]
    fn test_tagged_serialization() {
        let json = serde_json::to_value(proposal()).unwrap();
        assert_eq!(json["type"], "kp");
        let back: Document = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind(), DocumentKind::Proposal);

        let json = serde_json::to_value(invoice(true, 12.0)).unwrap();
        assert_eq!(json["type"], "invoice");
    }
}
