//! Supplier and client details printed on documents.
use serde::{Deserialize, Serialize};

/// Requisites of the company issuing invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: String,
    /// Business identification number.
    pub bin: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub bank: String,
    pub iban: String,
    pub bik: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        CompanyInfo {
            name: "ТОО \"SAT IN TRADING\"".to_string(),
            bin: "250340017362".to_string(),
            address: "г. Алматы, Улица Сагадат Нурмагамбетов, 144/1".to_string(),
            phone: "+7 707 349 9009".to_string(),
            email: "Bericov1990@gmail.com".to_string(),
            website: "www.alutemir.kz".to_string(),
            bank: "АО «Bank RBK»".to_string(),
            iban: "KZ26821EFDD610000001".to_string(),
            bik: "KINCKZKA".to_string(),
        }
    }
}

impl CompanyInfo {
    /// One-line description used in the "Поставщик" row of an invoice.
    pub fn supplier_line(&self) -> String {
        format!(
            "{}, БИН {}, {}, тел.: {}",
            self.name, self.bin, self.address, self.phone
        )
    }
}

/// The receiving side of a proposal or invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    #[serde(default)]
    pub bin: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
}

impl ClientInfo {
    pub fn new(name: impl Into<String>) -> Self {
        ClientInfo {
            name: name.into(),
            ..Default::default()
        }
    }

    /// One-line description used in the "Покупатель" row of an invoice.
    /// An unnamed buyer is printed as a blank line to fill in by hand.
    pub fn buyer_line(&self) -> String {
        let mut line = if self.name.is_empty() {
            "_".repeat(48)
        } else {
            self.name.clone()
        };
        if let Some(bin) = self.bin.as_deref().filter(|b| !b.is_empty()) {
            line.push_str(&format!(", БИН {bin}"));
        }
        if !self.address.is_empty() {
            line.push_str(&format!(", {}", self.address));
        }
        line
    }
}
