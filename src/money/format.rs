//! Grouped decimal formatting of amounts, e.g. `1 234 567.80`.
use std::fmt::Write;

use crate::money::{Amount, InvalidAmount};

/// Formats amounts with a separator between every three integer digits and
/// exactly two fractional digits. No currency symbol is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    /// Placed between groups of three integer digits.
    pub group_separator: char,
    /// Placed between tenge and tiyn.
    pub decimal_separator: char,
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        CurrencyFormatter {
            group_separator: ' ',
            decimal_separator: '.',
        }
    }
}

impl CurrencyFormatter {
    pub fn new(group_separator: char, decimal_separator: char) -> Self {
        CurrencyFormatter {
            group_separator,
            decimal_separator,
        }
    }

    /// Formats a floating-point amount, rounding half away from zero at the
    /// second decimal place.
    pub fn format(&self, amount: f64) -> Result<String, InvalidAmount> {
        Amount::from_f64(amount).map(|a| self.format_amount(a))
    }

    pub fn format_amount(&self, amount: Amount) -> String {
        let digits = amount.tenge().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(self.group_separator);
            }
            out.push(c);
        }
        out.push(self.decimal_separator);
        let _ = write!(out, "{:02}", amount.fraction());
        out
    }
}

/// Formats an amount with the default separators (space and dot).
pub fn format_currency(amount: f64) -> Result<String, InvalidAmount> {
    CurrencyFormatter::default().format(amount)
}
