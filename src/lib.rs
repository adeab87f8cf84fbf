//! Amount formatting, amounts in words, and document totals for tenge
//! commercial proposals and invoices.
pub mod calc;
pub mod catalog;
pub mod config;
pub mod document;
pub mod logger;
pub mod money;
