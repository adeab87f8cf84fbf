//! TOML configuration: separators, supplier requisites, and VAT defaults.
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::document::{CompanyInfo, DEFAULT_VAT_RATE};
use crate::money::CurrencyFormatter;

/// Errors that can occur while loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: FormatConfig,
    pub company: CompanyInfo,
    pub invoice: InvoiceConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub group_separator: char,
    pub decimal_separator: char,
    pub currency_symbol: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        let formatter = CurrencyFormatter::default();
        FormatConfig {
            group_separator: formatter.group_separator,
            decimal_separator: formatter.decimal_separator,
            currency_symbol: "₸".to_string(),
        }
    }
}

impl FormatConfig {
    pub fn formatter(&self) -> CurrencyFormatter {
        CurrencyFormatter::new(self.group_separator, self.decimal_separator)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InvoiceConfig {
    pub include_vat: bool,
    pub vat_rate: f64,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        InvoiceConfig {
            include_vat: true,
            vat_rate: DEFAULT_VAT_RATE,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.format.currency_symbol, "₸");
        assert_eq!(config.invoice.vat_rate, 12.0);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml(
            r#"
            [format]
            group_separator = "\u00A0"
            decimal_separator = ","

            [company]
            name = "ТОО Тест"

            [invoice]
            include_vat = false
            "#,
        )
        .unwrap();
        assert_eq!(
            config.format.formatter().format(1234.5).unwrap(),
            "1\u{a0}234,50"
        );
        assert_eq!(config.company.name, "ТОО Тест");
        assert_eq!(config.company.bik, CompanyInfo::default().bik);
        assert!(!config.invoice.include_vat);
        assert_eq!(config.invoice.vat_rate, DEFAULT_VAT_RATE);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[invoice]\nvat_rate = 16.0").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.invoice.vat_rate, 16.0);
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            Config::load("/nonexistent/tenge.toml"),
            Err(ConfigError::Io { .. })
        ));
        assert!(matches!(
            Config::from_toml("[format]\ngroup_separator = \"ab\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
