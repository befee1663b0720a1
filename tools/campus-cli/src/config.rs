//! CLI configuration.

use anyhow::{Context, Result};
use campus_commerce::Currency;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Store settings.
    #[serde(default)]
    pub shop: ShopConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Store currency.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.shop.currency)
            .with_context(|| format!("Unknown currency: {}", self.shop.currency))
    }
}

/// Store settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShopConfig {
    /// Store name shown in headers.
    #[serde(default = "default_name")]
    pub name: String,

    /// ISO currency code for carts.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Catalog file (TOML or JSON).
    #[serde(default = "default_catalog")]
    pub catalog: String,

    /// Order book file.
    #[serde(default = "default_orders")]
    pub orders: String,

    /// Review file.
    #[serde(default = "default_reviews")]
    pub reviews: String,
}

fn default_name() -> String {
    "Campus Merch Store".to_string()
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_catalog() -> String {
    "catalog.toml".to_string()
}

fn default_orders() -> String {
    "orders.json".to_string()
}

fn default_reviews() -> String {
    "reviews.json".to_string()
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            currency: default_currency(),
            catalog: default_catalog(),
            orders: default_orders(),
            reviews: default_reviews(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Level or `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

/// Generate a default campus.toml config file.
pub fn generate_default_config(name: &str) -> String {
    format!(
        r#"# Campus merch store configuration

[shop]
name = "{name}"
currency = "INR"
catalog = "catalog.toml"
orders = "orders.json"
reviews = "reviews.json"

[logging]
# Overridden by RUST_LOG
level = "info"
# "human" or "json"
format = "human"
"#,
        name = name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses() {
        let config: CliConfig =
            toml::from_str(&generate_default_config("IITGN Merch Store")).unwrap();
        assert_eq!(config.shop.name, "IITGN Merch Store");
        assert_eq!(config.shop.reviews, "reviews.json");
        assert_eq!(config.logging.format, LogFormat::Human);
        assert_eq!(config.currency().unwrap(), Currency::INR);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: CliConfig = toml::from_str("[logging]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.shop, ShopConfig::default());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_currency() {
        let mut config = CliConfig::default();
        config.shop.currency = "XYZ".to_string();
        assert!(config.currency().is_err());
    }
}
