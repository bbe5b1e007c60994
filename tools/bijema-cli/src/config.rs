//! CLI configuration.

use anyhow::{Context, Result};
use bijema_commerce::access::RouteGuard;
use bijema_commerce::{Currency, Money};
use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;

/// File names searched for, in order, when no `--config` is given.
pub const CONFIG_NAMES: [&str; 3] = ["bijema.toml", ".bijema.toml", "bijema.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront settings and data files.
    #[serde(default)]
    pub storefront: StorefrontConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Route access rules.
    #[serde(default)]
    pub access: RouteGuard,
}

impl CliConfig {
    /// Load config from a file.
    pub async fn load(path: &str) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Storefront settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Currency code for prices and bounds.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Flat delivery fee in major units.
    #[serde(default = "default_shipping_fee")]
    pub shipping_fee: f64,

    /// Products JSON file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,

    /// Orders JSON file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders: Option<String>,

    /// Stores JSON file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stores: Option<String>,

    /// Users JSON file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<String>,
}

fn default_currency() -> String {
    "KES".to_string()
}

fn default_shipping_fee() -> f64 {
    100.0
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            shipping_fee: default_shipping_fee(),
            catalog: None,
            orders: None,
            stores: None,
            users: None,
        }
    }
}

impl StorefrontConfig {
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.currency)
            .with_context(|| format!("Unknown currency in config: {}", self.currency))
    }

    pub fn shipping_fee(&self) -> Result<Money> {
        Ok(Money::from_decimal(self.shipping_fee, self.currency()?))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
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

/// Generate a default bijema.toml config file.
pub fn generate_default_config() -> String {
    r#"# Bijema storefront configuration

[storefront]
currency = "KES"
# Flat delivery fee in major units
shipping_fee = 100
# catalog = "data/products.json"
# orders = "data/orders.json"
# stores = "data/stores.json"
# users = "data/users.json"

[logging]
level = "info"
format = "human"

[access]
protected_routes = ["/admin", "/checkout", "/orders"]
auth_routes = ["/login", "/register"]
login_path = "/login"
home_path = "/"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = CliConfig::parse("bijema.toml", &generate_default_config()).unwrap();
        assert_eq!(config.storefront.currency, "KES");
        assert_eq!(config.storefront.shipping_fee().unwrap(), Money::new(10000, Currency::KES));
        assert_eq!(config.logging.format, LogFormat::Human);
        assert_eq!(config.access, RouteGuard::default());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = CliConfig::parse("bijema.json", r#"{"storefront": {"catalog": "p.json"}}"#).unwrap();
        assert_eq!(config.storefront.catalog.as_deref(), Some("p.json"));
        assert_eq!(config.storefront.shipping_fee, 100.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_configured_currency_prices_loaded_catalog() {
        use bijema_commerce::cart::{CartAction, CartPricing, CartState};
        use bijema_commerce::catalog::Product;

        let config = CliConfig::parse("bijema.toml", "[storefront]\ncurrency = \"USD\"\nshipping_fee = 5\n").unwrap();
        let currency = config.storefront.currency().unwrap();
        let json = r#"[{"id": "p1", "name": "Kettle", "price": 25, "category": "Kitchen"}]"#;
        let products: Vec<Product> = serde_json::from_str::<Vec<Product>>(json)
            .unwrap()
            .into_iter()
            .map(|p| p.in_currency(currency))
            .collect();
        let cart = CartState::new().reduce(&CartAction::Add("p1".into()));

        let pricing = CartPricing::calculate(&cart, &products, config.storefront.shipping_fee().unwrap()).unwrap();
        assert_eq!(pricing.grand_total, Money::new(3000, Currency::USD));
    }

    #[test]
    fn test_unknown_currency_is_an_error() {
        let config = CliConfig::parse("bijema.toml", "[storefront]\ncurrency = \"XYZ\"\n").unwrap();
        assert!(config.storefront.currency().is_err());
    }
}
