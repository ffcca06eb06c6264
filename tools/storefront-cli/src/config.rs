//! CLI configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::checkout::{Checkout, DEFAULT_SUBMIT_DELAY, DEFAULT_TAX_RATE_BP};
use storefront_commerce::Currency;
use storefront_data::{ApiConfig, RetryPolicy, DEFAULT_BASE_URL};

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "STOREFRONT_API_URL";

/// Storefront configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    /// Product API settings.
    #[serde(default)]
    pub api: ApiSection,

    /// Backoff for manual retries.
    #[serde(default)]
    pub retry: RetrySection,

    /// Checkout settings.
    #[serde(default)]
    pub checkout: CheckoutSection,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
        self
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api.base_url.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            Duration::from_millis(self.retry.base_delay_ms),
            self.retry.max_backoff_steps,
        )
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.checkout.submit_delay_ms)
    }

    /// Checkout with the configured delay and tax rate.
    pub fn checkout(&self) -> Checkout {
        Checkout::new(self.submit_delay()).with_tax_rate(self.checkout.tax_rate_bp)
    }

    /// Currency for cart totals.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.checkout.currency)
            .ok_or_else(|| anyhow!("Unknown currency: {}", self.checkout.currency))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Product API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Retry backoff settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrySection {
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Retries that wait before firing; later ones fire immediately.
    #[serde(default = "default_max_backoff_steps")]
    pub max_backoff_steps: u32,
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_max_backoff_steps() -> u32 {
    3
}

impl Default for RetrySection {
    fn default() -> Self {
        Self {
            base_delay_ms: default_base_delay_ms(),
            max_backoff_steps: default_max_backoff_steps(),
        }
    }
}

/// Checkout settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutSection {
    /// Simulated order submission time.
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,

    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Sales tax in basis points; 800 is 8%.
    #[serde(default = "default_tax_rate_bp")]
    pub tax_rate_bp: i64,
}

fn default_submit_delay_ms() -> u64 {
    DEFAULT_SUBMIT_DELAY.as_millis() as u64
}

fn default_currency() -> String {
    Currency::USD.code().to_string()
}

fn default_tax_rate_bp() -> i64 {
    DEFAULT_TAX_RATE_BP
}

impl Default for CheckoutSection {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
            currency: default_currency(),
            tax_rate_bp: default_tax_rate_bp(),
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront configuration

[api]
base_url = "{base_url}"
timeout_secs = 30

[retry]
# Retry n waits base_delay_ms * (n + 1) for the first max_backoff_steps retries.
base_delay_ms = 1000
max_backoff_steps = 3

[checkout]
submit_delay_ms = 2000
currency = "USD"
# Sales tax in basis points (800 = 8%).
tax_rate_bp = 800
"#,
        base_url = DEFAULT_BASE_URL
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_matches_defaults() {
        let parsed: StorefrontConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, StorefrontConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: StorefrontConfig = toml::from_str(
            r#"
[api]
base_url = "http://localhost:8080"

[checkout]
currency = "EUR"
"#,
        )
        .unwrap();

        assert_eq!(parsed.api.base_url, "http://localhost:8080");
        assert_eq!(parsed.api.timeout_secs, 30);
        assert_eq!(parsed.retry, RetrySection::default());
        assert_eq!(parsed.currency().unwrap(), Currency::EUR);
        assert_eq!(parsed.submit_delay(), Duration::from_millis(2000));
        assert_eq!(parsed.checkout.tax_rate_bp, 800);
    }

    #[test]
    fn test_json_config() {
        let parsed: StorefrontConfig =
            serde_json::from_str(r#"{"retry": {"base_delay_ms": 250}}"#).unwrap();
        let policy = parsed.retry_policy();
        assert_eq!(policy.delay_for(0), Some(Duration::from_millis(250)));
        assert_eq!(policy.delay_for(2), Some(Duration::from_millis(750)));
        assert_eq!(policy.delay_for(3), None);
    }

    #[test]
    fn test_api_config() {
        let config = StorefrontConfig::default();
        let api = config.api_config();
        assert_eq!(api.base_url, DEFAULT_BASE_URL);
        assert_eq!(api.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_unknown_currency_is_an_error() {
        let mut config = StorefrontConfig::default();
        config.checkout.currency = "XYZ".to_string();
        assert!(config.currency().is_err());
    }

    #[test]
    fn test_is_json() {
        assert!(is_json(Path::new("storefront.json")));
        assert!(!is_json(Path::new("storefront.toml")));
        assert!(!is_json(Path::new(".storefront.toml")));
    }
}
