//! CLI configuration.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use techmart_catalog::ids::CategoryId;

/// Environment variable overriding `api.base_url`.
pub const ENV_API_URL: &str = "TECHMART_API_URL";
/// Environment variable overriding `api.token`.
pub const ENV_TOKEN: &str = "TECHMART_TOKEN";

/// CLI configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Backend connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Category aliases, e.g. `laptop = 21`.
    #[serde(default = "default_categories")]
    pub categories: BTreeMap<String, i64>,

    /// Checkout settings.
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            categories: default_categories(),
            checkout: CheckoutConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse config text; the format follows the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Apply `TECHMART_API_URL` / `TECHMART_TOKEN` overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(ENV_API_URL).ok(),
            std::env::var(ENV_TOKEN).ok(),
        )
    }

    fn with_overrides(mut self, base_url: Option<String>, token: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.is_empty()) {
            self.api.base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.api.token = Some(token);
        }
        self
    }

    /// Resolve a category argument: a configured alias or a numeric id.
    pub fn category(&self, name_or_id: &str) -> Result<CategoryId> {
        if let Some(id) = self.categories.get(&name_or_id.to_lowercase()) {
            return Ok(CategoryId::new(*id));
        }
        name_or_id.parse::<i64>().map(CategoryId::new).with_context(|| {
            let known: Vec<&str> = self.categories.keys().map(String::as_str).collect();
            format!(
                "Unknown category '{}' (known: {})",
                name_or_id,
                known.join(", ")
            )
        })
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// REST base URL, including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Origin that relative image paths are served from.
    #[serde(default = "default_asset_origin")]
    pub asset_origin: String,

    /// Bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_asset_origin() -> String {
    "http://localhost:8080".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            asset_origin: default_asset_origin(),
            token: None,
        }
    }
}

fn default_categories() -> BTreeMap<String, i64> {
    BTreeMap::from([("laptop".to_string(), 21), ("phone".to_string(), 2)])
}

/// Checkout settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutConfig {
    /// Flat delivery fee in VND.
    #[serde(default = "default_shipping_fee")]
    pub shipping_fee: f64,
}

fn default_shipping_fee() -> f64 {
    30_000.0
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            shipping_fee: default_shipping_fee(),
        }
    }
}

/// Generate a default techmart.toml config file.
pub fn generate_default_config(base_url: &str) -> String {
    format!(
        r#"# TechMart storefront configuration

[api]
base_url = "{base_url}"
asset_origin = "http://localhost:8080"
# token = "..."

[categories]
laptop = 21
phone = 2

[checkout]
shipping_fee = 30000
"#,
        base_url = base_url
    )
}
