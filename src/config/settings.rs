//! Settings loading
//! Supports TOML, YAML, JSON config files and `PAYPAL_*` environment variables

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ClientConfig, ClientOptions, Environment, DEFAULT_PAGE_SIZE, DEFAULT_PREFER};

/// Serializable form of the client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub client_id: String,
    pub client_secret: String,
    /// "live" or anything else for sandbox
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub total_required: Option<bool>,
    #[serde(default)]
    pub prefer: Option<String>,
    /// Overrides the environment's host
    #[serde(default)]
    pub base_url: Option<String>,
    /// Logging level
    #[serde(default)]
    pub log_level: Option<String>,
}

impl ClientSettings {
    /// Load settings from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        info!("Loading PayPal settings from: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let settings = match extension {
            "toml" => toml::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => {
                if content.trim_start().starts_with('{') {
                    serde_json::from_str(&content)?
                } else if content.contains("---") {
                    serde_yaml::from_str(&content)?
                } else {
                    toml::from_str(&content)?
                }
            }
        };

        Ok(settings)
    }

    /// Load from `PAYPAL_CLIENT_ID`, `PAYPAL_CLIENT_SECRET`, `PAYPAL_ENVIRONMENT`, ...
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_env_prefix("PAYPAL")
    }

    /// Load from `<PREFIX>_CLIENT_ID` etc.
    pub fn from_env_prefix(prefix: &str) -> anyhow::Result<Self> {
        let source = config::Config::builder()
            .add_source(config::Environment::with_prefix(prefix).try_parsing(true))
            .build()?;
        let settings: ClientSettings = source.try_deserialize()?;
        Ok(settings)
    }

    /// Load from default locations, falling back to the environment
    pub fn load() -> anyhow::Result<Self> {
        let locations = [
            "paypal-checkout.toml",
            "paypal-checkout.yaml",
            "paypal-checkout.yml",
            "paypal-checkout.json",
            ".paypal-checkout.toml",
        ];

        for location in &locations {
            if Path::new(location).exists() {
                return Self::from_file(location);
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_file = config_dir.join("paypal-checkout/config.toml");
            if config_file.exists() {
                return Self::from_file(config_file);
            }
        }

        Self::from_env()
    }

    /// Save settings to file with the client secret removed
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();

        let mut safe = self.clone();
        safe.client_secret = String::new();

        let content = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::to_string_pretty(&safe)?,
            Some("yaml") | Some("yml") => serde_yaml::to_string(&safe)?,
            _ => serde_json::to_string_pretty(&safe)?,
        };

        std::fs::write(path, content)?;
        info!("PayPal settings saved to: {} (secret removed)", path.display());
        Ok(())
    }

    pub fn options(&self) -> ClientOptions {
        ClientOptions {
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            total_required: self.total_required.unwrap_or(true),
            prefer: self
                .prefer
                .clone()
                .unwrap_or_else(|| DEFAULT_PREFER.to_string()),
        }
    }

    /// Validate and build the immutable [`ClientConfig`]
    pub fn into_config(self) -> crate::Result<ClientConfig> {
        let options = self.options();
        let environment = Environment::parse(self.environment.as_deref());
        let config = ClientConfig::new(self.client_id, self.client_secret, environment, options)?;

        Ok(match self.base_url {
            Some(base_url) => config.with_base_url(base_url),
            None => config,
        })
    }
}
