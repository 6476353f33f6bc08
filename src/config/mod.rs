//! Client configuration
//! Environment selection, credentials, list defaults, and file/env loading

pub mod settings;

use std::fmt;

use reqwest::header::HeaderValue;

use crate::error::{PayPalError, Result};

pub use settings::ClientSettings;

pub const SANDBOX_API_BASE_URL: &str = "https://api-m.sandbox.paypal.com";
pub const LIVE_API_BASE_URL: &str = "https://api.paypal.com";

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_PREFER: &str = "return=representation";

/// PayPal deployment to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    Live,
}

impl Environment {
    /// `"live"` selects production, anything else the sandbox
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("live") => Environment::Live,
            _ => Environment::Sandbox,
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_API_BASE_URL,
            Environment::Live => LIVE_API_BASE_URL,
        }
    }

    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }
}

impl From<&str> for Environment {
    fn from(value: &str) -> Self {
        Environment::parse(Some(value))
    }
}

impl From<String> for Environment {
    fn from(value: String) -> Self {
        Environment::parse(Some(&value))
    }
}

impl From<Option<&str>> for Environment {
    fn from(value: Option<&str>) -> Self {
        Environment::parse(value)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Live => write!(f, "live"),
        }
    }
}

/// Recognized initialization options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Default page size for list calls (default: 20)
    pub page_size: u32,
    /// Ask list calls to include totals (default: true)
    pub total_required: bool,
    /// Default `Prefer` header (default: "return=representation")
    pub prefer: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            total_required: true,
            prefer: DEFAULT_PREFER.to_string(),
        }
    }
}

/// Query parameters merged under every list call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListDefaults {
    pub page_size: u32,
    pub total_required: bool,
    pub page: u32,
}

/// Immutable client configuration
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    client_id: String,
    client_secret: String,
    environment: Environment,
    base_url: String,
    list_defaults: ListDefaults,
    prefer: String,
}

impl ClientConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        environment: impl Into<Environment>,
        options: ClientOptions,
    ) -> Result<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        let environment = environment.into();

        if client_id.trim().is_empty() {
            return Err(PayPalError::validation("client id is required"));
        }
        if client_secret.trim().is_empty() {
            return Err(PayPalError::validation("client secret is required"));
        }
        if options.page_size == 0 {
            return Err(PayPalError::validation("page_size must be at least 1"));
        }
        if HeaderValue::from_str(&options.prefer).is_err() {
            return Err(PayPalError::validation(format!(
                "prefer '{}' is not a valid header value",
                options.prefer
            )));
        }

        Ok(Self {
            client_id,
            client_secret,
            environment,
            base_url: environment.base_url().to_string(),
            list_defaults: ListDefaults {
                page_size: options.page_size,
                total_required: options.total_required,
                page: 1,
            },
            prefer: options.prefer,
        })
    }

    /// Point the client at another host, e.g. a proxy or a mock server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn list_defaults(&self) -> ListDefaults {
        self.list_defaults
    }

    pub fn prefer(&self) -> &str {
        &self.prefer
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("list_defaults", &self.list_defaults)
            .field("prefer", &self.prefer)
            .finish()
    }
}
