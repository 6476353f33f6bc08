//! PayPal gateway
//! Every resource operation funnels through [`PayPalClient::request`], which adds the
//! idempotency header, base URL and Basic credentials, then sanitizes the response.

pub mod patch;
pub mod query;
pub mod request;
pub mod response;

#[cfg(test)]
pub(crate) mod test_support;

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::api::{Orders, Plans, Products, Subscriptions};
use crate::config::{ClientConfig, ClientOptions, Environment};
use crate::diagnostics::{Advisory, DiagnosticSink, TracingDiagnostics};
use crate::error::{PayPalError, Result};
use crate::transport::{BasicAuth, ReqwestTransport, Transport, TransportRequest};

pub use patch::{build_patch, PatchOp, PatchOperation, PatchValue};
pub use query::ListQuery;
pub use request::{generate_request_id, RequestDescriptor, REQUEST_ID_HEADER};
pub use response::{is_sensitive_header, redact_headers, sanitize, ResponseEnvelope, REDACTED};

/// Configured PayPal client. Cheap to clone; clones share configuration and transport.
#[derive(Clone)]
pub struct PayPalClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl PayPalClient {
    /// Build a client with the reqwest transport and tracing diagnostics.
    /// `"live"` selects production; anything else, including `None`, the sandbox.
    pub fn init(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        environment: impl Into<Environment>,
        options: ClientOptions,
    ) -> Result<Self> {
        let config = ClientConfig::new(client_id, client_secret, environment, options)?;
        Self::builder(config).build()
    }

    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder {
            config,
            transport: None,
            diagnostics: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Report a non-fatal finding to the configured sink
    pub fn advise(&self, advisory: Advisory) {
        self.diagnostics.emit(&advisory);
    }

    /// Send one request through the transport and return the sanitized response.
    /// Status codes are not checked here.
    pub async fn request(&self, descriptor: RequestDescriptor) -> Result<ResponseEnvelope> {
        let RequestDescriptor {
            method,
            path,
            request_id,
            headers: extra_headers,
            query,
            body,
        } = descriptor;

        let mut headers = HeaderMap::new();
        if let Some(request_id) = request_id {
            let value = HeaderValue::from_str(&request_id).map_err(|_| {
                PayPalError::validation(format!(
                    "request id '{}' is not a valid header value",
                    request_id
                ))
            })?;
            headers.insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }
        headers.extend(extra_headers);

        let url = self.url_for(&path);
        debug!("PayPal request: {} {}", method, url);

        let raw = self
            .transport
            .send(TransportRequest {
                method,
                url,
                headers,
                query,
                auth: BasicAuth {
                    user: self.config.client_id().to_string(),
                    pass: self.config.client_secret().to_string(),
                },
                body,
            })
            .await?;

        let response = sanitize(raw);
        debug!(
            "PayPal response: {} {} -> {}",
            response.request.method, response.request.url, response.status
        );
        Ok(response)
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.config.base_url(), path)
        } else {
            format!("{}/{}", self.config.base_url(), path)
        }
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders::new(self)
    }

    pub fn products(&self) -> Products<'_> {
        Products::new(self)
    }

    pub fn plans(&self) -> Plans<'_> {
        Plans::new(self)
    }

    pub fn subscriptions(&self) -> Subscriptions<'_> {
        Subscriptions::new(self)
    }
}

impl fmt::Debug for PayPalClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayPalClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`PayPalClient`] with injectable transport and diagnostics
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
}

impl ClientBuilder {
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Finish the client. Emits the sandbox advisory when applicable.
    pub fn build(self) -> Result<PayPalClient> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };
        let diagnostics = self
            .diagnostics
            .unwrap_or_else(|| Arc::new(TracingDiagnostics));

        if self.config.environment().is_sandbox() {
            diagnostics.emit(&Advisory::SandboxEnvironment {
                base_url: self.config.base_url().to_string(),
            });
        }

        Ok(PayPalClient {
            config: Arc::new(self.config),
            transport,
            diagnostics,
        })
    }
}
