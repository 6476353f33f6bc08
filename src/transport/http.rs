//! reqwest-backed transport

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use tracing::trace;

use super::{parse_body, EchoedRequest, RawResponse, Transport, TransportError, TransportRequest};

/// Default [`Transport`] built on a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create transport with request and connect timeouts
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an existing client (custom TLS, proxies, ...)
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .headers(request.headers)
            .basic_auth(&request.auth.user, Some(&request.auth.pass));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let built = builder.build()?;
        let echoed = EchoedRequest {
            method: built.method().clone(),
            url: built.url().to_string(),
            headers: built.headers().clone(),
        };

        let response = self.client.execute(built).await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;
        trace!("{} {} -> {} ({} bytes)", echoed.method, echoed.url, status, bytes.len());

        Ok(RawResponse {
            status,
            headers,
            body: parse_body(&bytes),
            request: echoed,
        })
    }
}
