//! HTTP transport seam
//! The client never talks to the network directly; every call goes through a [`Transport`].

pub mod http;

use std::fmt;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;
use thiserror::Error;

pub use http::ReqwestTransport;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Other(String),
}

/// HTTP Basic credentials
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub user: String,
    pub pass: String,
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("user", &self.user)
            .field("pass", &"[redacted]")
            .finish()
    }
}

/// Fully formed request handed to the transport
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    /// Absolute URL without the query string
    pub url: String,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub auth: BasicAuth,
    pub body: Option<Value>,
}

/// The request as it actually went out, echoed back with the response
#[derive(Debug, Clone)]
pub struct EchoedRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
}

/// Unsanitized response as produced by a transport
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Value,
    pub request: EchoedRequest,
}

/// Performs the network call for a [`TransportRequest`]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<RawResponse, TransportError>;
}

/// Empty bodies become `null`, non-JSON bodies a JSON string
pub fn parse_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
