//! Request descriptor handed to [`PayPalClient::request`](super::PayPalClient::request)

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{PayPalError, Result};

/// `PayPal-Request-Id`, the idempotency header
pub const REQUEST_ID_HEADER: &str = "paypal-request-id";

/// Method, path, optional idempotency id, headers, query and body of one call.
/// Built fresh per call and consumed by the gateway.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path below the configured base URL, e.g. `/v2/checkout/orders`
    pub path: String,
    pub request_id: Option<String>,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            request_id: None,
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Set the idempotency id; `None` leaves the header off
    pub fn request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Add a header from strings, rejecting values that cannot go on the wire
    pub fn try_header(self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| PayPalError::validation(format!("invalid header name '{}'", name)))?;
        let value = HeaderValue::from_str(value).map_err(|_| {
            PayPalError::validation(format!("invalid value for header '{}'", name))
        })?;
        Ok(self.header(name, value))
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Fresh idempotency id such as `PROD-6f1c...`
pub fn generate_request_id(prefix: &str) -> String {
    format!("{}{}", prefix, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_collects_parts() {
        let descriptor = RequestDescriptor::post("/v1/billing/plans")
            .request_id(Some("PLAN-001".to_string()))
            .try_header("Prefer", "return=representation")
            .unwrap()
            .json(&json!({"name": "Basic Plan"}))
            .unwrap();

        assert_eq!(descriptor.method, Method::POST);
        assert_eq!(descriptor.path, "/v1/billing/plans");
        assert_eq!(descriptor.request_id.as_deref(), Some("PLAN-001"));
        assert_eq!(descriptor.headers.get("prefer").unwrap(), "return=representation");
        assert_eq!(descriptor.body, Some(json!({"name": "Basic Plan"})));
    }

    #[test]
    fn test_try_header_rejects_control_chars() {
        assert!(RequestDescriptor::get("/").try_header("Prefer", "a\nb").is_err());
        assert!(RequestDescriptor::get("/").try_header("bad header", "x").is_err());
    }

    #[test]
    fn test_generate_request_id_prefix() {
        let a = generate_request_id("PROD-");
        let b = generate_request_id("PROD-");
        assert!(a.starts_with("PROD-"));
        assert_eq!(a.len(), "PROD-".len() + 32);
        assert_ne!(a, b);
    }
}
