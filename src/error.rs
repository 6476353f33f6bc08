//! Error types for PayPal API calls

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::ResponseEnvelope;
use crate::transport::TransportError;

/// Errors returned by every client and resource operation
#[derive(Error, Debug)]
pub enum PayPalError {
    /// Required input missing or malformed, detected before any request is sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// The call reached PayPal but the status code was not one the operation accepts.
    /// The envelope is already sanitized.
    #[error("Unexpected status {} from {} {}", .0.status, .0.request.method, .0.request.url)]
    UnexpectedStatus(Box<ResponseEnvelope>),

    /// Network or connection level failure
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Body (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PayPalError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        PayPalError::Validation(message.into())
    }

    /// HTTP status of an unexpected response
    pub fn status(&self) -> Option<u16> {
        self.response().map(|r| r.status)
    }

    /// The sanitized response behind an `UnexpectedStatus` error
    pub fn response(&self) -> Option<&ResponseEnvelope> {
        match self {
            PayPalError::UnexpectedStatus(envelope) => Some(envelope),
            _ => None,
        }
    }

    /// Parse PayPal's standard error body out of an unexpected response
    pub fn api_details(&self) -> Option<ApiErrorDetails> {
        let envelope = self.response()?;
        serde_json::from_value(envelope.body.clone()).ok()
    }

    /// Short category for log fields
    pub fn category(&self) -> &'static str {
        match self {
            PayPalError::Validation(_) => "VALIDATION",
            PayPalError::UnexpectedStatus(_) => "STATUS",
            PayPalError::Transport(_) => "TRANSPORT",
            PayPalError::Json(_) => "JSON",
        }
    }
}

/// PayPal's error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetails {
    pub name: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub debug_id: Option<String>,
    #[serde(default)]
    pub details: Vec<ApiErrorIssue>,
}

/// One entry of `details[]` in an error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorIssue {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    pub issue: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, PayPalError>;
