//! Helpers for unit tests driving the client through a mocked transport

use std::sync::{Arc, Mutex};

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, SET_COOKIE};
use serde_json::Value;

use crate::client::PayPalClient;
use crate::config::{ClientConfig, ClientOptions};
use crate::diagnostics::CollectingDiagnostics;
use crate::transport::{EchoedRequest, MockTransport, RawResponse, TransportRequest};

pub(crate) type Sent = Arc<Mutex<Vec<TransportRequest>>>;

/// Response the way a real transport would produce it, secrets included
pub(crate) fn raw_response(request: &TransportRequest, status: u16, body: Value) -> RawResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(SET_COOKIE, HeaderValue::from_static("ts=vr%3Dabc; Secure"));
    headers.insert("paypal-debug-id", HeaderValue::from_static("8b2d1e4a9c3f"));

    let mut request_headers = request.headers.clone();
    request_headers.insert(
        AUTHORIZATION,
        HeaderValue::from_static("Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ="),
    );

    RawResponse {
        status,
        headers,
        body,
        request: EchoedRequest {
            method: request.method.clone(),
            url: request.url.clone(),
            headers: request_headers,
        },
    }
}

/// Mock transport answering every call with `status`/`body` and recording what was sent
pub(crate) fn recording_transport(status: u16, body: Value) -> (MockTransport, Sent) {
    let sent: Sent = Arc::new(Mutex::new(Vec::new()));
    let log = sent.clone();

    let mut transport = MockTransport::new();
    transport.expect_send().returning(move |request| {
        let response = raw_response(&request, status, body.clone());
        log.lock().unwrap().push(request);
        Ok(response)
    });

    (transport, sent)
}

/// Mock transport that must never be called
pub(crate) fn unused_transport() -> MockTransport {
    let mut transport = MockTransport::new();
    transport.expect_send().times(0);
    transport
}

pub(crate) fn sent_requests(sent: &Sent) -> Vec<TransportRequest> {
    sent.lock().unwrap().clone()
}

pub(crate) fn sandbox_client(
    transport: MockTransport,
) -> (PayPalClient, Arc<CollectingDiagnostics>) {
    let diagnostics = Arc::new(CollectingDiagnostics::new());
    let config =
        ClientConfig::new("client-id", "client-secret", None, ClientOptions::default()).unwrap();
    let client = PayPalClient::builder(config)
        .transport(Arc::new(transport))
        .diagnostics(diagnostics.clone())
        .build()
        .unwrap();
    diagnostics.take();
    (client, diagnostics)
}
