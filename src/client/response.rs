//! Response envelope, header redaction and status checks

use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{PayPalError, Result};
use crate::transport::{EchoedRequest, RawResponse};

/// Replacement for sensitive header values
pub const REDACTED: &str = "[redacted]";

const SENSITIVE_HEADER_PATTERNS: [&str; 4] = ["auth", "cookie", "token", "key"];

/// Sanitized response: status, redacted headers, parsed body and the redacted echoed request
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Value,
    pub request: EchoedRequest,
}

impl ResponseEnvelope {
    /// Accept 200 or 201
    pub fn expect_create_or_ok(self) -> Result<Self> {
        expect_status(self, &[200, 201])
    }

    /// Accept 200 or 204
    pub fn expect_update_or_no_content(self) -> Result<Self> {
        expect_status(self, &[200, 204])
    }

    pub fn into_body(self) -> Value {
        self.body
    }

    /// Deserialize the body
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.body)?)
    }
}

fn expect_status(response: ResponseEnvelope, accepted: &[u16]) -> Result<ResponseEnvelope> {
    if accepted.contains(&response.status) {
        Ok(response)
    } else {
        Err(PayPalError::UnexpectedStatus(Box::new(response)))
    }
}

/// Case-insensitive substring match on "Auth", "Cookie", "Token", "Key"
pub fn is_sensitive_header(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    SENSITIVE_HEADER_PATTERNS
        .iter()
        .any(|pattern| name.contains(pattern))
}

/// Replace every sensitive header value with [`REDACTED`], leaving the rest untouched
pub fn redact_headers(headers: &mut HeaderMap) {
    let sensitive: Vec<_> = headers
        .keys()
        .filter(|name| is_sensitive_header(name.as_str()))
        .cloned()
        .collect();

    for name in sensitive {
        headers.insert(name, HeaderValue::from_static(REDACTED));
    }
}

/// Normalize a raw transport response into a redacted envelope.
/// Takes ownership so no unredacted copy survives the call.
pub fn sanitize(raw: RawResponse) -> ResponseEnvelope {
    let RawResponse {
        status,
        mut headers,
        body,
        mut request,
    } = raw;

    redact_headers(&mut headers);
    redact_headers(&mut request.headers);

    ResponseEnvelope {
        status,
        headers,
        body,
        request,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, SET_COOKIE};
    use reqwest::Method;
    use serde_json::json;

    fn envelope(status: u16) -> ResponseEnvelope {
        ResponseEnvelope {
            status,
            headers: HeaderMap::new(),
            body: json!({"id": "P-5ML4271244454362WXNWU5NQ"}),
            request: EchoedRequest {
                method: Method::GET,
                url: "https://api-m.sandbox.paypal.com/v1/billing/plans".to_string(),
                headers: HeaderMap::new(),
            },
        }
    }

    #[test]
    fn test_create_or_ok_accepts_200_201() {
        for status in [200, 201] {
            let response = envelope(status).expect_create_or_ok().unwrap();
            assert_eq!(response.status, status);
        }
    }

    #[test]
    fn test_create_or_ok_rejects_others() {
        for status in [204, 400, 404, 500] {
            let err = envelope(status).expect_create_or_ok().unwrap_err();
            assert_eq!(err.status(), Some(status));
            assert_eq!(err.response().unwrap().body, json!({"id": "P-5ML4271244454362WXNWU5NQ"}));
        }
    }

    #[test]
    fn test_update_or_no_content() {
        for status in [200, 204] {
            assert!(envelope(status).expect_update_or_no_content().is_ok());
        }
        for status in [201, 400] {
            let err = envelope(status).expect_update_or_no_content().unwrap_err();
            assert!(matches!(err, PayPalError::UnexpectedStatus(_)));
        }
    }

    #[test]
    fn test_sensitive_header_patterns() {
        for name in [
            "Authorization",
            "proxy-authenticate",
            "Set-Cookie",
            "cookie",
            "X-Auth-Token",
            "x-api-key",
            "PAYPAL-AUTH-ASSERTION",
            "Ocp-Apim-Subscription-Key",
        ] {
            assert!(is_sensitive_header(name), "{} should be redacted", name);
        }
        for name in ["content-type", "paypal-debug-id", "PayPal-Request-Id", "date"] {
            assert!(!is_sensitive_header(name), "{} should pass through", name);
        }
    }

    #[test]
    fn test_sanitize_redacts_both_header_maps() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(SET_COOKIE, HeaderValue::from_static("session=abc"));
        headers.append(SET_COOKIE, HeaderValue::from_static("tracking=def"));
        headers.insert("paypal-debug-id", HeaderValue::from_static("f1b2c3d4"));

        let mut request_headers = HeaderMap::new();
        request_headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic Y2xpZW50OnNlY3JldA=="));
        request_headers.insert("paypal-request-id", HeaderValue::from_static("PROD-1"));
        request_headers.insert("x-access-token", HeaderValue::from_static("tok"));

        let envelope = sanitize(RawResponse {
            status: 201,
            headers,
            body: json!({"id": "PROD-XYAB12ABSB7868434"}),
            request: EchoedRequest {
                method: Method::POST,
                url: "https://api-m.sandbox.paypal.com/v1/catalogs/products".to_string(),
                headers: request_headers,
            },
        });

        assert_eq!(envelope.headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(envelope.headers.get("paypal-debug-id").unwrap(), "f1b2c3d4");
        let cookies: Vec<_> = envelope.headers.get_all(SET_COOKIE).iter().collect();
        assert_eq!(cookies, vec![REDACTED]);

        assert_eq!(envelope.request.headers.get(AUTHORIZATION).unwrap(), REDACTED);
        assert_eq!(envelope.request.headers.get("x-access-token").unwrap(), REDACTED);
        assert_eq!(envelope.request.headers.get("paypal-request-id").unwrap(), "PROD-1");
        assert_eq!(envelope.status, 201);
    }

    #[test]
    fn test_json_deserializes_body() {
        #[derive(serde::Deserialize)]
        struct Plan {
            id: String,
        }
        let plan: Plan = envelope(200).json().unwrap();
        assert_eq!(plan.id, "P-5ML4271244454362WXNWU5NQ");
    }
}
