//! Billing subscriptions (`/v1/billing/subscriptions`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::info;

use crate::api::common::{find_link, Link, Money, Name, ShippingDetail};
use crate::api::resource_path;
use crate::api::vocab::{open_vocabulary, ShippingPreference};
use crate::client::{PayPalClient, RequestDescriptor};
use crate::error::Result;

const SUBSCRIPTIONS_PATH: &str = "/v1/billing/subscriptions";

open_vocabulary! {
    /// Label of the final button on the approval page
    SubscriptionAction("subscription user action") {
        Continue => "CONTINUE",
        SubscribeNow => "SUBSCRIBE_NOW",
    }
}

open_vocabulary! {
    PayerSelection("payer selection") {
        Paypal => "PAYPAL",
    }
}

open_vocabulary! {
    PayeePreference("payee preference") {
        Unrestricted => "UNRESTRICTED",
        ImmediatePaymentRequired => "IMMEDIATE_PAYMENT_REQUIRED",
    }
}

open_vocabulary! {
    SubscriptionStatus("subscription status") {
        ApprovalPending => "APPROVAL_PENDING",
        Approved => "APPROVED",
        Active => "ACTIVE",
        Suspended => "SUSPENDED",
        Cancelled => "CANCELLED",
        Expired => "EXPIRED",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Name>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<ShippingDetail>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_selected: Option<PayerSelection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_preferred: Option<PayeePreference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionApplicationContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_preference: Option<ShippingPreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_action: Option<SubscriptionAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
}

/// Input to [`Subscriptions::create_request`]. Sent as given, nothing is defaulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateSubscription {
    #[serde(skip)]
    pub request_id: Option<String>,
    pub plan_id: String,
    /// Must be in the future
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber: Option<Subscriber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_context: Option<SubscriptionApplicationContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub status: Option<SubscriptionStatus>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub subscriber: Option<Subscriber>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Subscription {
    /// Where to send the subscriber to approve
    pub fn approve_url(&self) -> Option<&str> {
        find_link(&self.links, "approve").map(|link| link.href.as_str())
    }
}

/// Subscription operations bound to a client
#[derive(Debug, Clone, Copy)]
pub struct Subscriptions<'a> {
    client: &'a PayPalClient,
}

impl<'a> Subscriptions<'a> {
    pub(crate) fn new(client: &'a PayPalClient) -> Self {
        Self { client }
    }

    pub async fn create_request(&self, subscription: CreateSubscription) -> Result<Subscription> {
        let descriptor = RequestDescriptor::post(SUBSCRIPTIONS_PATH)
            .request_id(subscription.request_id.clone())
            .json(&subscription)?;
        let created: Subscription = self
            .client
            .request(descriptor)
            .await?
            .expect_create_or_ok()?
            .json()?;

        info!(
            "Created PayPal subscription {} on plan {}",
            created.id, subscription.plan_id
        );
        Ok(created)
    }

    pub async fn details(&self, id: &str) -> Result<Subscription> {
        self.client
            .request(RequestDescriptor::get(resource_path(SUBSCRIPTIONS_PATH, id)?))
            .await?
            .expect_create_or_ok()?
            .json()
    }

    /// Stop future billing. Returns the response body as-is.
    pub async fn cancel(&self, id: &str, reason: &str) -> Result<Value> {
        let path = format!("{}/cancel", resource_path(SUBSCRIPTIONS_PATH, id)?);
        let descriptor = RequestDescriptor::post(path).json(&json!({ "reason": reason }))?;
        let body = self
            .client
            .request(descriptor)
            .await?
            .expect_create_or_ok()?
            .into_body();

        info!("Cancelled PayPal subscription {}", id);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::Address;
    use crate::client::test_support::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use reqwest::Method;
    use rust_decimal_macros::dec;
    use tokio_test::{assert_err, assert_ok};

    fn pending() -> Value {
        json!({
            "id": "I-BW452GLLEP1G",
            "plan_id": "P-5ML4271244454362WXNWU5NQ",
            "status": "APPROVAL_PENDING",
            "create_time": "2018-12-10T21:20:49Z",
            "links": [
                {"href": "https://www.sandbox.paypal.com/webapps/billing/subscriptions?ba_token=BA-2M539689T3856352J", "rel": "approve", "method": "GET"},
                {"href": "https://api-m.sandbox.paypal.com/v1/billing/subscriptions/I-BW452GLLEP1G", "rel": "edit", "method": "PATCH"}
            ]
        })
    }

    #[tokio::test]
    async fn test_create_passes_fields_through() {
        let (transport, sent) = recording_transport(201, pending());
        let (client, diagnostics) = sandbox_client(transport);

        let request = CreateSubscription {
            request_id: Some("SUB-2020-001".to_string()),
            plan_id: "P-5ML4271244454362WXNWU5NQ".to_string(),
            start_time: Some(Utc.with_ymd_and_hms(2030, 11, 1, 0, 0, 0).unwrap()),
            quantity: Some("20".to_string()),
            shipping_amount: Some(Money::new("USD", dec!(10.00))),
            subscriber: Some(Subscriber {
                name: Some(Name {
                    given_name: Some("John".to_string()),
                    surname: Some("Doe".to_string()),
                    full_name: None,
                }),
                email_address: Some("customer@example.com".to_string()),
                shipping_address: Some(ShippingDetail {
                    name: None,
                    address: Some(Address {
                        address_line_1: Some("123 Sesame Street".to_string()),
                        admin_area_2: Some("San Jose".to_string()),
                        admin_area_1: Some("CA".to_string()),
                        postal_code: Some("95131".to_string()),
                        country_code: "US".to_string(),
                        ..Address::default()
                    }),
                }),
                extra: Map::new(),
            }),
            application_context: Some(SubscriptionApplicationContext {
                brand_name: Some("walmart".to_string()),
                shipping_preference: Some(ShippingPreference::SetProvidedAddress),
                user_action: Some(SubscriptionAction::SubscribeNow),
                payment_method: Some(PaymentMethod {
                    payer_selected: Some(PayerSelection::Paypal),
                    payee_preferred: Some(PayeePreference::ImmediatePaymentRequired),
                }),
                return_url: Some("https://example.com/returnUrl".to_string()),
                cancel_url: Some("https://example.com/cancelUrl".to_string()),
                ..SubscriptionApplicationContext::default()
            }),
        };

        let subscription = assert_ok!(client.subscriptions().create_request(request).await);
        assert_eq!(subscription.status, Some(SubscriptionStatus::ApprovalPending));
        assert_eq!(
            subscription.approve_url(),
            Some("https://www.sandbox.paypal.com/webapps/billing/subscriptions?ba_token=BA-2M539689T3856352J")
        );
        assert!(diagnostics.advisories().is_empty());

        let sent = sent_requests(&sent);
        assert_eq!(sent[0].url, "https://api-m.sandbox.paypal.com/v1/billing/subscriptions");
        assert_eq!(sent[0].headers.get("PayPal-Request-Id").unwrap(), "SUB-2020-001");
        assert_eq!(
            sent[0].body,
            Some(json!({
                "plan_id": "P-5ML4271244454362WXNWU5NQ",
                "start_time": "2030-11-01T00:00:00Z",
                "quantity": "20",
                "shipping_amount": {"currency_code": "USD", "value": "10.00"},
                "subscriber": {
                    "name": {"given_name": "John", "surname": "Doe"},
                    "email_address": "customer@example.com",
                    "shipping_address": {
                        "address": {
                            "address_line_1": "123 Sesame Street",
                            "admin_area_2": "San Jose",
                            "admin_area_1": "CA",
                            "postal_code": "95131",
                            "country_code": "US"
                        }
                    }
                },
                "application_context": {
                    "brand_name": "walmart",
                    "shipping_preference": "SET_PROVIDED_ADDRESS",
                    "user_action": "SUBSCRIBE_NOW",
                    "payment_method": {
                        "payer_selected": "PAYPAL",
                        "payee_preferred": "IMMEDIATE_PAYMENT_REQUIRED"
                    },
                    "return_url": "https://example.com/returnUrl",
                    "cancel_url": "https://example.com/cancelUrl"
                }
            }))
        );
    }

    #[tokio::test]
    async fn test_create_minimal_body() {
        let (transport, sent) = recording_transport(201, pending());
        let (client, _) = sandbox_client(transport);

        let request = CreateSubscription {
            plan_id: "P-5ML4271244454362WXNWU5NQ".to_string(),
            ..CreateSubscription::default()
        };
        assert_ok!(client.subscriptions().create_request(request).await);

        let sent = sent_requests(&sent);
        assert!(sent[0].headers.get("PayPal-Request-Id").is_none());
        assert_eq!(sent[0].body, Some(json!({"plan_id": "P-5ML4271244454362WXNWU5NQ"})));
    }

    #[tokio::test]
    async fn test_details_keeps_unmodelled_fields() {
        let mut body = pending();
        body["status"] = json!("ACTIVE");
        body["billing_info"] = json!({"failed_payments_count": 0});
        let (transport, sent) = recording_transport(200, body);
        let (client, _) = sandbox_client(transport);

        let subscription = assert_ok!(client.subscriptions().details("I-BW452GLLEP1G").await);
        assert_eq!(subscription.status, Some(SubscriptionStatus::Active));
        assert_eq!(subscription.extra["billing_info"]["failed_payments_count"], 0);

        let sent = sent_requests(&sent);
        assert_eq!(sent[0].method, Method::GET);
        assert_eq!(
            sent[0].url,
            "https://api-m.sandbox.paypal.com/v1/billing/subscriptions/I-BW452GLLEP1G"
        );
    }

    #[tokio::test]
    async fn test_cancel_posts_reason_to_subscription() {
        let (transport, sent) = recording_transport(200, json!({}));
        let (client, _) = sandbox_client(transport);

        let body = assert_ok!(
            client
                .subscriptions()
                .cancel("I-BW452GLLEP1G", "Not satisfied with the service")
                .await
        );
        assert_eq!(body, json!({}));

        let sent = sent_requests(&sent);
        assert_eq!(sent[0].method, Method::POST);
        assert_eq!(
            sent[0].url,
            "https://api-m.sandbox.paypal.com/v1/billing/subscriptions/I-BW452GLLEP1G/cancel"
        );
        assert_eq!(sent[0].body, Some(json!({"reason": "Not satisfied with the service"})));
    }

    #[tokio::test]
    async fn test_cancel_rejects_id_leaving_subscriptions() {
        let (client, _) = sandbox_client(unused_transport());

        let err = assert_err!(
            client
                .subscriptions()
                .cancel("../../catalogs/products/PROD-1", "Moving away")
                .await
        );
        assert!(matches!(err, crate::error::PayPalError::Validation(_)));
    }

    #[tokio::test]
    async fn test_cancel_no_content_is_unexpected() {
        let (transport, _) = recording_transport(204, Value::Null);
        let (client, _) = sandbox_client(transport);

        let err = assert_err!(client.subscriptions().cancel("I-BW452GLLEP1G", "Moving away").await);
        assert_eq!(err.status(), Some(204));
    }
}
