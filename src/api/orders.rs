//! Checkout orders (`/v2/checkout/orders`)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::api::common::{find_link, Link, Money, ShippingDetail};
use crate::api::resource_path;
use crate::api::vocab::{open_vocabulary, ShippingPreference};
use crate::client::{PayPalClient, RequestDescriptor};
use crate::error::{PayPalError, Result};

const ORDERS_PATH: &str = "/v2/checkout/orders";

open_vocabulary! {
    /// Whether the order is captured immediately or authorized for later capture
    OrderIntent("order intent") {
        Capture => "CAPTURE",
        Authorize => "AUTHORIZE",
    }
}

impl Default for OrderIntent {
    fn default() -> Self {
        OrderIntent::Capture
    }
}

open_vocabulary! {
    /// Label of the final button on the PayPal approval page
    UserAction("order user action") {
        Continue => "CONTINUE",
        PayNow => "PAY_NOW",
    }
}

open_vocabulary! {
    OrderStatus("order status") {
        Created => "CREATED",
        Saved => "SAVED",
        Approved => "APPROVED",
        Voided => "VOIDED",
        Completed => "COMPLETED",
        PayerActionRequired => "PAYER_ACTION_REQUIRED",
    }
}

/// One purchase unit: an amount plus optional description and shipping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseUnit {
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<ShippingDetail>,
    /// Fields not modelled here, sent and returned verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PurchaseUnit {
    pub fn new(amount: Money) -> Self {
        Self {
            amount,
            reference_id: None,
            description: None,
            custom_id: None,
            invoice_id: None,
            shipping: None,
            extra: Map::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderApplicationContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_preference: Option<ShippingPreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_action: Option<UserAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
}

/// Input to [`Orders::create_request`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateOrder {
    /// Sent as the idempotency header, not in the body
    #[serde(skip)]
    pub request_id: Option<String>,
    /// Defaults to `CAPTURE`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<OrderIntent>,
    pub purchase_units: Vec<PurchaseUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_context: Option<OrderApplicationContext>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateOrder {
    pub fn new(purchase_units: Vec<PurchaseUnit>) -> Self {
        Self {
            purchase_units,
            ..Self::default()
        }
    }
}

/// Body of the capture call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaptureOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_to_payer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_capture: Option<bool>,
}

/// Order representation returned by PayPal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<OrderIntent>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    /// Where to send the buyer to approve the order
    pub fn approve_url(&self) -> Option<&str> {
        find_link(&self.links, "approve").map(|link| link.href.as_str())
    }
}

/// Order operations bound to a client
#[derive(Debug, Clone, Copy)]
pub struct Orders<'a> {
    client: &'a PayPalClient,
}

impl<'a> Orders<'a> {
    pub(crate) fn new(client: &'a PayPalClient) -> Self {
        Self { client }
    }

    /// Create an order. Fails before any request if there are no purchase units.
    pub async fn create_request(&self, mut order: CreateOrder) -> Result<Order> {
        if order.purchase_units.is_empty() {
            return Err(PayPalError::validation(
                "order must have at least one purchase unit",
            ));
        }
        let intent = order.intent.get_or_insert_with(OrderIntent::default).clone();

        let descriptor = RequestDescriptor::post(ORDERS_PATH)
            .request_id(order.request_id.clone())
            .json(&order)?;
        let created: Order = self
            .client
            .request(descriptor)
            .await?
            .expect_create_or_ok()?
            .json()?;

        info!("Created PayPal order {} ({})", created.id, intent);
        Ok(created)
    }

    pub async fn details(&self, id: &str) -> Result<Order> {
        self.client
            .request(RequestDescriptor::get(resource_path(ORDERS_PATH, id)?))
            .await?
            .expect_create_or_ok()?
            .json()
    }

    /// Capture an approved order
    pub async fn capture(&self, id: &str, options: CaptureOptions) -> Result<Order> {
        let path = format!("{}/capture", resource_path(ORDERS_PATH, id)?);
        let descriptor = RequestDescriptor::post(path).json(&options)?;
        let captured: Order = self
            .client
            .request(descriptor)
            .await?
            .expect_create_or_ok()?
            .json()?;

        info!("Captured PayPal order {}", captured.id);
        Ok(captured)
    }
}
