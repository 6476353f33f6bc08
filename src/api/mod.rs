//! PayPal REST resources
//! Orders (checkout v2), catalog products, billing plans and subscriptions

pub mod common;
pub mod orders;
pub mod plans;
pub mod products;
pub mod subscriptions;
pub mod vocab;

pub use common::{find_link, Address, Link, Money, Name, ShippingDetail};
pub use orders::{
    CaptureOptions, CreateOrder, Order, OrderApplicationContext, OrderIntent, OrderStatus, Orders,
    PurchaseUnit, UserAction,
};
pub use plans::{
    normalize_billing_cycles, BillingCycle, CreatePlan, Frequency, IntervalUnit, PaymentPreferences,
    Plan, PlanList, PlanStatus, PlanUpdate, Plans, PricingScheme, SetupFeeFailureAction, Taxes,
    TenureType,
};
pub use products::{
    CreateProduct, Product, ProductCategory, ProductList, ProductType, ProductUpdate, Products,
};
pub use subscriptions::{
    CreateSubscription, PayeePreference, PayerSelection, PaymentMethod, Subscriber, Subscription,
    SubscriptionAction, SubscriptionApplicationContext, SubscriptionStatus, Subscriptions,
};
pub use vocab::ShippingPreference;

use crate::client::PayPalClient;
use crate::diagnostics::Advisory;
use crate::error::{PayPalError, Result};

/// `<collection>/<id>`, rejecting ids that would escape their path segment
pub(crate) fn resource_path(collection: &str, id: &str) -> Result<String> {
    let escapes = id.chars().any(|c| {
        matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control()
    });
    if id.is_empty() || id == "." || id == ".." || escapes {
        return Err(PayPalError::validation(format!(
            "invalid resource id '{}'",
            id.escape_debug()
        )));
    }
    Ok(format!("{}/{}", collection, id))
}

/// Advise when a caller supplied idempotency id lacks the recommended prefix
pub(crate) fn check_request_id(client: &PayPalClient, request_id: Option<&str>, expected: &'static str) {
    if let Some(request_id) = request_id {
        if !request_id.starts_with(expected) {
            client.advise(Advisory::MissingIdPrefix {
                expected,
                request_id: request_id.to_string(),
            });
        }
    }
}

/// Advise when a vocabulary value is left out or is not one this client knows
pub(crate) fn check_vocabulary(
    client: &PayPalClient,
    vocabulary: &'static str,
    value: Option<(&str, bool)>,
) {
    match value {
        None => client.advise(Advisory::MissingValue { vocabulary }),
        Some((value, false)) => client.advise(Advisory::UnknownValue {
            vocabulary,
            value: value.to_string(),
        }),
        Some((_, true)) => {}
    }
}
