//! PayPal Checkout - REST client for PayPal payments in Rust
//!
//! Features:
//! - Checkout orders: create, details, capture
//! - Catalog products and billing plans with partial (patch) updates
//! - Subscriptions: create, details, cancel
//! - Idempotency ids, redacted responses, injectable transport and diagnostics
//!
//! ```no_run
//! use paypal_checkout::{ClientOptions, CreateOrder, Money, PayPalClient, PurchaseUnit};
//! use rust_decimal::Decimal;
//!
//! # async fn run() -> paypal_checkout::Result<()> {
//! let client = PayPalClient::init("client-id", "client-secret", "live", ClientOptions::default())?;
//! let order = client
//!     .orders()
//!     .create_request(CreateOrder::new(vec![PurchaseUnit::new(Money::new(
//!         "USD",
//!         Decimal::new(10000, 2),
//!     ))]))
//!     .await?;
//! println!("approve at {:?}", order.approve_url());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod transport;

// Re-export commonly used types
pub use api::{
    find_link, CaptureOptions, CreateOrder, CreatePlan, CreateProduct, CreateSubscription, Link,
    Money, Order, OrderIntent, Plan, PlanUpdate, Product, ProductCategory, ProductType,
    ProductUpdate, PurchaseUnit, Subscription,
};
pub use client::{
    build_patch, generate_request_id, ClientBuilder, ListQuery, PatchOperation, PatchValue,
    PayPalClient, RequestDescriptor, ResponseEnvelope,
};
pub use config::{ClientConfig, ClientOptions, ClientSettings, Environment};
pub use diagnostics::{
    Advisory, CollectingDiagnostics, DiagnosticSink, SilentDiagnostics, TracingDiagnostics,
};
pub use error::{ApiErrorDetails, PayPalError, Result};
pub use logging::{init_logging, LogFormat};
pub use transport::{ReqwestTransport, Transport, TransportError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
