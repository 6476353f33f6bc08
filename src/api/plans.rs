//! Billing plans (`/v1/billing/plans`)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::api::{check_request_id, resource_path};
use crate::api::common::{Link, Money};
use crate::api::vocab::open_vocabulary;
use crate::client::{build_patch, ListQuery, PatchValue, PayPalClient, RequestDescriptor, ResponseEnvelope};
use crate::error::Result;

const PLANS_PATH: &str = "/v1/billing/plans";

/// Recommended prefix for plan idempotency ids, e.g. `PLAN-18062020-001`
pub const PLAN_ID_PREFIX: &str = "PLAN-";

open_vocabulary! {
    IntervalUnit("billing interval") {
        Day => "DAY",
        Week => "WEEK",
        Month => "MONTH",
        Year => "YEAR",
    }
}

open_vocabulary! {
    TenureType("tenure type") {
        Trial => "TRIAL",
        Regular => "REGULAR",
    }
}

open_vocabulary! {
    PlanStatus("plan status") {
        /// Created but not yet usable for subscriptions
        Created => "CREATED",
        Active => "ACTIVE",
        Inactive => "INACTIVE",
    }
}

open_vocabulary! {
    /// What happens to a subscription when the setup fee fails
    SetupFeeFailureAction("setup fee failure action") {
        Continue => "CONTINUE",
        Cancel => "CANCEL",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frequency {
    pub interval_unit: IntervalUnit,
    /// Defaults to 1 on create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_count: Option<u32>,
}

impl Frequency {
    pub fn new(interval_unit: IntervalUnit) -> Self {
        Self {
            interval_unit,
            interval_count: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingScheme {
    pub fixed_price: Money,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One phase of a plan's schedule, e.g. a trial followed by the regular price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingCycle {
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenure_type: Option<TenureType>,
    /// Assigned from the position in the list on create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    /// 0 means infinite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cycles: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_scheme: Option<PricingScheme>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BillingCycle {
    pub fn new(frequency: Frequency, fixed_price: Money) -> Self {
        Self {
            frequency,
            tenure_type: None,
            sequence: None,
            total_cycles: None,
            pricing_scheme: Some(PricingScheme {
                fixed_price,
                extra: Map::new(),
            }),
            extra: Map::new(),
        }
    }

    pub fn tenure_type(mut self, tenure_type: TenureType) -> Self {
        self.tenure_type = Some(tenure_type);
        self
    }

    pub fn total_cycles(mut self, total_cycles: u32) -> Self {
        self.total_cycles = Some(total_cycles);
        self
    }
}

/// Fill in cycle defaults. The list order is the billing order: `sequence` is
/// overwritten with the 1-based position.
pub fn normalize_billing_cycles(cycles: Vec<BillingCycle>) -> Vec<BillingCycle> {
    cycles
        .into_iter()
        .zip(1u32..)
        .map(|(mut cycle, sequence)| {
            cycle.frequency.interval_count.get_or_insert(1);
            cycle.tenure_type.get_or_insert(TenureType::Regular);
            cycle.total_cycles.get_or_insert(0);
            cycle.sequence = Some(sequence);
            cycle
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_bill_outstanding: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_fee: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_fee_failure_action: Option<SetupFeeFailureAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_failure_threshold: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxes {
    pub percentage: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inclusive: Option<bool>,
}

/// Input to [`Plans::create`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreatePlan {
    #[serde(skip)]
    pub request_id: Option<String>,
    pub product_id: String,
    pub name: String,
    /// Defaults to `""`
    pub description: Option<String>,
    /// Defaults to `ACTIVE`
    pub status: Option<PlanStatus>,
    pub billing_cycles: Vec<BillingCycle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_preferences: Option<PaymentPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxes: Option<Taxes>,
    /// Defaults to `false`
    pub quantity_supported: Option<bool>,
}

/// Fields [`Plans::update`] can patch.
/// Nested paths such as `payment_preferences.setup_fee` are not addressable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanUpdate {
    pub description: PatchValue<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<PlanStatus>,
    #[serde(default)]
    pub billing_cycles: Vec<BillingCycle>,
    #[serde(default)]
    pub payment_preferences: Option<PaymentPreferences>,
    #[serde(default)]
    pub taxes: Option<Taxes>,
    #[serde(default)]
    pub quantity_supported: Option<bool>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of plans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanList {
    #[serde(default)]
    pub plans: Vec<Plan>,
    #[serde(default)]
    pub total_items: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Plan operations bound to a client
#[derive(Debug, Clone, Copy)]
pub struct Plans<'a> {
    client: &'a PayPalClient,
}

impl<'a> Plans<'a> {
    pub(crate) fn new(client: &'a PayPalClient) -> Self {
        Self { client }
    }

    /// Create a plan with defaulted fields and normalized billing cycles.
    /// Sends the configured `Prefer` header so the full plan comes back.
    pub async fn create(&self, mut plan: CreatePlan) -> Result<Plan> {
        check_request_id(self.client, plan.request_id.as_deref(), PLAN_ID_PREFIX);

        plan.description.get_or_insert_with(String::new);
        plan.status.get_or_insert(PlanStatus::Active);
        plan.quantity_supported.get_or_insert(false);
        plan.billing_cycles = normalize_billing_cycles(std::mem::take(&mut plan.billing_cycles));

        let descriptor = RequestDescriptor::post(PLANS_PATH)
            .request_id(plan.request_id.clone())
            .try_header("Prefer", self.client.config().prefer())?
            .json(&plan)?;
        let created: Plan = self
            .client
            .request(descriptor)
            .await?
            .expect_create_or_ok()?
            .json()?;

        info!(
            "Created PayPal plan {} for product {} ({} billing cycles)",
            created.id,
            plan.product_id,
            plan.billing_cycles.len()
        );
        Ok(created)
    }

    /// List plans; filter by product with `ListQuery::filter("product_id", ..)`
    pub async fn list(&self, query: ListQuery) -> Result<PlanList> {
        let pairs = query.into_pairs(self.client.config().list_defaults());
        self.client
            .request(RequestDescriptor::get(PLANS_PATH).query(pairs))
            .await?
            .expect_create_or_ok()?
            .json()
    }

    pub async fn details(&self, id: &str) -> Result<Plan> {
        self.client
            .request(RequestDescriptor::get(resource_path(PLANS_PATH, id)?))
            .await?
            .expect_create_or_ok()?
            .json()
    }

    pub async fn update(&self, id: &str, update: PlanUpdate) -> Result<ResponseEnvelope> {
        let patch = build_patch([("description", update.description.to_json()?)]);

        let descriptor = RequestDescriptor::patch(resource_path(PLANS_PATH, id)?).json(&patch)?;
        let response = self
            .client
            .request(descriptor)
            .await?
            .expect_update_or_no_content()?;

        info!("Updated PayPal plan {}", id);
        Ok(response)
    }
}
