//! Catalog products (`/v1/catalogs/products`)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::api::common::Link;
use crate::api::vocab::open_vocabulary;
use crate::api::{check_request_id, check_vocabulary, resource_path};
use crate::client::{build_patch, ListQuery, PatchValue, PayPalClient, RequestDescriptor, ResponseEnvelope};
use crate::error::Result;

const PRODUCTS_PATH: &str = "/v1/catalogs/products";

/// Recommended prefix for product idempotency ids
pub const PRODUCT_ID_PREFIX: &str = "PROD-";

open_vocabulary! {
    /// A SaaS offering is `SERVICE` with category `SOFTWARE`
    ProductType("product type") {
        Digital => "DIGITAL",
        Physical => "PHYSICAL",
        Service => "SERVICE",
    }
}

open_vocabulary! {
    /// Catalog category. Only the common categories are listed; PayPal accepts many more.
    ProductCategory("product category") {
        Software => "SOFTWARE",
        PhysicalGood => "PHYSICAL_GOOD",
        DigitalMediaBooksMoviesMusic => "DIGITAL_MEDIA_BOOKS_MOVIES_MUSIC",
        DigitalGames => "DIGITAL_GAMES",
    }
}

/// Input to [`Products::create`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateProduct {
    #[serde(skip)]
    pub request_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_url: Option<String>,
}

/// Fields [`Products::update`] can patch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub description: PatchValue<String>,
    pub category: PatchValue<ProductCategory>,
    pub image_url: PatchValue<String>,
    pub home_url: PatchValue<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub product_type: Option<ProductType>,
    #[serde(default)]
    pub category: Option<ProductCategory>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub home_url: Option<String>,
    #[serde(default)]
    pub create_time: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub update_time: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub total_items: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Product operations bound to a client
#[derive(Debug, Clone, Copy)]
pub struct Products<'a> {
    client: &'a PayPalClient,
}

impl<'a> Products<'a> {
    pub(crate) fn new(client: &'a PayPalClient) -> Self {
        Self { client }
    }

    /// Create a catalog product.
    /// Missing or unknown type and category values and unprefixed ids are advised, not rejected.
    pub async fn create(&self, product: CreateProduct) -> Result<Product> {
        check_request_id(self.client, product.request_id.as_deref(), PRODUCT_ID_PREFIX);
        check_vocabulary(
            self.client,
            ProductType::VOCABULARY,
            product.product_type.as_ref().map(|t| (t.as_str(), t.is_known())),
        );
        check_vocabulary(
            self.client,
            ProductCategory::VOCABULARY,
            product.category.as_ref().map(|c| (c.as_str(), c.is_known())),
        );

        let descriptor = RequestDescriptor::post(PRODUCTS_PATH)
            .request_id(product.request_id.clone())
            .json(&product)?;
        let created: Product = self
            .client
            .request(descriptor)
            .await?
            .expect_create_or_ok()?
            .json()?;

        info!("Created PayPal product {}", created.id);
        Ok(created)
    }

    /// List products; unset paging fields come from the client defaults
    pub async fn list(&self, query: ListQuery) -> Result<ProductList> {
        let pairs = query.into_pairs(self.client.config().list_defaults());
        self.client
            .request(RequestDescriptor::get(PRODUCTS_PATH).query(pairs))
            .await?
            .expect_create_or_ok()?
            .json()
    }

    pub async fn details(&self, id: &str) -> Result<Product> {
        self.client
            .request(RequestDescriptor::get(resource_path(PRODUCTS_PATH, id)?))
            .await?
            .expect_create_or_ok()?
            .json()
    }

    /// Patch the given fields. Returns the validated envelope; PayPal answers 204 with no body.
    pub async fn update(&self, id: &str, update: ProductUpdate) -> Result<ResponseEnvelope> {
        let patch = build_patch([
            ("description", update.description.to_json()?),
            ("category", update.category.to_json()?),
            ("image_url", update.image_url.to_json()?),
            ("home_url", update.home_url.to_json()?),
        ]);

        let descriptor =
            RequestDescriptor::patch(resource_path(PRODUCTS_PATH, id)?).json(&patch)?;
        let response = self
            .client
            .request(descriptor)
            .await?
            .expect_update_or_no_content()?;

        info!("Updated PayPal product {} ({} fields)", id, patch.len());
        Ok(response)
    }
}
