//! Products, with their variants and images embedded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::RestClient;
use crate::rest::{fetch_one, list_collection, Resource, ResourceCollection, ResourceError};

/// Whether a product is visible to customers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Visible.
    #[default]
    Active,
    /// Hidden and no longer sold.
    Archived,
    /// Hidden and not yet ready.
    Draft,
    /// A status this crate does not know yet.
    #[serde(other)]
    Unknown,
}

/// A variant as embedded in a product response.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProductVariant {
    #[serde(skip_serializing)]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Decimal string, e.g. `"199.00"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(skip_serializing)]
    pub inventory_quantity: Option<i64>,
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An image as embedded in a product response.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProductImage {
    #[serde(skip_serializing)]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing)]
    pub width: Option<u32>,
    #[serde(skip_serializing)]
    pub height: Option<u32>,
}

/// A product in the shop's catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Product {
    #[serde(skip_serializing)]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description, as HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    /// URL slug, unique per shop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    /// Comma-separated tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// `web` or `global`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_suffix: Option<String>,
    #[serde(skip_serializing)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub admin_graphql_api_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<ProductVariant>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ProductImage>>,
}

impl Resource for Product {
    type Id = u64;

    const NAME: &'static str = "Product";
    const KEY: &'static str = "product";
    const PLURAL: &'static str = "products";

    fn get_id(&self) -> Option<u64> {
        self.id
    }
}

impl Product {
    /// Fetches one product.
    ///
    /// # Errors
    ///
    /// [`ResourceError::NotFound`] for an unknown id, otherwise the request
    /// or decoding error.
    pub async fn find(client: &RestClient, id: u64) -> Result<Self, ResourceError> {
        let id = id.to_string();
        fetch_one(client, &format!("{}/{id}", Self::PLURAL), Some(id.as_str())).await
    }

    /// Lists products page by page.
    ///
    /// # Errors
    ///
    /// [`ResourceError::InvalidParams`] when `params` cannot be serialized.
    pub fn list(
        client: &RestClient,
        params: ProductListParams,
    ) -> Result<ResourceCollection<'_, Self>, ResourceError> {
        list_collection(client, Self::PLURAL, params)
    }
}

/// Filters for [`Product::list`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProductListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<u64>>,
    /// Page size, at most 250.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    /// `published`, `unpublished` or `any`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<DateTime<Utc>>,
    /// Comma-separated fields to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}
