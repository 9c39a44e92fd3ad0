//! Metafields: namespaced custom data attached to the shop or to a resource.
//!
//! The collection path depends on the owner:
//!
//! - shop: `metafields`
//! - product: `products/{id}/metafields`
//! - variant: `variants/{id}/metafields`
//! - customer: `customers/{id}/metafields`
//! - order: `orders/{id}/metafields`
//! - collection: `collections/{id}/metafields`
//! - page: `pages/{id}/metafields`
//! - blog: `blogs/{id}/metafields`
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::rest::resources::{Metafield, MetafieldListParams, MetafieldOwner};
//!
//! let params = MetafieldListParams { namespace: Some("custom".to_string()), ..Default::default() };
//! let fields = Metafield::list(&client, MetafieldOwner::Product(632910392), params)?
//!     .collect_all()
//!     .await?;
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::RestClient;
use crate::rest::{fetch_one, list_collection, Resource, ResourceCollection, ResourceError};

/// The owner a metafield path is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetafieldOwner {
    /// Shop-level metafields.
    Shop,
    Product(u64),
    Variant(u64),
    Customer(u64),
    Order(u64),
    Collection(u64),
    Page(u64),
    Blog(u64),
}

impl MetafieldOwner {
    /// Path prefix of the owner, e.g. `products/1/`; empty for the shop.
    #[must_use]
    pub fn path_prefix(&self) -> String {
        match self.segment() {
            Some((resource, id)) => format!("{resource}/{id}/"),
            None => String::new(),
        }
    }

    /// The `owner_resource` value Shopify reports for this owner.
    #[must_use]
    pub const fn owner_resource(&self) -> &'static str {
        match self {
            Self::Shop => "shop",
            Self::Product(_) => "product",
            Self::Variant(_) => "variant",
            Self::Customer(_) => "customer",
            Self::Order(_) => "order",
            Self::Collection(_) => "collection",
            Self::Page(_) => "page",
            Self::Blog(_) => "blog",
        }
    }

    const fn segment(&self) -> Option<(&'static str, u64)> {
        match *self {
            Self::Shop => None,
            Self::Product(id) => Some(("products", id)),
            Self::Variant(id) => Some(("variants", id)),
            Self::Customer(id) => Some(("customers", id)),
            Self::Order(id) => Some(("orders", id)),
            Self::Collection(id) => Some(("collections", id)),
            Self::Page(id) => Some(("pages", id)),
            Self::Blog(id) => Some(("blogs", id)),
        }
    }
}

impl fmt::Display for MetafieldOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.segment() {
            Some((_, id)) => write!(f, "{} {id}", self.owner_resource()),
            None => f.write_str("shop"),
        }
    }
}

/// A metafield.
///
/// `value` is kept as JSON because its shape follows `type`: number types
/// come back as numbers, text types as strings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Metafield {
    #[serde(skip_serializing)]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Value type, e.g. `single_line_text_field` or `number_integer`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub metafield_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing)]
    pub owner_id: Option<u64>,
    #[serde(skip_serializing)]
    pub owner_resource: Option<String>,
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub admin_graphql_api_id: Option<String>,
}

impl Resource for Metafield {
    type Id = u64;

    const NAME: &'static str = "Metafield";
    const KEY: &'static str = "metafield";
    const PLURAL: &'static str = "metafields";

    fn get_id(&self) -> Option<u64> {
        self.id
    }
}

impl Metafield {
    /// Fetches one metafield of `owner`.
    ///
    /// # Errors
    ///
    /// [`ResourceError::NotFound`] for an unknown id, otherwise the request
    /// or decoding error.
    pub async fn find(
        client: &RestClient,
        owner: MetafieldOwner,
        id: u64,
    ) -> Result<Self, ResourceError> {
        let id = id.to_string();
        let path = format!("{}{}/{id}", owner.path_prefix(), Self::PLURAL);
        fetch_one(client, &path, Some(id.as_str())).await
    }

    /// Lists the metafields of `owner` page by page.
    ///
    /// # Errors
    ///
    /// [`ResourceError::InvalidParams`] when `params` cannot be serialized.
    pub fn list(
        client: &RestClient,
        owner: MetafieldOwner,
        params: MetafieldListParams,
    ) -> Result<ResourceCollection<'_, Self>, ResourceError> {
        list_collection(
            client,
            format!("{}{}", owner.path_prefix(), Self::PLURAL),
            params,
        )
    }
}

/// Filters for [`Metafield::list`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MetafieldListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Filter by value type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub metafield_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}
