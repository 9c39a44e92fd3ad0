//! Customers: `customers.json` and `customers/{id}.json`.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::rest::resources::{Customer, CustomerListParams};
//!
//! let customer = Customer::find(&client, 207119551).await?;
//!
//! let params = CustomerListParams { limit: Some(250), ..Default::default() };
//! let everyone = Customer::list(&client, params)?.collect_all().await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::RestClient;
use crate::rest::{fetch_one, list_collection, Resource, ResourceCollection, ResourceError};

/// Account state of a customer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CustomerState {
    /// No account has been created.
    #[default]
    Disabled,
    /// An invitation was sent.
    Invited,
    /// The customer accepted the invitation.
    Enabled,
    /// The customer declined the invitation.
    Declined,
    /// A state this crate does not know yet.
    #[serde(other)]
    Unknown,
}

/// A postal address of a customer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CustomerAddress {
    /// Address id.
    #[serde(skip_serializing)]
    pub id: Option<u64>,
    /// Owning customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,
    /// Street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    /// Apartment, suite, etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Province or state name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    /// Country name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Whether this is the default address.
    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

/// A customer of the shop.
///
/// Every field is optional: `fields=` filters and API version differences
/// both drop attributes from the response.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Customer {
    /// Customer id.
    #[serde(skip_serializing)]
    pub id: Option<u64>,
    /// Unique email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Phone number in E.164 format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Account state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<CustomerState>,
    /// Comma-separated tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Merchant note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Whether the email address was verified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_email: Option<bool>,
    /// Whether the customer is exempt from taxes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_exempt: Option<bool>,
    /// Number of orders placed.
    #[serde(skip_serializing)]
    pub orders_count: Option<u64>,
    /// Total spent, as a decimal string.
    #[serde(skip_serializing)]
    pub total_spent: Option<String>,
    /// Id of the latest order.
    #[serde(skip_serializing)]
    pub last_order_id: Option<u64>,
    /// ISO 4217 currency of `total_spent`.
    #[serde(skip_serializing)]
    pub currency: Option<String>,
    /// Creation time.
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Saved addresses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<CustomerAddress>>,
    /// The default address.
    #[serde(skip_serializing)]
    pub default_address: Option<CustomerAddress>,
}

impl Resource for Customer {
    type Id = u64;

    const NAME: &'static str = "Customer";
    const KEY: &'static str = "customer";
    const PLURAL: &'static str = "customers";

    fn get_id(&self) -> Option<u64> {
        self.id
    }
}

impl Customer {
    /// Fetches one customer.
    ///
    /// # Errors
    ///
    /// [`ResourceError::NotFound`] for an unknown id, otherwise the request
    /// or decoding error.
    pub async fn find(client: &RestClient, id: u64) -> Result<Self, ResourceError> {
        let id = id.to_string();
        fetch_one(client, &format!("{}/{id}", Self::PLURAL), Some(id.as_str())).await
    }

    /// Lists customers page by page.
    ///
    /// # Errors
    ///
    /// [`ResourceError::InvalidParams`] when `params` cannot be serialized.
    pub fn list(
        client: &RestClient,
        params: CustomerListParams,
    ) -> Result<ResourceCollection<'_, Self>, ResourceError> {
        list_collection(client, Self::PLURAL, params)
    }
}

/// Filters for [`Customer::list`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CustomerListParams {
    /// Restrict to these ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<u64>>,
    /// Page size, at most 250.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Only customers after this id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<u64>,
    /// Created at or after.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,
    /// Created at or before.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<Utc>>,
    /// Updated at or after.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,
    /// Updated at or before.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<DateTime<Utc>>,
    /// Comma-separated fields to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}
