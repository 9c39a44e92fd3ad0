//! The shop the session belongs to.
//!
//! Shop is a read-only singleton at `shop.json`; there is no collection.
//!
//! ```rust,ignore
//! use shopify_admin::rest::resources::Shop;
//!
//! let shop = Shop::current(&client).await?;
//! println!("{} ({})", shop.name.unwrap_or_default(), shop.plan_name.unwrap_or_default());
//! ```

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::clients::RestClient;
use crate::rest::{fetch_one, Resource, ResourceError};

/// Store settings and contact details.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Shop {
    pub id: Option<u64>,
    pub name: Option<String>,
    /// Contact email of the store.
    pub email: Option<String>,
    /// Primary custom domain, e.g. `www.example.com`.
    pub domain: Option<String>,
    /// The permanent `{shop}.myshopify.com` domain.
    pub myshopify_domain: Option<String>,
    pub shop_owner: Option<String>,
    pub plan_name: Option<String>,
    pub plan_display_name: Option<String>,
    pub password_enabled: Option<bool>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub province_code: Option<String>,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// ISO 4217 code of the default currency.
    pub currency: Option<String>,
    pub enabled_presentment_currencies: Option<Vec<String>>,
    pub money_format: Option<String>,
    pub money_with_currency_format: Option<String>,
    pub iana_timezone: Option<String>,
    pub primary_locale: Option<String>,
    /// `kg`, `g`, `lb` or `oz`.
    pub weight_unit: Option<String>,
    pub taxes_included: Option<bool>,
    pub tax_shipping: Option<bool>,
    pub multi_location_enabled: Option<bool>,
    pub has_discounts: Option<bool>,
    pub has_gift_cards: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Shop {
    type Id = u64;

    const NAME: &'static str = "Shop";
    const KEY: &'static str = "shop";
    const PLURAL: &'static str = "shops";

    fn get_id(&self) -> Option<u64> {
        self.id
    }
}

impl Shop {
    /// Fetches the shop of the client's session.
    ///
    /// # Errors
    ///
    /// The request or decoding error.
    pub async fn current(client: &RestClient) -> Result<Self, ResourceError> {
        fetch_one(client, Self::KEY, None).await
    }
}
