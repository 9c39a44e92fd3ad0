//! Script tags: remote JavaScript loaded into the storefront.
//!
//! Shopify recommends theme app extensions for new apps; script tags remain
//! readable for shops that still carry them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::RestClient;
use crate::rest::{fetch_one, list_collection, Resource, ResourceCollection, ResourceError};

/// DOM event that loads the script.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScriptTagEvent {
    /// The only event Shopify supports.
    #[default]
    Onload,
}

/// Pages that include the script.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScriptTagDisplayScope {
    /// The online store only.
    OnlineStore,
    /// The order status page only.
    OrderStatus,
    /// Both.
    #[default]
    All,
}

/// A script tag.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ScriptTag {
    #[serde(skip_serializing)]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<ScriptTagEvent>,
    /// HTTPS URL of the script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_scope: Option<ScriptTagDisplayScope>,
    /// Whether the script is served from Shopify's CDN cache.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<bool>,
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for ScriptTag {
    type Id = u64;

    const NAME: &'static str = "ScriptTag";
    const KEY: &'static str = "script_tag";
    const PLURAL: &'static str = "script_tags";

    fn get_id(&self) -> Option<u64> {
        self.id
    }
}

impl ScriptTag {
    /// Fetches one script tag.
    ///
    /// # Errors
    ///
    /// [`ResourceError::NotFound`] for an unknown id, otherwise the request
    /// or decoding error.
    pub async fn find(client: &RestClient, id: u64) -> Result<Self, ResourceError> {
        let id = id.to_string();
        fetch_one(client, &format!("{}/{id}", Self::PLURAL), Some(id.as_str())).await
    }

    /// Lists script tags page by page.
    ///
    /// # Errors
    ///
    /// [`ResourceError::InvalidParams`] when `params` cannot be serialized.
    pub fn list(
        client: &RestClient,
        params: ScriptTagListParams,
    ) -> Result<ResourceCollection<'_, Self>, ResourceError> {
        list_collection(client, Self::PLURAL, params)
    }
}

/// Filters for [`ScriptTag::list`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ScriptTagListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<u64>,
    /// Exact match on `src`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_script_tag_enums_use_snake_case() {
        let tag: ScriptTag = serde_json::from_value(json!({
            "id": 596_726_825,
            "src": "https://js.example.org/foo.js",
            "event": "onload",
            "display_scope": "online_store",
            "cache": false,
            "created_at": "2024-01-02T09:00:00-05:00"
        }))
        .unwrap();

        assert_eq!(tag.event, Some(ScriptTagEvent::Onload));
        assert_eq!(tag.display_scope, Some(ScriptTagDisplayScope::OnlineStore));
        assert_eq!(
            serde_json::to_value(ScriptTagDisplayScope::OrderStatus).unwrap(),
            json!("order_status")
        );
    }
}
