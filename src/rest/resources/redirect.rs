//! URL redirects of the online store.

use serde::{Deserialize, Serialize};

use crate::clients::RestClient;
use crate::rest::{fetch_one, list_collection, Resource, ResourceCollection, ResourceError};

/// A redirect from an old storefront path to a new location.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Redirect {
    #[serde(skip_serializing)]
    pub id: Option<u64>,
    /// The old path, starting with `/`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// A path or a full URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl Resource for Redirect {
    type Id = u64;

    const NAME: &'static str = "Redirect";
    const KEY: &'static str = "redirect";
    const PLURAL: &'static str = "redirects";

    fn get_id(&self) -> Option<u64> {
        self.id
    }
}

impl Redirect {
    /// Fetches one redirect.
    ///
    /// # Errors
    ///
    /// [`ResourceError::NotFound`] for an unknown id, otherwise the request
    /// or decoding error.
    pub async fn find(client: &RestClient, id: u64) -> Result<Self, ResourceError> {
        let id = id.to_string();
        fetch_one(client, &format!("{}/{id}", Self::PLURAL), Some(id.as_str())).await
    }

    /// Lists redirects page by page.
    ///
    /// # Errors
    ///
    /// [`ResourceError::InvalidParams`] when `params` cannot be serialized.
    pub fn list(
        client: &RestClient,
        params: RedirectListParams,
    ) -> Result<ResourceCollection<'_, Self>, ResourceError> {
        list_collection(client, Self::PLURAL, params)
    }
}

/// Filters for [`Redirect::list`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RedirectListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<u64>,
    /// Exact match on the old path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Exact match on the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_redirect_round_trips_writable_fields() {
        let redirect: Redirect = serde_json::from_value(json!({
            "id": 668_809_255,
            "path": "/leopard",
            "target": "/pages/macosx"
        }))
        .unwrap();
        assert_eq!(redirect.get_id(), Some(668_809_255));
        assert_eq!(
            serde_json::to_value(&redirect).unwrap(),
            json!({"path": "/leopard", "target": "/pages/macosx"})
        );
    }
}
