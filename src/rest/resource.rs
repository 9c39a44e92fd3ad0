//! The [`Resource`] trait and query-string serialization.
//!
//! A resource names its JSON keys and exposes its id; the request helpers in
//! this module use those to fetch a single item and to decode collections.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde::Deserialize;
//! use shopify_admin::rest::Resource;
//!
//! #[derive(Debug, Clone, Deserialize)]
//! pub struct Redirect {
//!     pub id: Option<u64>,
//!     pub path: Option<String>,
//!     pub target: Option<String>,
//! }
//!
//! impl Resource for Redirect {
//!     type Id = u64;
//!     const NAME: &'static str = "Redirect";
//!     const KEY: &'static str = "redirect";
//!     const PLURAL: &'static str = "redirects";
//!
//!     fn get_id(&self) -> Option<u64> {
//!         self.id
//!     }
//! }
//! ```

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::RestClient;
use crate::rest::{
    CollectionTransformer, ListRequest, PagedCollection, ResourceCollection, ResourceError,
    SingleTransformer, Transformer,
};

/// A model returned by the Admin REST API.
pub trait Resource: DeserializeOwned + Send + Sync + Sized {
    /// The identifier type, usually `u64`.
    type Id: Display + Clone + Send + Sync;

    /// The name used in error messages, e.g. "ScriptTag".
    const NAME: &'static str;

    /// The body key of a single item, e.g. `script_tag`.
    const KEY: &'static str;

    /// The body key of a collection, and the collection path, e.g. `script_tags`.
    const PLURAL: &'static str;

    /// Returns the id, `None` for an unsaved resource.
    fn get_id(&self) -> Option<Self::Id>;
}

/// Fetches and decodes the single item at `path`.
///
/// `id` is only used to describe a 404.
///
/// # Errors
///
/// [`ResourceError::NotFound`] on 404 when `id` is given,
/// [`ResourceError::MissingExpectedAttribute`] when the body lacks `R::KEY`,
/// otherwise the transport error.
pub async fn fetch_one<R: Resource>(
    client: &RestClient,
    path: &str,
    id: Option<&str>,
) -> Result<R, ResourceError> {
    let response = client
        .get(path, &[])
        .await
        .map_err(|e| ResourceError::from_rest_error(e, R::NAME, id))?;

    SingleTransformer::<R>::new().transform(&response)
}

/// Builds the [`ResourceCollection`] that lists `path` with `params` as filters.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidParams`] when `params` cannot be serialized.
pub fn list_collection<'a, R: Resource, P: Serialize>(
    client: &'a RestClient,
    path: impl Into<String>,
    params: P,
) -> Result<ResourceCollection<'a, R>, ResourceError> {
    let request = ListRequest::new(path, params)?;
    Ok(PagedCollection::new(client, request, CollectionTransformer::new()))
}

/// Flattens serializable parameters into query pairs.
///
/// `null` fields are skipped, scalars use their plain text form and arrays
/// are comma-joined. Nested objects are sent as JSON.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidParams`] when `params` does not serialize
/// to a JSON object.
///
/// ```rust
/// use serde::Serialize;
/// use shopify_admin::rest::serialize_to_query;
///
/// #[derive(Serialize)]
/// struct Params {
///     limit: Option<u32>,
///     ids: Vec<u64>,
///     fields: Option<String>,
/// }
///
/// let query = serialize_to_query(&Params { limit: Some(50), ids: vec![1, 2], fields: None }).unwrap();
/// assert_eq!(query.len(), 2);
/// assert!(query.contains(&("limit".to_string(), "50".to_string())));
/// assert!(query.contains(&("ids".to_string(), "1,2".to_string())));
/// ```
pub fn serialize_to_query<T: Serialize>(params: &T) -> Result<Vec<(String, String)>, ResourceError> {
    let value = serde_json::to_value(params).map_err(|e| ResourceError::InvalidParams {
        reason: format!("Failed to serialize params: {e}"),
    })?;

    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(ResourceError::InvalidParams {
                reason: format!("expected an object, got {other}"),
            })
        }
    };

    let mut query = Vec::with_capacity(map.len());
    for (key, val) in map {
        match val {
            Value::Null => {}
            Value::String(s) => query.push((key, s)),
            Value::Number(n) => query.push((key, n.to_string())),
            Value::Bool(b) => query.push((key, b.to_string())),
            Value::Array(items) => {
                let values: Vec<String> = items
                    .iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .collect();
                if !values.is_empty() {
                    query.push((key, values.join(",")));
                }
            }
            Value::Object(_) => query.push((key, val.to_string())),
        }
    }

    Ok(query)
}
