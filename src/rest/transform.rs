//! Response transformers.
//!
//! A [`Transformer`] turns a raw [`HttpResponse`] into typed values. The two
//! implementations here read the resource's collection key or single-item
//! key from the body and decode it.

use std::marker::PhantomData;

use crate::clients::HttpResponse;
use crate::rest::{Resource, ResourceError};

/// Converts a response body into typed values.
pub trait Transformer: Send + Sync {
    /// What one response turns into.
    type Output;

    /// Decodes `response`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingExpectedAttribute`] when the body does
    /// not hold the expected key or its value does not decode.
    fn transform(&self, response: &HttpResponse) -> Result<Self::Output, ResourceError>;
}

/// Decodes `body[R::PLURAL]` into a `Vec<R>`, preserving server order.
///
/// ```rust
/// use std::collections::HashMap;
/// use serde_json::json;
/// use shopify_admin::clients::HttpResponse;
/// use shopify_admin::rest::resources::Redirect;
/// use shopify_admin::rest::{CollectionTransformer, Transformer};
///
/// let response = HttpResponse::new(
///     200,
///     HashMap::new(),
///     json!({"redirects": [{"id": 1, "path": "/a", "target": "/b"}]}),
/// );
/// let redirects = CollectionTransformer::<Redirect>::new().transform(&response).unwrap();
/// assert_eq!(redirects[0].path.as_deref(), Some("/a"));
/// ```
pub struct CollectionTransformer<R> {
    _resource: PhantomData<fn() -> R>,
}

impl<R> CollectionTransformer<R> {
    /// Creates the transformer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _resource: PhantomData,
        }
    }
}

impl<R> Default for CollectionTransformer<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for CollectionTransformer<R> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<R> std::fmt::Debug for CollectionTransformer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionTransformer")
            .field("resource", &std::any::type_name::<R>())
            .finish()
    }
}

impl<R: Resource> Transformer for CollectionTransformer<R> {
    type Output = Vec<R>;

    fn transform(&self, response: &HttpResponse) -> Result<Vec<R>, ResourceError> {
        let items = response
            .body
            .get(R::PLURAL)
            .filter(|value| value.is_array())
            .ok_or_else(|| missing::<R>(R::PLURAL, "expected an array under this key"))?;

        serde_json::from_value(items.clone()).map_err(|e| {
            tracing::debug!(resource = R::NAME, error = %e, "Failed to decode collection");
            missing::<R>(R::PLURAL, format!("items failed to decode: {e}"))
        })
    }
}

/// Decodes `body[R::KEY]` into one `R`.
pub struct SingleTransformer<R> {
    _resource: PhantomData<fn() -> R>,
}

impl<R> SingleTransformer<R> {
    /// Creates the transformer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _resource: PhantomData,
        }
    }
}

impl<R> Default for SingleTransformer<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for SingleTransformer<R> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<R> std::fmt::Debug for SingleTransformer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleTransformer")
            .field("resource", &std::any::type_name::<R>())
            .finish()
    }
}

impl<R: Resource> Transformer for SingleTransformer<R> {
    type Output = R;

    fn transform(&self, response: &HttpResponse) -> Result<R, ResourceError> {
        let item = response
            .body
            .get(R::KEY)
            .filter(|value| value.is_object())
            .ok_or_else(|| missing::<R>(R::KEY, "expected an object under this key"))?;

        serde_json::from_value(item.clone()).map_err(|e| {
            tracing::debug!(resource = R::NAME, error = %e, "Failed to decode resource");
            missing::<R>(R::KEY, format!("value failed to decode: {e}"))
        })
    }
}

fn missing<R: Resource>(attribute: &str, reason: impl Into<String>) -> ResourceError {
    ResourceError::MissingExpectedAttribute {
        resource: R::NAME,
        attribute: attribute.to_string(),
        reason: reason.into(),
    }
}
