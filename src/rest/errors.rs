//! Errors raised by resource requests and paged collections.
//!
//! A lookup by id maps a 404 onto [`ResourceError::NotFound`]. Every other
//! transport failure, and any failure while fetching a collection page, is
//! passed through unchanged as [`ResourceError::Rest`].
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::rest::ResourceError;
//! use shopify_admin::rest::resources::Customer;
//!
//! match Customer::find(&client, 207119551).await {
//!     Ok(customer) => println!("{:?}", customer.email),
//!     Err(ResourceError::NotFound { resource, id }) => println!("no {resource} {id}"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use crate::clients::{HttpError, RestError};
use thiserror::Error;

/// Error type for resource requests and [`PagedCollection`](super::PagedCollection).
///
/// ```rust
/// use shopify_admin::rest::ResourceError;
///
/// let error = ResourceError::MissingExpectedAttribute {
///     resource: "Customer",
///     attribute: "customers".to_string(),
///     reason: "no such key in the response body".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Customer response is missing expected attribute 'customers': no such key in the response body"
/// );
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource does not exist (HTTP 404 on a lookup by id).
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The resource name, e.g. "Product".
        resource: &'static str,
        /// The id that was requested.
        id: String,
    },

    /// The response body lacks the key the transformer reads, or its value
    /// does not decode.
    #[error("{resource} response is missing expected attribute '{attribute}': {reason}")]
    MissingExpectedAttribute {
        /// The resource name.
        resource: &'static str,
        /// The missing key, or the key whose value failed to decode.
        attribute: String,
        /// What was wrong with the attribute.
        reason: String,
    },

    /// List parameters could not be turned into a query string.
    #[error("Invalid request parameters: {reason}")]
    InvalidParams {
        /// Why serialization failed.
        reason: String,
    },

    /// The caller cancelled a page fetch.
    #[error("Request was cancelled")]
    Cancelled,

    /// A transport or REST client error.
    #[error(transparent)]
    Rest(#[from] RestError),
}

impl ResourceError {
    /// Maps a failed lookup of the resource with `id`.
    ///
    /// A 404 becomes [`NotFound`](Self::NotFound) when `id` is given; every
    /// other error is wrapped as-is.
    #[must_use]
    pub fn from_rest_error(error: RestError, resource: &'static str, id: Option<&str>) -> Self {
        match (error, id) {
            (RestError::Http(HttpError::Response(response)), Some(id)) if response.code == 404 => {
                Self::NotFound {
                    resource,
                    id: id.to_string(),
                }
            }
            (other, _) => Self::Rest(other),
        }
    }

    /// Returns the `X-Request-Id` of the failed response, if known.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Rest(RestError::Http(HttpError::Response(e))) => e.error_reference.as_deref(),
            Self::Rest(RestError::Http(HttpError::MaxRetries(e))) => e.error_reference.as_deref(),
            _ => None,
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    fn response_error(code: u16, message: &str) -> RestError {
        RestError::Http(HttpError::Response(HttpResponseError {
            code,
            message: message.to_string(),
            error_reference: Some("req-42".to_string()),
        }))
    }

    #[test]
    fn test_not_found_message_names_resource_and_id() {
        let error = ResourceError::NotFound {
            resource: "Product",
            id: "632910392".to_string(),
        };
        assert_eq!(error.to_string(), "Product with id 632910392 not found");
    }

    #[test]
    fn test_from_rest_error_maps_not_found() {
        let error = ResourceError::from_rest_error(
            response_error(404, r#"{"errors":"Not Found"}"#),
            "Redirect",
            Some("668809255"),
        );
        assert!(matches!(
            error,
            ResourceError::NotFound { resource: "Redirect", ref id } if id == "668809255"
        ));
    }

    #[test]
    fn test_from_rest_error_without_id_keeps_404() {
        let error = ResourceError::from_rest_error(
            response_error(404, r#"{"errors":"Not Found"}"#),
            "Shop",
            None,
        );
        assert!(matches!(error, ResourceError::Rest(RestError::Http(_))));
        assert_eq!(error.request_id(), Some("req-42"));
    }

    #[test]
    fn test_from_rest_error_keeps_other_failures() {
        let error = ResourceError::from_rest_error(
            response_error(422, r#"{"errors":{"src":["is invalid"]}}"#),
            "ScriptTag",
            Some("1"),
        );
        assert!(matches!(error, ResourceError::Rest(RestError::Http(_))));
        assert_eq!(error.request_id(), Some("req-42"));

        let error = ResourceError::from_rest_error(
            RestError::InvalidPath { path: String::new() },
            "Shop",
            None,
        );
        assert!(matches!(error, ResourceError::Rest(RestError::InvalidPath { .. })));
        assert_eq!(error.request_id(), None);
    }

    #[test]
    fn test_cancelled_message() {
        assert_eq!(ResourceError::Cancelled.to_string(), "Request was cancelled");
    }
}
