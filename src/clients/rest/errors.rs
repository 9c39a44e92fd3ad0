//! REST client errors.

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for [`RestClient`](super::RestClient) calls.
///
/// ```rust
/// use shopify_admin::clients::RestError;
///
/// let error = RestError::InvalidPath { path: "/".to_string() };
/// assert_eq!(error.to_string(), "Invalid REST API path: /");
/// ```
#[derive(Debug, Error)]
pub enum RestError {
    /// The path is empty after normalization.
    #[error("Invalid REST API path: {path}")]
    InvalidPath {
        /// The path as given.
        path: String,
    },

    /// Transport failure.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl From<crate::clients::InvalidHttpRequestError> for RestError {
    fn from(error: crate::clients::InvalidHttpRequestError) -> Self {
        Self::Http(error.into())
    }
}

// Verify RestError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestError>();
};
