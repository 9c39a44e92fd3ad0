//! Transport error types.
//!
//! - [`HttpResponseError`]: Shopify answered with a non-2xx status
//! - [`MaxHttpRetriesExceededError`]: retries enabled and exhausted
//! - [`InvalidHttpRequestError`]: the request was malformed and never sent
//! - [`HttpError`]: the union of the above plus network failures
//!
//! Nothing here retries on its own: a request built with the default
//! `tries(1)` surfaces the first failure as [`HttpError::Response`].

use thiserror::Error;

/// A non-2xx response.
///
/// `message` is a compact JSON document built from the response's `errors`,
/// `error` and `error_description` fields, plus an `error_reference`
/// quoting the `X-Request-Id` when Shopify sent one.
///
/// # Example
///
/// ```rust
/// use shopify_admin::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: r#"{"errors":"Not Found"}"#.to_string(),
///     error_reference: Some("abc-123".to_string()),
/// };
/// assert_eq!(error.to_string(), r#"{"errors":"Not Found"}"#);
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// The `X-Request-Id` of the failed response.
    pub error_reference: Option<String>,
}

/// Every allowed try ended in a 429 or 500.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were made.
    pub tries: u32,
    /// Serialized error message from the last response.
    pub message: String,
    /// The `X-Request-Id` of the last response.
    pub error_reference: Option<String>,
}

/// A request that failed validation before being sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// `tries` must be at least 1.
    #[error("A request must be tried at least once.")]
    ZeroTries,
}

/// Unified error type for the transport layer.
///
/// ```rust,ignore
/// match client.request(request).await {
///     Ok(response) => { /* handle success */ }
///     Err(HttpError::Response(e)) => eprintln!("API error {}: {}", e.code, e.message),
///     Err(HttpError::MaxRetries(e)) => eprintln!("gave up after {} tries", e.tries),
///     Err(HttpError::InvalidRequest(e)) => eprintln!("bad request: {e}"),
///     Err(HttpError::Network(e)) => eprintln!("network: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// Non-2xx response.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Retries exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Connection failure or undecodable body.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }
}

// Verify HttpError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};
