//! Outbound request description.

use crate::clients::errors::InvalidHttpRequestError;

/// A GET request relative to the client's base path.
///
/// Query parameters keep insertion order so the request line is
/// deterministic.
///
/// # Example
///
/// ```rust
/// use shopify_admin::clients::HttpRequest;
///
/// let list = HttpRequest::builder("customers.json")
///     .query_param("page", "2")
///     .build()
///     .unwrap();
/// assert_eq!(list.query, vec![("page".to_string(), "2".to_string())]);
/// assert_eq!(list.tries, 1);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// Path relative to the base path, e.g. `customers.json`.
    pub path: String,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// Number of attempts for 429/500 responses (default: 1).
    pub tries: u32,
}

impl HttpRequest {
    /// Creates a new builder.
    #[must_use]
    pub fn builder(path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::ZeroTries`] if `tries` is zero.
    pub const fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.tries == 0 {
            return Err(InvalidHttpRequestError::ZeroTries);
        }

        Ok(())
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    fn new(path: impl Into<String>) -> Self {
        Self {
            request: HttpRequest {
                path: path.into(),
                query: Vec::new(),
                tries: 1,
            },
        }
    }

    /// Appends query parameters.
    #[must_use]
    pub fn query<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.request
            .query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Appends a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.push((key.into(), value.into()));
        self
    }

    /// Sets the number of attempts.
    ///
    /// Default is 1 (no retries). Higher values retry 429 and 500
    /// responses.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.request.tries = tries;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        self.request.verify()?;
        Ok(self.request)
    }
}
