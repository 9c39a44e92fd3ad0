//! Parsed responses.

use std::collections::HashMap;
use std::fmt;

/// The `X-Shopify-Shop-Api-Call-Limit` header: `used/bucket`.
///
/// # Example
///
/// ```rust
/// use shopify_admin::clients::ApiCallLimit;
///
/// let limit = ApiCallLimit::parse("32/40").unwrap();
/// assert_eq!(limit.request_count, 32);
/// assert_eq!(limit.remaining(), 8);
/// assert!(ApiCallLimit::parse("32").is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiCallLimit {
    /// Calls currently counted against the bucket.
    pub request_count: u32,
    /// Capacity of the bucket.
    pub bucket_size: u32,
}

impl ApiCallLimit {
    /// Parses a header value; `None` unless it is exactly two integers
    /// separated by `/`.
    #[must_use]
    pub fn parse(header_value: &str) -> Option<Self> {
        let (count, size) = header_value.trim().split_once('/')?;
        Some(Self {
            request_count: count.trim().parse().ok()?,
            bucket_size: size.trim().parse().ok()?,
        })
    }

    /// Calls left before the bucket is full.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.bucket_size.saturating_sub(self.request_count)
    }
}

impl fmt::Display for ApiCallLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.request_count, self.bucket_size)
    }
}

/// A response from the Admin API.
///
/// Header names are stored lowercased.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers; a name may repeat.
    pub headers: HashMap<String, Vec<String>>,
    /// The JSON body, `{}` when empty.
    pub body: serde_json::Value,
    /// Parsed `X-Shopify-Shop-Api-Call-Limit`.
    pub api_call_limit: Option<ApiCallLimit>,
    /// Parsed `Retry-After`, in seconds.
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a response, parsing the call limit and `Retry-After` headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let first = |name: &str| headers.get(name).and_then(|values| values.first());

        let api_call_limit =
            first("x-shopify-shop-api-call-limit").and_then(|value| ApiCallLimit::parse(value));
        let retry_request_after =
            first("retry-after").and_then(|value| value.trim().parse::<f64>().ok());

        Self {
            code,
            headers,
            body,
            api_call_limit,
            retry_request_after,
        }
    }

    /// Returns `true` for a 2xx status.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of header `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the `X-Shopify-API-Deprecated-Reason` header value, if present.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.header("x-shopify-api-deprecated-reason")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect()
    }

    #[test]
    fn test_api_call_limit_parse() {
        assert_eq!(
            ApiCallLimit::parse("40/80"),
            Some(ApiCallLimit {
                request_count: 40,
                bucket_size: 80
            })
        );
        assert!(ApiCallLimit::parse("40/80/1").is_none());
        assert!(ApiCallLimit::parse("a/80").is_none());
        assert!(ApiCallLimit::parse("").is_none());
    }

    #[test]
    fn test_api_call_limit_remaining_saturates() {
        let limit = ApiCallLimit {
            request_count: 45,
            bucket_size: 40,
        };
        assert_eq!(limit.remaining(), 0);
        assert_eq!(limit.to_string(), "45/40");
    }

    #[test]
    fn test_new_parses_shopify_headers() {
        let response = HttpResponse::new(
            429,
            headers(&[
                ("x-shopify-shop-api-call-limit", "40/40"),
                ("retry-after", "2.0"),
                ("x-request-id", "req-1"),
            ]),
            json!({}),
        );

        assert_eq!(response.api_call_limit.unwrap().request_count, 40);
        assert_eq!(response.retry_request_after, Some(2.0));
        assert_eq!(response.request_id(), Some("req-1"));
        assert!(!response.is_ok());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = HttpResponse::new(
            200,
            headers(&[("x-shopify-api-deprecated-reason", "use GraphQL")]),
            json!({}),
        );

        assert!(response.is_ok());
        assert_eq!(response.header("X-Shopify-API-Deprecated-Reason"), Some("use GraphQL"));
        assert_eq!(response.deprecation_reason(), Some("use GraphQL"));
        assert!(response.api_call_limit.is_none());
    }
}
