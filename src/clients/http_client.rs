//! Authenticated transport to a shop's Admin API.

use std::collections::HashMap;
use std::time::Duration;

use crate::auth::Session;
use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::ShopifyConfig;

/// Wait between retries when Shopify gives no `Retry-After`.
pub const RETRY_WAIT_TIME: Duration = Duration::from_secs(1);

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builds the `User-Agent` value, optionally prefixed by the app's own name.
#[must_use]
pub fn user_agent(prefix: Option<&str>) -> String {
    let prefix = prefix.map_or(String::new(), |p| format!("{p} | "));
    let rust_version = env!("CARGO_PKG_RUST_VERSION");
    format!("{prefix}Shopify Admin REST Library v{SDK_VERSION} | Rust {rust_version}")
}

/// HTTP client bound to one shop and one access token.
///
/// The client:
/// - resolves the base URI from the session's shop, or from the configured
///   `api_host` origin (keeping the shop in the `Host` header)
/// - sends `User-Agent`, `Accept: application/json` and
///   `X-Shopify-Access-Token` on every request
/// - retries 429 and 500 responses only when the request asks for more
///   than one try
/// - logs `X-Shopify-API-Deprecated-Reason` at `warn` and the call limit
///   at `debug`
///
/// # Example
///
/// ```rust,ignore
/// use shopify_admin::clients::{HttpClient, HttpRequest};
///
/// let client = HttpClient::new("/admin/api/2025-10", &session, &config);
/// let request = HttpRequest::builder("shop.json").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_uri: String,
    base_path: String,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client for `session`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(base_path: impl Into<String>, session: &Session, config: &ShopifyConfig) -> Self {
        let api_host = config.api_host();
        let base_uri = api_host.map_or_else(
            || format!("https://{}", session.shop),
            |host| host.origin().to_string(),
        );

        let mut default_headers = HashMap::new();
        default_headers.insert(
            "User-Agent".to_string(),
            user_agent(config.user_agent_prefix()),
        );
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        if api_host.is_some() {
            default_headers.insert("Host".to_string(), session.shop.to_string());
        }

        if !session.access_token.is_empty() {
            default_headers.insert(
                "X-Shopify-Access-Token".to_string(),
                session.access_token.clone(),
            );
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_uri,
            base_path: base_path.into(),
            default_headers,
        }
    }

    /// Returns the base URI, e.g. `https://my-store.myshopify.com`.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path, e.g. `/admin/api/2025-10`.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends `request`.
    ///
    /// # Errors
    ///
    /// - [`HttpError::InvalidRequest`]: the request failed validation
    /// - [`HttpError::Network`]: the connection failed
    /// - [`HttpError::Response`]: non-2xx response (after the single try by default)
    /// - [`HttpError::MaxRetries`]: every one of several tries got a 429 or 500
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}{}/{}", self.base_uri, self.base_path, request.path);

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = self.client.get(&url);
            for (key, value) in &self.default_headers {
                req_builder = req_builder.header(key, value);
            }
            if !request.query.is_empty() {
                req_builder = req_builder.query(&request.query);
            }

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await?;
            let body = Self::parse_body(code, &body_text);

            let response = HttpResponse::new(code, res_headers, body);

            if let Some(reason) = response.deprecation_reason() {
                tracing::warn!(
                    path = %request.path,
                    reason,
                    "Deprecated request to Shopify API"
                );
            }
            if let Some(limit) = response.api_call_limit {
                tracing::debug!(path = %request.path, call_limit = %limit, "API call limit");
            }

            if response.is_ok() {
                return Ok(response);
            }

            let message = Self::serialize_error(&response);
            let error_reference = response.request_id().map(String::from);

            if !(code == 429 || code == 500) || request.tries == 1 {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message,
                    error_reference,
                }));
            }

            if tries >= request.tries {
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: request.tries,
                    message,
                    error_reference,
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::debug!(path = %request.path, code, tries, ?delay, "Retrying request");
            tokio::time::sleep(delay).await;
        }
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(name.as_str().to_lowercase()).or_default().push(value);
        }
        result
    }

    // Non-JSON 5xx bodies are kept for the error message; other non-JSON
    // bodies become `{}`.
    fn parse_body(code: u16, body_text: &str) -> serde_json::Value {
        if body_text.is_empty() {
            return serde_json::json!({});
        }
        serde_json::from_str(body_text).unwrap_or_else(|_| {
            if code >= 500 {
                serde_json::json!({ "raw_body": body_text })
            } else {
                serde_json::json!({})
            }
        })
    }

    // 429 honours Retry-After; 500 always waits the fixed time.
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> Duration {
        if status == 429 {
            if let Some(retry_after) = response
                .retry_request_after
                .filter(|s| s.is_finite() && *s >= 0.0)
            {
                return Duration::from_secs_f64(retry_after);
            }
        }
        RETRY_WAIT_TIME
    }

    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        if let Some(errors) = response.body.get("errors") {
            error_body.insert("errors".to_string(), errors.clone());
        }
        if let Some(error) = response.body.get("error") {
            error_body.insert("error".to_string(), error.clone());
            if let Some(desc) = response.body.get("error_description") {
                error_body.insert("error_description".to_string(), desc.clone());
            }
        }
        if let Some(raw) = response.body.get("raw_body") {
            error_body.insert("raw_body".to_string(), raw.clone());
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::Value::Object(error_body).to_string()
    }
}
