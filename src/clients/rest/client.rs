//! Admin REST API client.

use std::time::Duration;

use crate::auth::Session;
use crate::clients::rest::errors::RestError;
use crate::clients::{HttpClient, HttpRequest, HttpResponse};
use crate::config::{ApiVersion, ShopifyConfig};

/// Client for the Admin REST API of one shop.
///
/// Requests go to `/admin/api/{version}/{path}.json`. Paths are normalized:
/// leading slashes and a trailing `.json` are stripped, then `.json` is
/// appended.
///
/// [`get`](Self::get) tries once; [`get_with_tries`](Self::get_with_tries)
/// retries 429 and 500 responses.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_admin::RestClient;
///
/// let client = RestClient::new(&session, &config);
/// let response = client.get("shop", &[]).await?;
/// println!("{}", response.body["shop"]["name"]);
/// ```
#[derive(Debug)]
pub struct RestClient {
    http_client: HttpClient,
    api_version: ApiVersion,
    page_delay: Duration,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a client for the config's API version.
    #[must_use]
    pub fn new(session: &Session, config: &ShopifyConfig) -> Self {
        Self::with_version(session, config, *config.api_version())
    }

    /// Creates a client pinned to `version`.
    #[must_use]
    pub fn with_version(session: &Session, config: &ShopifyConfig, version: ApiVersion) -> Self {
        let base_path = format!("/admin/api/{version}");
        Self {
            http_client: HttpClient::new(base_path, session, config),
            api_version: version,
            page_delay: config.page_delay(),
        }
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the delay observed after each page of a paged collection.
    #[must_use]
    pub const fn page_delay(&self) -> Duration {
        self.page_delay
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] for an empty path, otherwise
    /// [`RestError::Http`] on transport failure or non-2xx status.
    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<HttpResponse, RestError> {
        self.make_request(path, query, 1).await
    }

    /// Sends a GET request with up to `tries` attempts.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn get_with_tries(
        &self,
        path: &str,
        query: &[(String, String)],
        tries: u32,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(path, query, tries).await
    }

    async fn make_request(
        &self,
        path: &str,
        query: &[(String, String)],
        tries: u32,
    ) -> Result<HttpResponse, RestError> {
        let normalized_path = normalize_path(path)?;

        let request = HttpRequest::builder(normalized_path)
            .query(query.iter().cloned())
            .tries(tries)
            .build()?;
        Ok(self.http_client.request(request).await?)
    }
}

fn normalize_path(path: &str) -> Result<String, RestError> {
    let trimmed = path.trim_start_matches('/');
    let trimmed = trimmed.strip_suffix(".json").unwrap_or(trimmed);

    if trimmed.is_empty() {
        return Err(RestError::InvalidPath {
            path: path.to_string(),
        });
    }

    Ok(format!("{trimmed}.json"))
}
