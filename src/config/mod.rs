//! Configuration types.
//!
//! - [`ShopifyConfig`]: immutable settings shared by the OAuth flow and the REST client
//! - [`ShopifyConfigBuilder`]: fluent builder for [`ShopifyConfig`]
//! - [`ApiKey`], [`ApiSecretKey`], [`ShopDomain`], [`HostUrl`]: validated newtypes
//! - [`ApiVersion`]: Admin API version
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use shopify_admin::{ShopifyConfig, ApiKey, ApiSecretKey};
//!
//! let config = ShopifyConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .api_secret_key(ApiSecretKey::new("my-secret").unwrap())
//!     .page_delay(Duration::from_millis(250))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.page_delay(), Duration::from_millis(250));
//! ```

mod newtypes;
mod version;

pub use newtypes::{ApiKey, ApiSecretKey, HostUrl, ShopDomain};
pub use version::ApiVersion;

use std::time::Duration;

use crate::auth::{Credentials, Scopes};
use crate::error::ConfigError;

/// Delay observed after every page fetch unless configured otherwise.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(500);

/// Settings for talking to Shopify on behalf of one app.
///
/// There is no global instance: build one and pass it by reference to
/// whatever needs it.
#[derive(Clone, Debug)]
pub struct ShopifyConfig {
    credentials: Credentials,
    scopes: Scopes,
    api_version: ApiVersion,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    page_delay: Duration,
}

impl ShopifyConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> ShopifyConfigBuilder {
        ShopifyConfigBuilder::new()
    }

    /// Returns the app credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        self.credentials.api_key()
    }

    /// Returns the API secret key.
    #[must_use]
    pub const fn api_secret_key(&self) -> &ApiSecretKey {
        self.credentials.api_secret_key()
    }

    /// Returns the default scopes requested during authorization.
    #[must_use]
    pub const fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    /// Returns the Admin API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the origin override for outbound requests, if configured.
    ///
    /// When set, requests that would go to `https://{shop}` are sent to this
    /// origin instead, with the shop kept in the `Host` header.
    #[must_use]
    pub const fn api_host(&self) -> Option<&HostUrl> {
        self.api_host.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the delay observed after each page fetch.
    #[must_use]
    pub const fn page_delay(&self) -> Duration {
        self.page_delay
    }
}

// Verify ShopifyConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopifyConfig>();
};

/// Builder for [`ShopifyConfig`].
///
/// `api_key` and `api_secret_key` are required; everything else has a default:
///
/// - `scopes`: empty
/// - `api_version`: [`ApiVersion::latest`]
/// - `api_host`: `None`
/// - `user_agent_prefix`: `None`
/// - `page_delay`: [`DEFAULT_PAGE_DELAY`]
#[derive(Debug, Default)]
pub struct ShopifyConfigBuilder {
    api_key: Option<ApiKey>,
    api_secret_key: Option<ApiSecretKey>,
    scopes: Option<Scopes>,
    api_version: Option<ApiVersion>,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    page_delay: Option<Duration>,
}

impl ShopifyConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API secret key (required).
    #[must_use]
    pub fn api_secret_key(mut self, key: ApiSecretKey) -> Self {
        self.api_secret_key = Some(key);
        self
    }

    /// Sets both credentials at once.
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        let (api_key, api_secret_key) = credentials.into_parts();
        self.api_key = Some(api_key);
        self.api_secret_key = Some(api_secret_key);
        self
    }

    /// Sets the default scopes.
    #[must_use]
    pub fn scopes(mut self, scopes: Scopes) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Sets the Admin API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Routes every outbound request to this origin instead of the shop's.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets the user agent prefix.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the delay observed after each page fetch.
    #[must_use]
    pub const fn page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = Some(delay);
        self
    }

    /// Builds the [`ShopifyConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` or
    /// `api_secret_key` is unset.
    pub fn build(self) -> Result<ShopifyConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let api_secret_key = self
            .api_secret_key
            .ok_or(ConfigError::MissingRequiredField {
                field: "api_secret_key",
            })?;

        Ok(ShopifyConfig {
            credentials: Credentials::new(api_key, api_secret_key),
            scopes: self.scopes.unwrap_or_default(),
            api_version: self.api_version.unwrap_or_default(),
            api_host: self.api_host,
            user_agent_prefix: self.user_agent_prefix,
            page_delay: self.page_delay.unwrap_or(DEFAULT_PAGE_DELAY),
        })
    }
}
