//! The merchant-facing authorization URL.

use crate::auth::oauth::OAuthError;
use crate::auth::Scopes;
use crate::config::{ApiKey, HostUrl, ShopDomain, ShopifyConfig};

/// Whether Shopify should grant a per-user or a shop-level token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccessMode {
    /// Per-user token that expires, tied to the approving staff member.
    Online,

    /// Permanent shop-level token.
    #[default]
    Offline,
}

/// Builds the URL the merchant is redirected to in order to approve the app.
///
/// Pure: performs no I/O. Each `with_*` call consumes the builder and
/// returns the updated value; clone first to branch from a common base.
///
/// The shop, API key and redirect URI are required. Scopes are
/// deduplicated in order of first appearance. Online access adds
/// `grant_options[]=per-user`; offline access omits the parameter.
///
/// # Example
///
/// ```rust
/// use shopify_admin::{ApiKey, HostUrl, Scopes, ShopDomain};
/// use shopify_admin::auth::oauth::{AccessMode, AuthorizationUriBuilder};
///
/// let url = AuthorizationUriBuilder::new()
///     .with_shop(ShopDomain::new("bar").unwrap())
///     .with_api_key(ApiKey::new("baz").unwrap())
///     .with_scopes(Scopes::new().with_scope("read_content"))
///     .with_redirect_uri(HostUrl::new("http://foo.example.com").unwrap())
///     .with_nonce("qux")
///     .with_access_mode(AccessMode::Online)
///     .build()
///     .unwrap();
///
/// assert!(url.starts_with("https://bar.myshopify.com/admin/oauth/authorize?client_id=baz"));
/// assert!(url.ends_with("grant_options%5B%5D=per-user"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct AuthorizationUriBuilder {
    shop: Option<ShopDomain>,
    api_key: Option<ApiKey>,
    scopes: Scopes,
    redirect_uri: Option<HostUrl>,
    nonce: Option<String>,
    access_mode: AccessMode,
}

impl AuthorizationUriBuilder {
    /// Creates an empty builder for offline access.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded with the config's API key and scopes.
    #[must_use]
    pub fn from_config(config: &ShopifyConfig) -> Self {
        Self::new()
            .with_api_key(config.api_key().clone())
            .with_scopes(config.scopes().clone())
    }

    /// Sets the shop.
    #[must_use]
    pub fn with_shop(mut self, shop: ShopDomain) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Sets the API key sent as `client_id`.
    #[must_use]
    pub fn with_api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Replaces the requested scopes.
    #[must_use]
    pub fn with_scopes(mut self, scopes: Scopes) -> Self {
        self.scopes = scopes;
        self
    }

    /// Sets the URI Shopify redirects to after approval.
    #[must_use]
    pub fn with_redirect_uri(mut self, redirect_uri: HostUrl) -> Self {
        self.redirect_uri = Some(redirect_uri);
        self
    }

    /// Sets the nonce sent as `state`.
    #[must_use]
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Sets the access mode.
    #[must_use]
    pub const fn with_access_mode(mut self, access_mode: AccessMode) -> Self {
        self.access_mode = access_mode;
        self
    }

    /// Builds the authorization URL.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::MissingRequiredParameter`] naming the first of
    /// `redirect_uri`, `shop` or `api_key` that was never set.
    pub fn build(&self) -> Result<String, OAuthError> {
        let redirect_uri = self
            .redirect_uri
            .as_ref()
            .ok_or(OAuthError::MissingRequiredParameter {
                parameter: "redirect_uri",
            })?;
        let shop = self
            .shop
            .as_ref()
            .ok_or(OAuthError::MissingRequiredParameter { parameter: "shop" })?;
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(OAuthError::MissingRequiredParameter {
                parameter: "api_key",
            })?;

        let mut params = vec![("client_id", api_key.as_ref().to_string())];
        if !self.scopes.is_empty() {
            params.push(("scope", self.scopes.to_string()));
        }
        params.push(("redirect_uri", redirect_uri.to_string()));
        if let Some(nonce) = &self.nonce {
            params.push(("state", nonce.clone()));
        }
        if self.access_mode == AccessMode::Online {
            params.push(("grant_options[]", "per-user".to_string()));
        }

        // Keys are encoded too: `grant_options[]` carries brackets
        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!(
            "https://{}/admin/oauth/authorize?{}",
            shop.as_ref(),
            query_string
        ))
    }
}
