//! Validated newtype wrappers for configuration values.
//!
//! Each wrapper validates its contents on construction so the rest of the
//! crate can rely on well-formed values.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A Shopify app API key (the OAuth `client_id`).
///
/// # Example
///
/// ```rust
/// use shopify_admin::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A Shopify app API secret key (the OAuth `client_secret` and HMAC key).
///
/// The `Debug` output is masked so the secret never reaches logs.
///
/// ```rust
/// use shopify_admin::ApiSecretKey;
///
/// let secret = ApiSecretKey::new("hush").unwrap();
/// assert_eq!(format!("{secret:?}"), "ApiSecretKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSecretKey(String);

impl ApiSecretKey {
    /// Creates a new API secret key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiSecretKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiSecretKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiSecretKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecretKey(*****)")
    }
}

/// A shop's `{name}.myshopify.com` domain.
///
/// Accepts either the bare shop name or the full domain and always stores the
/// full, lowercased form.
///
/// ```rust
/// use shopify_admin::ShopDomain;
///
/// let domain = ShopDomain::new("My-Store").unwrap();
/// assert_eq!(domain.as_ref(), "my-store.myshopify.com");
/// assert_eq!(domain.shop_name(), "my-store");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShopDomain {
    full_domain: String,
    shop_name_end: usize,
}

impl ShopDomain {
    /// Domain suffix shared by every shop.
    pub const SUFFIX: &'static str = ".myshopify.com";

    /// Creates a new shop domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopDomain`] if the name is empty, uses a
    /// foreign suffix, or contains characters other than letters, digits and
    /// hyphens.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let domain: String = domain.into();
        let domain = domain.trim().to_lowercase();

        let shop_name = match domain.strip_suffix(Self::SUFFIX) {
            Some(name) => name.to_string(),
            None if domain.contains('.') => {
                return Err(ConfigError::InvalidShopDomain { domain });
            }
            None => domain.clone(),
        };

        if !Self::is_valid_shop_name(&shop_name) {
            return Err(ConfigError::InvalidShopDomain { domain });
        }

        Ok(Self {
            shop_name_end: shop_name.len(),
            full_domain: format!("{shop_name}{}", Self::SUFFIX),
        })
    }

    /// Returns the shop name portion (`my-store` for `my-store.myshopify.com`).
    #[must_use]
    pub fn shop_name(&self) -> &str {
        &self.full_domain[..self.shop_name_end]
    }

    fn is_valid_shop_name(name: &str) -> bool {
        !name.is_empty()
            && !name.starts_with('-')
            && !name.ends_with('-')
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.full_domain
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_domain)
    }
}

impl Serialize for ShopDomain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.full_domain)
    }
}

impl<'de> Deserialize<'de> for ShopDomain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// An absolute URL with a scheme and host.
///
/// Used for the OAuth redirect URI and for the outbound API origin override.
///
/// ```rust
/// use shopify_admin::HostUrl;
///
/// let url = HostUrl::new("http://127.0.0.1:8080/callback").unwrap();
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), "127.0.0.1");
/// assert_eq!(url.origin(), "http://127.0.0.1:8080");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    host_end: usize,
    authority_end: usize,
}

impl HostUrl {
    /// Creates a new URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the scheme or host is missing.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url: String = url.into();
        let url = url.trim().to_string();
        let invalid = || ConfigError::InvalidHostUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let rest = &url[host_start..];
        let authority_end = rest.find(['/', '?', '#']).map_or(url.len(), |i| host_start + i);
        let host_end = url[host_start..authority_end]
            .find(':')
            .map_or(authority_end, |i| host_start + i);

        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_end,
            authority_end,
        })
    }

    /// Returns the scheme (e.g. `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name without port.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.scheme_end + 3..self.host_end]
    }

    /// Returns `scheme://host[:port]` without path, query or fragment.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.url[..self.authority_end]
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for HostUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_rejects_empty_string() {
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_api_secret_key_masks_value_in_debug() {
        let secret = ApiSecretKey::new("super-secret-key").unwrap();
        let debug_output = format!("{secret:?}");
        assert_eq!(debug_output, "ApiSecretKey(*****)");
        assert!(!debug_output.contains("super-secret-key"));
    }

    #[test]
    fn test_shop_domain_normalizes_short_format() {
        let domain = ShopDomain::new("bar").unwrap();
        assert_eq!(domain.as_ref(), "bar.myshopify.com");
        assert_eq!(domain.shop_name(), "bar");
    }

    #[test]
    fn test_shop_domain_accepts_full_format() {
        let domain = ShopDomain::new("some-shop.myshopify.com").unwrap();
        assert_eq!(domain.as_ref(), "some-shop.myshopify.com");
        assert_eq!(domain.shop_name(), "some-shop");
    }

    #[test]
    fn test_shop_domain_rejects_invalid_domains() {
        assert!(ShopDomain::new("").is_err());
        assert!(ShopDomain::new("my store").is_err());
        assert!(ShopDomain::new("my_store").is_err());
        assert!(ShopDomain::new("-my-store").is_err());
        assert!(ShopDomain::new("my-store-").is_err());
        assert!(ShopDomain::new("my-store.otherdomain.com").is_err());
        assert!(ShopDomain::new(".myshopify.com").is_err());
    }

    #[test]
    fn test_shop_domain_serde_uses_full_domain() {
        let domain = ShopDomain::new("my-store").unwrap();
        let json = serde_json::to_string(&domain).unwrap();
        assert_eq!(json, r#""my-store.myshopify.com""#);

        let parsed: ShopDomain = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, domain);
    }

    #[test]
    fn test_host_url_splits_components() {
        let url = HostUrl::new("https://myapp.example.com/auth/callback?x=1").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), "myapp.example.com");
        assert_eq!(url.origin(), "https://myapp.example.com");

        let url = HostUrl::new("http://localhost:3000").unwrap();
        assert_eq!(url.host_name(), "localhost");
        assert_eq!(url.origin(), "http://localhost:3000");
    }

    #[test]
    fn test_host_url_rejects_invalid() {
        assert!(HostUrl::new("myapp.example.com").is_err());
        assert!(HostUrl::new("https://").is_err());
        assert!(HostUrl::new("https://:8080").is_err());
        assert!(HostUrl::new("://example.com").is_err());
    }
}
