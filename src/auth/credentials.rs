//! App credentials.

use crate::config::{ApiKey, ApiSecretKey};

/// The key pair issued when an app is registered with Shopify.
///
/// The API key identifies the app (`client_id`); the secret signs and
/// verifies HMACs and authenticates the token exchange (`client_secret`).
/// The value is immutable and cheap to clone.
///
/// # Example
///
/// ```rust
/// use shopify_admin::{ApiKey, ApiSecretKey, Credentials};
///
/// let credentials = Credentials::new(
///     ApiKey::new("baz").unwrap(),
///     ApiSecretKey::new("hush").unwrap(),
/// );
/// assert_eq!(credentials.api_key().as_ref(), "baz");
/// assert!(!format!("{credentials:?}").contains("hush"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    api_key: ApiKey,
    api_secret_key: ApiSecretKey,
}

impl Credentials {
    /// Creates credentials from a validated key pair.
    #[must_use]
    pub const fn new(api_key: ApiKey, api_secret_key: ApiSecretKey) -> Self {
        Self {
            api_key,
            api_secret_key,
        }
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API secret key.
    #[must_use]
    pub const fn api_secret_key(&self) -> &ApiSecretKey {
        &self.api_secret_key
    }

    /// Splits the credentials into key and secret.
    #[must_use]
    pub fn into_parts(self) -> (ApiKey, ApiSecretKey) {
        (self.api_key, self.api_secret_key)
    }
}

// Verify Credentials is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Credentials>();
};
