//! Nonces for the OAuth `state` parameter.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt;

/// A random value passed as `state` in the authorization URL and expected
/// back in the confirmation redirect.
///
/// The caller stores the nonce between the two steps (typically in the
/// merchant's browser session) and hands it to
/// [`InstallationConfirmer`](super::InstallationConfirmer).
///
/// # Example
///
/// ```rust
/// use shopify_admin::auth::oauth::Nonce;
///
/// let nonce = Nonce::generate();
/// assert_eq!(nonce.as_ref().len(), 15);
/// assert!(nonce.as_ref().chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Nonce(String);

impl Nonce {
    const LENGTH: usize = 15;

    /// Generates a nonce from the thread-local CSPRNG.
    #[must_use]
    pub fn generate() -> Self {
        let value: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::LENGTH)
            .map(char::from)
            .collect();
        Self(value)
    }

    /// Wraps a caller-supplied value.
    #[must_use]
    pub fn from_value(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Consumes the nonce, returning its value.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Nonce {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
