//! The inbound installation redirect.

use crate::auth::oauth::OAuthError;
use std::collections::HashMap;

/// Query parameters Shopify sends to the app's redirect URI after the
/// merchant approves the installation.
///
/// Every field is untrusted until [`SecurityChecks`](super::SecurityChecks)
/// has passed it. The value is consumed by a single token exchange.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use shopify_admin::auth::oauth::ConfirmationRedirect;
///
/// let query: HashMap<String, String> = [
///     ("code", "0907a61c0c8d55e99db179b68161bc00"),
///     ("shop", "some-shop.myshopify.com"),
///     ("timestamp", "1337178173"),
///     ("hmac", "4712bf92ffc2917d15a2f5a273e39f0116667419aa4b6ac0b3baaf26fa3c4d20"),
/// ]
/// .into_iter()
/// .map(|(k, v)| (k.to_string(), v.to_string()))
/// .collect();
///
/// let redirect = ConfirmationRedirect::from_query(&query).unwrap();
/// assert_eq!(redirect.state, None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmationRedirect {
    /// The authorization code to exchange.
    pub code: String,

    /// The shop hostname, e.g. `some-shop.myshopify.com`.
    pub shop: String,

    /// The nonce echoed back from the authorization URL, if any.
    pub state: Option<String>,

    /// Unix timestamp of the redirect.
    pub timestamp: String,

    /// Hex HMAC-SHA256 signature of the other fields.
    pub hmac: String,
}

impl ConfirmationRedirect {
    /// Creates a redirect from its parts. An empty `state` is stored as `None`.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        shop: impl Into<String>,
        state: Option<String>,
        timestamp: impl Into<String>,
        hmac: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            shop: shop.into(),
            state: state.filter(|s| !s.is_empty()),
            timestamp: timestamp.into(),
            hmac: hmac.into(),
        }
    }

    /// Builds the redirect from a raw query-parameter map.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::InvalidCallback`] if `code`, `shop`,
    /// `timestamp` or `hmac` is missing or empty.
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self, OAuthError> {
        let required = |name: &str| -> Result<String, OAuthError> {
            query
                .get(name)
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or_else(|| OAuthError::InvalidCallback {
                    reason: format!("Missing required parameter '{name}'"),
                })
        };

        Ok(Self::new(
            required("code")?,
            required("shop")?,
            query.get("state").cloned(),
            required("timestamp")?,
            required("hmac")?,
        ))
    }

    /// Returns the message Shopify signed: `code`, `shop`, `state` and
    /// `timestamp` in that order, form-encoded, `state` omitted when absent.
    #[must_use]
    pub fn to_signable_string(&self) -> String {
        let mut pairs: Vec<(&str, &str)> =
            vec![("code", self.code.as_str()), ("shop", self.shop.as_str())];
        if let Some(state) = &self.state {
            pairs.push(("state", state.as_str()));
        }
        pairs.push(("timestamp", self.timestamp.as_str()));

        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish()
    }
}
