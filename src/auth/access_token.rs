//! Access tokens returned by the OAuth token exchange.

use crate::auth::oauth::OAuthError;
use crate::auth::{AssociatedUser, Scopes};
use serde::Deserialize;
use std::fmt;

/// An access token granted by a shop.
///
/// Offline grants carry only the token and its scopes. Online (per-user)
/// grants additionally carry an [`OnlineAccess`] block, present exactly when
/// the token-exchange response contained `associated_user`.
///
/// The library never enforces expiry; `expires_in` is reported as received.
/// The `Debug` output masks the token value.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    access_token: String,
    scopes: Scopes,
    online: Option<OnlineAccess>,
}

/// Fields present only on online (per-user) grants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OnlineAccess {
    /// Seconds until the token expires, counted from issuance.
    pub expires_in: u64,

    /// Scopes granted to the associated user.
    pub associated_user_scopes: Scopes,

    /// The staff member who approved the grant.
    pub associated_user: AssociatedUser,
}

/// Wire shape of `POST /admin/oauth/access_token`.
#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
    scope: Option<String>,
    expires_in: Option<u64>,
    associated_user_scope: Option<String>,
    associated_user: Option<serde_json::Value>,
}

impl AccessToken {
    /// Creates an offline access token.
    #[must_use]
    pub fn offline(access_token: impl Into<String>, scopes: Scopes) -> Self {
        Self {
            access_token: access_token.into(),
            scopes,
            online: None,
        }
    }

    /// Creates an online access token.
    #[must_use]
    pub fn online(access_token: impl Into<String>, scopes: Scopes, online: OnlineAccess) -> Self {
        Self {
            access_token: access_token.into(),
            scopes,
            online: Some(online),
        }
    }

    /// Parses a token-exchange response body.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::MissingExpectedAttribute`] if `access_token` or
    /// `scope` is absent, or if an online grant lacks `expires_in` or
    /// `associated_user_scope`, or carries a malformed `associated_user`.
    pub fn from_response(body: &serde_json::Value) -> Result<Self, OAuthError> {
        let raw = AccessTokenResponse::deserialize(body)
            .map_err(|_| missing("access_token"))?;

        let access_token = raw
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| missing("access_token"))?;
        let scopes = parse_scope_list(&raw.scope.ok_or_else(|| missing("scope"))?);

        let Some(user) = raw.associated_user else {
            return Ok(Self::offline(access_token, scopes));
        };

        let associated_user =
            AssociatedUser::deserialize(&user).map_err(|_| missing("associated_user"))?;
        let expires_in = raw.expires_in.ok_or_else(|| missing("expires_in"))?;
        let associated_user_scopes = parse_scope_list(
            &raw.associated_user_scope
                .ok_or_else(|| missing("associated_user_scope"))?,
        );

        Ok(Self::online(
            access_token,
            scopes,
            OnlineAccess {
                expires_in,
                associated_user_scopes,
                associated_user,
            },
        ))
    }

    /// Returns the token value for the `X-Shopify-Access-Token` header.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the scopes granted to the app.
    #[must_use]
    pub const fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    /// Returns the online-only fields, or `None` for an offline grant.
    #[must_use]
    pub const fn online_access(&self) -> Option<&OnlineAccess> {
        self.online.as_ref()
    }

    /// Returns `true` for a per-user grant.
    #[must_use]
    pub const fn is_online(&self) -> bool {
        self.online.is_some()
    }

    /// Returns the lifetime in seconds for online grants.
    #[must_use]
    pub fn expires_in(&self) -> Option<u64> {
        self.online.as_ref().map(|o| o.expires_in)
    }

    /// Returns the associated user for online grants.
    #[must_use]
    pub fn associated_user(&self) -> Option<&AssociatedUser> {
        self.online.as_ref().map(|o| &o.associated_user)
    }

    /// Returns the associated user's scopes for online grants.
    #[must_use]
    pub fn associated_user_scopes(&self) -> Option<&Scopes> {
        self.online.as_ref().map(|o| &o.associated_user_scopes)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"*****")
            .field("scopes", &self.scopes)
            .field("online", &self.online)
            .finish()
    }
}

// Shopify returns granted scopes unvalidated, so no character check here.
fn parse_scope_list(raw: &str) -> Scopes {
    Scopes::new().with_scopes(raw.split(','))
}

fn missing(attribute: &str) -> OAuthError {
    OAuthError::MissingExpectedAttribute {
        attribute: attribute.to_string(),
    }
}

// Verify AccessToken is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AccessToken>();
};
