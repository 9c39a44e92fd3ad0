//! Authenticated sessions used by the REST client.

use crate::auth::{AccessToken, AssociatedUser, Scopes};
use crate::config::ShopDomain;
use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// The state needed to call the Admin API on behalf of a shop.
///
/// Build one from the [`AccessToken`] returned by the installation flow with
/// [`Session::from_access_token`]. [`HttpClient`](crate::clients::HttpClient)
/// sends [`access_token`](Self::access_token) as `X-Shopify-Access-Token`.
///
/// # Example
///
/// ```rust
/// use shopify_admin::{AccessToken, Scopes, Session, ShopDomain};
///
/// let token = AccessToken::offline("shpat_abc", "read_products".parse().unwrap());
/// let session = Session::from_access_token(ShopDomain::new("my-store").unwrap(), &token);
///
/// assert_eq!(session.id, "offline_my-store.myshopify.com");
/// assert!(!session.expired());
/// ```
#[derive(Clone)]
pub struct Session {
    /// Identifier: `offline_{shop}` or `{shop}_{user_id}`.
    pub id: String,

    /// The shop this session is for.
    pub shop: ShopDomain,

    /// The access token for API authentication.
    pub access_token: String,

    /// The OAuth scopes granted to this session.
    pub scopes: Scopes,

    /// Whether this is an online (user-specific) session.
    pub is_online: bool,

    /// When this session expires, if applicable.
    pub expires: Option<DateTime<Utc>>,

    /// The staff member of an online session.
    pub associated_user: Option<AssociatedUser>,
}

impl Session {
    /// Creates an offline session for `shop`.
    #[must_use]
    pub fn new(shop: ShopDomain, access_token: impl Into<String>, scopes: Scopes) -> Self {
        Self {
            id: format!("offline_{shop}"),
            shop,
            access_token: access_token.into(),
            scopes,
            is_online: false,
            expires: None,
            associated_user: None,
        }
    }

    /// Creates a session from a token-exchange result.
    ///
    /// Online tokens expire `expires_in` seconds from now.
    #[must_use]
    pub fn from_access_token(shop: ShopDomain, token: &AccessToken) -> Self {
        let mut session = Self::new(shop, token.access_token(), token.scopes().clone());

        if let Some(online) = token.online_access() {
            let lifetime = i64::try_from(online.expires_in).unwrap_or(i64::MAX);
            session.id = format!("{}_{}", session.shop, online.associated_user.id);
            session.is_online = true;
            session.expires = Duration::try_seconds(lifetime).map(|d| Utc::now() + d);
            session.associated_user = Some(online.associated_user.clone());
        }

        session
    }

    /// Returns `true` if this session has expired.
    ///
    /// Sessions without an expiration time never expire. Nothing in this
    /// crate refuses to send an expired token.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires.is_some_and(|expires| Utc::now() > expires)
    }

    /// Returns `true` if this session has a token and is not expired.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.access_token.is_empty() && !self.expired()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("shop", &self.shop)
            .field("access_token", &"*****")
            .field("scopes", &self.scopes)
            .field("is_online", &self.is_online)
            .field("expires", &self.expires)
            .field("associated_user", &self.associated_user)
            .finish()
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};
