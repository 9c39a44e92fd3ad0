//! OAuth authorization-code installation flow.
//!
//! Installing an app on a shop takes two steps:
//!
//! 1. **Authorization** ([`AuthorizationUriBuilder`]): redirect the merchant
//!    to Shopify's approval screen, passing a [`Nonce`] as `state`.
//! 2. **Confirmation** ([`InstallationConfirmer`]): when Shopify redirects
//!    back, verify the [`ConfirmationRedirect`] with [`SecurityChecks`] and
//!    exchange its code for an [`AccessToken`](crate::AccessToken).
//!
//! # Security
//!
//! - The echoed nonce, the shop hostname and the HMAC signature are checked
//!   in that order before any network call; the first failure is returned
//!   as [`OAuthError::SecurityCheckFailed`].
//! - HMAC and nonce comparisons run in constant time.
//! - [`NonceMatching::Strict`] rejects redirects without a nonce.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::{HostUrl, ShopDomain};
//! use shopify_admin::auth::oauth::{
//!     AccessMode, AuthorizationUriBuilder, ConfirmationRedirect, InstallationConfirmer, Nonce,
//! };
//!
//! // Step 1: send the merchant to Shopify
//! let nonce = Nonce::generate();
//! let url = AuthorizationUriBuilder::from_config(&config)
//!     .with_shop(ShopDomain::new("example-shop")?)
//!     .with_redirect_uri(HostUrl::new("https://your-app.com/auth/callback")?)
//!     .with_nonce(nonce.as_ref())
//!     .with_access_mode(AccessMode::Online)
//!     .build()?;
//! // store `nonce` in the merchant's session and redirect to `url`
//!
//! // Step 2: in the callback handler
//! let redirect = ConfirmationRedirect::from_query(&query_params)?;
//! let token = InstallationConfirmer::new(&config)
//!     .request_access_token(&redirect, config.credentials(), Some(nonce.as_ref()))
//!     .await?;
//! ```

mod authorization_uri;
mod error;
pub mod hmac;
mod installation;
mod nonce;
mod redirect;
mod security;

pub use authorization_uri::{AccessMode, AuthorizationUriBuilder};
pub use error::OAuthError;
pub use installation::InstallationConfirmer;
pub use nonce::Nonce;
pub use redirect::ConfirmationRedirect;
pub use security::{NonceMatching, SecurityCheckFailure, SecurityCheckResult, SecurityChecks};
