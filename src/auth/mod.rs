//! Authentication types.
//!
//! - [`Credentials`]: the app's API key and secret
//! - [`Scopes`]: an ordered list of OAuth scopes
//! - [`AccessToken`]: the result of the token exchange, online or offline
//! - [`AssociatedUser`]: the staff member behind an online token
//! - [`Session`]: what the REST client needs to call the Admin API
//! - [`oauth`]: the authorization-code installation flow
//!
//! # Online and offline access
//!
//! Offline tokens are permanent and shop-level. Online tokens are tied to
//! the staff member who installed the app and expire after `expires_in`
//! seconds. Which one Shopify grants is decided by the
//! [`AccessMode`](oauth::AccessMode) passed to the authorization URL.
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::{AccessToken, Session, ShopDomain};
//!
//! let token = AccessToken::offline("shpat_abc", "read_products".parse().unwrap());
//! let session = Session::from_access_token(ShopDomain::new("my-store").unwrap(), &token);
//!
//! assert!(!session.is_online);
//! assert!(!session.expired());
//! ```

mod access_token;
mod associated_user;
mod credentials;
pub mod oauth;
mod scopes;
pub mod session;

pub use access_token::{AccessToken, OnlineAccess};
pub use associated_user::AssociatedUser;
pub use credentials::Credentials;
pub use scopes::Scopes;
pub use session::Session;
