//! # Shopify Admin REST client
//!
//! A typed client for the Shopify Admin REST API: the OAuth installation
//! flow, per-resource request builders and lazy iteration over paged
//! collections.
//!
//! ## Overview
//!
//! - Type-safe configuration via [`ShopifyConfig`] and [`ShopifyConfigBuilder`]
//! - Validated newtypes for credentials, shop domains, URLs and API versions
//! - OAuth scope lists, deduplicated on read
//! - Authorization URLs and the installation callback via [`auth::oauth`]
//! - Async HTTP transport with call-limit visibility and optional retries
//! - Resources (Customer, Product, Redirect, ScriptTag, Metafield, Shop) and
//!   [`rest::PagedCollection`] in [`rest`]
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_admin::{ApiKey, ApiSecretKey, ApiVersion, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .api_secret_key(ApiSecretKey::new("your-api-secret").unwrap())
//!     .scopes("read_products,write_orders".parse().unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.scopes().requested(), vec!["read_products", "write_orders"]);
//! ```
//!
//! ## Installing an App
//!
//! ```rust,ignore
//! use shopify_admin::auth::oauth::{
//!     AccessMode, AuthorizationUriBuilder, ConfirmationRedirect, InstallationConfirmer, Nonce,
//! };
//! use shopify_admin::{HostUrl, Session, ShopDomain};
//!
//! // 1. Send the merchant to Shopify.
//! let nonce = Nonce::generate();
//! let url = AuthorizationUriBuilder::from_config(&config)
//!     .with_shop(ShopDomain::new("example-shop")?)
//!     .with_redirect_uri(HostUrl::new("https://app.example.com/auth/callback")?)
//!     .with_nonce(nonce.as_ref())
//!     .with_access_mode(AccessMode::Online)
//!     .build()?;
//!
//! // 2. Shopify redirects back; verify and exchange the code.
//! let redirect = ConfirmationRedirect::from_query(&query)?;
//! let token = InstallationConfirmer::new(&config)
//!     .request_access_token(&redirect, config.credentials(), Some(nonce.as_ref()))
//!     .await?;
//!
//! let session = Session::from_access_token(ShopDomain::new(&redirect.shop)?, &token);
//! ```
//!
//! ## Reading Collections
//!
//! ```rust,ignore
//! use shopify_admin::rest::resources::{Customer, CustomerListParams};
//! use shopify_admin::RestClient;
//!
//! let client = RestClient::new(&session, &config);
//! let mut customers = Customer::list(&client, CustomerListParams::default())?;
//! while let Some(customer) = customers.next().await {
//!     println!("{:?}", customer?.email);
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is passed explicitly
//! - **Fail-fast validation**: newtypes validate on construction
//! - **Thread-safe**: public types are `Send + Sync`
//! - **Async-first**: built on Tokio; page spacing uses non-blocking timers

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

pub use auth::{AccessToken, AssociatedUser, Credentials, OnlineAccess, Scopes, Session};
pub use config::{
    ApiKey, ApiSecretKey, ApiVersion, HostUrl, ShopDomain, ShopifyConfig, ShopifyConfigBuilder,
};
pub use error::ConfigError;

pub use clients::{ApiCallLimit, HttpError, HttpResponse, RestClient, RestError};

pub use auth::oauth::{
    AccessMode, AuthorizationUriBuilder, ConfirmationRedirect, InstallationConfirmer, OAuthError,
    SecurityChecks,
};
pub use rest::{PagedCollection, ResourceError};
