//! REST client built on [`HttpClient`](crate::clients::HttpClient).
//!
//! - [`RestClient`]: `get` and `get_with_tries` against `/admin/api/{version}`
//! - [`RestError`]: path and transport failures
//!
//! Paths are normalized the same way for every method: `/customers`,
//! `customers` and `customers.json` all address `customers.json`.

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
