//! HTTP transport.
//!
//! - [`HttpClient`]: sends requests to one shop with its access token
//! - [`HttpRequest`]: path, query and retry budget
//! - [`HttpResponse`]: status, headers, JSON body and [`ApiCallLimit`]
//! - [`rest::RestClient`]: path-normalizing REST client
//!
//! # Retry Behavior
//!
//! Requests are tried once by default. With `.tries(n)`:
//!
//! - **429**: waits for `Retry-After`, or 1 second when absent
//! - **500**: waits 1 second
//! - **other non-2xx**: returned immediately
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::clients::{HttpClient, HttpRequest};
//!
//! let client = HttpClient::new("/admin/api/2025-10", &session, &config);
//! let request = HttpRequest::builder("customers.json")
//!     .query_param("page", "1")
//!     .tries(3)
//!     .build()?;
//! let response = client.request(request).await?;
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{user_agent, HttpClient, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{HttpRequest, HttpRequestBuilder};
pub use http_response::{ApiCallLimit, HttpResponse};

pub use rest::{RestClient, RestError};
