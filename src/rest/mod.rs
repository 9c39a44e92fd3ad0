//! Typed access to Admin REST resources.
//!
//! - [`Resource`]: a model with its JSON keys and id
//! - [`PagedRequest`] / [`ListRequest`]: a collection endpoint requested one page at a time
//! - [`Transformer`]: turns a response into typed values
//! - [`PagedCollection`]: the lazy, page-by-page sequence of a collection
//! - [`ResourceError`]: errors, with a 404 on a lookup by id mapped to `NotFound`
//! - [`resources`]: Customer, Product, Redirect, ScriptTag, Metafield and Shop
//!
//! # Example
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use shopify_admin::rest::resources::{Product, ProductListParams};
//!
//! let params = ProductListParams { vendor: Some("Apple".to_string()), ..Default::default() };
//! let products = Product::list(&client, params)?.into_stream();
//! futures::pin_mut!(products);
//! while let Some(product) = products.next().await {
//!     println!("{:?}", product?.title);
//! }
//! ```

mod collection;
mod errors;
mod paged;
mod resource;
pub mod resources;
mod transform;

pub use collection::PagedCollection;
pub use errors::ResourceError;
pub use paged::{ListRequest, PagedRequest};
pub use resource::{fetch_one, list_collection, serialize_to_query, Resource};
pub use transform::{CollectionTransformer, SingleTransformer, Transformer};

/// The collection type returned by every resource's `list`.
pub type ResourceCollection<'a, R> = PagedCollection<'a, R, ListRequest, CollectionTransformer<R>>;
