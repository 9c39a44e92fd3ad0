//! Admin REST resources.
//!
//! Each resource has a model, list parameters, `find` (Shop: `current`) and
//! `list`, which returns a [`ResourceCollection`](crate::rest::ResourceCollection).
//!
//! | Resource | Collection path |
//! |---|---|
//! | [`Customer`] | `customers` |
//! | [`Product`] | `products` |
//! | [`Redirect`] | `redirects` |
//! | [`ScriptTag`] | `script_tags` |
//! | [`Metafield`] | `metafields`, or `{owner}/{id}/metafields` |
//! | [`Shop`] | `shop` (single) |

mod customer;
mod metafield;
mod product;
mod redirect;
mod script_tag;
mod shop;

pub use customer::{Customer, CustomerAddress, CustomerListParams, CustomerState};
pub use metafield::{Metafield, MetafieldListParams, MetafieldOwner};
pub use product::{Product, ProductImage, ProductListParams, ProductStatus, ProductVariant};
pub use redirect::{Redirect, RedirectListParams};
pub use script_tag::{ScriptTag, ScriptTagDisplayScope, ScriptTagEvent, ScriptTagListParams};
pub use shop::Shop;
