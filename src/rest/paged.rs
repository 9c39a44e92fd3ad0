//! Page-aware request descriptions.

use crate::rest::{serialize_to_query, ResourceError};

/// Describes a GET endpoint that can be requested page by page.
pub trait PagedRequest: Send + Sync {
    /// The page the cursor starts *before*; the first fetch asks for the
    /// page after it. `None` means 0, so fetching begins at page 1.
    fn initial_page(&self) -> Option<u32> {
        None
    }

    /// The collection path, e.g. `customers` or `products/1/metafields`.
    fn path(&self) -> &str;

    /// The query string for `page`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidParams`] when the filters cannot be
    /// serialized.
    fn query_for_page(&self, page: u32) -> Result<Vec<(String, String)>, ResourceError>;
}

/// A collection path plus filter parameters, paged with `page=N`.
///
/// ```rust
/// use shopify_admin::rest::{ListRequest, PagedRequest};
/// use shopify_admin::rest::resources::CustomerListParams;
///
/// let params = CustomerListParams { limit: Some(50), ..Default::default() };
/// let request = ListRequest::new("customers", params).unwrap();
///
/// assert_eq!(request.path(), "customers");
/// assert_eq!(
///     request.query_for_page(2).unwrap(),
///     vec![
///         ("limit".to_string(), "50".to_string()),
///         ("page".to_string(), "2".to_string()),
///     ]
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRequest {
    path: String,
    query: Vec<(String, String)>,
    initial_page: Option<u32>,
}

impl ListRequest {
    /// Creates a request for `path` with `params` serialized as filters.
    ///
    /// A `page` field in `params` is ignored; the collection supplies it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidParams`] when `params` does not
    /// serialize to an object.
    pub fn new<P: serde::Serialize>(path: impl Into<String>, params: P) -> Result<Self, ResourceError> {
        let mut query = serialize_to_query(&params)?;
        query.retain(|(key, _)| key != "page");
        Ok(Self {
            path: path.into(),
            query,
            initial_page: None,
        })
    }

    /// Starts after `page` instead of page 0.
    #[must_use]
    pub const fn starting_after(mut self, page: u32) -> Self {
        self.initial_page = Some(page);
        self
    }

    /// Returns the filter parameters, without `page`.
    #[must_use]
    pub fn filters(&self) -> &[(String, String)] {
        &self.query
    }
}

impl PagedRequest for ListRequest {
    fn initial_page(&self) -> Option<u32> {
        self.initial_page
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn query_for_page(&self, page: u32) -> Result<Vec<(String, String)>, ResourceError> {
        let mut query = self.query.clone();
        query.push(("page".to_string(), page.to_string()));
        Ok(query)
    }
}
