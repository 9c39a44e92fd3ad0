//! Lazy iteration over paged collection endpoints.
//!
//! [`PagedCollection`] asks a [`PagedRequest`] for one page at a time,
//! decodes it with a [`Transformer`] and hands out the items in server order.
//! The first empty page ends the sequence.
//!
//! # Page Spacing
//!
//! After every page request the collection waits
//! [`ShopifyConfig::page_delay`](crate::ShopifyConfig::page_delay) (500 ms by
//! default) before decoding, so successive requests are at least that far
//! apart. Pages are never prefetched.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::rest::resources::{Customer, CustomerListParams};
//!
//! let mut customers = Customer::list(&client, CustomerListParams::default())?;
//! while let Some(customer) = customers.next().await {
//!     let customer = customer?;
//!     println!("{:?} {:?}", customers.key(), customer.email);
//! }
//! ```

use std::time::Duration;

use futures::Stream;
use tokio_util::sync::CancellationToken;

use crate::clients::{ApiCallLimit, HttpResponse, RestClient};
use crate::rest::{PagedRequest, Resource, ResourceError, Transformer};

/// Where the collection is in its lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Uninitialized,
    Active,
    Exhausted,
    Failed,
}

// `page_index` indexes `page_results` while the state is `Active`.
#[derive(Debug)]
struct Cursor<T> {
    page: u32,
    page_index: usize,
    page_results: Vec<T>,
    overall_index: usize,
}

impl<T> Cursor<T> {
    const fn new(page: u32) -> Self {
        Self {
            page,
            page_index: 0,
            page_results: Vec::new(),
            overall_index: 0,
        }
    }
}

fn resource_key<T: Resource>(item: &T) -> Option<String> {
    item.get_id().map(|id| id.to_string())
}

/// A forward-only, finite sequence of `T` read page by page.
///
/// Iteration starts at the page after
/// [`PagedRequest::initial_page`] (page 1 by default). A transport or decode
/// failure ends the collection; create a new one to start over.
pub struct PagedCollection<'a, T, R, X> {
    client: &'a RestClient,
    request: R,
    transformer: X,
    resource: &'static str,
    key_fn: fn(&T) -> Option<String>,
    delay: Duration,
    cancel: Option<CancellationToken>,
    state: State,
    cursor: Cursor<T>,
    pages_fetched: u32,
    last_call_limit: Option<ApiCallLimit>,
}

impl<'a, T, R, X> PagedCollection<'a, T, R, X>
where
    T: Resource,
    R: PagedRequest,
    X: Transformer<Output = Vec<T>>,
{
    /// Creates a collection keyed by each item's id.
    ///
    /// Nothing is fetched until the first [`next`](Self::next) or
    /// [`advance`](Self::advance).
    #[must_use]
    pub fn new(client: &'a RestClient, request: R, transformer: X) -> Self {
        Self {
            client,
            request,
            transformer,
            resource: T::NAME,
            key_fn: resource_key::<T>,
            delay: client.page_delay(),
            cancel: None,
            state: State::Uninitialized,
            cursor: Cursor::new(0),
            pages_fetched: 0,
            last_call_limit: None,
        }
    }
}

impl<'a, T, R, X> PagedCollection<'a, T, R, X>
where
    R: PagedRequest,
    X: Transformer<Output = Vec<T>>,
{
    /// Replaces the function that derives [`key`](Self::key) from an item.
    #[must_use]
    pub fn with_key_fn(mut self, key_fn: fn(&T) -> Option<String>) -> Self {
        self.key_fn = key_fn;
        self
    }

    /// Overrides the delay observed after each page request.
    #[must_use]
    pub const fn with_page_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Aborts pending page requests when `token` is cancelled.
    ///
    /// A cancelled fetch yields [`ResourceError::Cancelled`] and ends the
    /// collection.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Returns `true` while [`current`](Self::current) holds an item.
    #[must_use]
    pub fn valid(&self) -> bool {
        self.state == State::Active
    }

    /// Returns the item under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        if self.valid() {
            self.cursor.page_results.get(self.cursor.page_index)
        } else {
            None
        }
    }

    /// Returns the key of the current item.
    #[must_use]
    pub fn key(&self) -> Option<String> {
        self.current().and_then(self.key_fn)
    }

    /// Zero-based index of the current item across all pages.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.valid().then_some(self.cursor.overall_index)
    }

    /// The page the current item came from, 0 before the first fetch.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.cursor.page
    }

    /// Number of page requests issued so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// The call limit reported by the latest page response.
    #[must_use]
    pub const fn last_call_limit(&self) -> Option<ApiCallLimit> {
        self.last_call_limit
    }

    /// Moves the cursor to the next item, fetching a page when the buffer is
    /// used up. The first call fetches the first page.
    ///
    /// Returns whether an item is now current. Once this returns `false` or an
    /// error, it keeps returning `false`.
    ///
    /// # Errors
    ///
    /// The error of the page request or of decoding it.
    pub async fn advance(&mut self) -> Result<bool, ResourceError> {
        match self.state {
            State::Exhausted | State::Failed => return Ok(false),
            State::Uninitialized => {
                self.cursor = Cursor::new(self.request.initial_page().unwrap_or(0));
                return self.fetch_next_page().await;
            }
            State::Active => {}
        }

        if self.cursor.page_index + 1 < self.cursor.page_results.len() {
            self.cursor.page_index += 1;
            self.cursor.overall_index += 1;
            return Ok(true);
        }

        self.fetch_next_page().await
    }

    async fn fetch_next_page(&mut self) -> Result<bool, ResourceError> {
        let Some(page) = self.cursor.page.checked_add(1) else {
            self.state = State::Exhausted;
            return Ok(false);
        };

        match self.load_page(page).await {
            Ok(items) if items.is_empty() => {
                self.state = State::Exhausted;
                self.cursor.page = page;
                self.cursor.page_results = Vec::new();
                Ok(false)
            }
            Ok(items) => {
                if self.state == State::Active {
                    self.cursor.overall_index += 1;
                }
                self.state = State::Active;
                self.cursor.page = page;
                self.cursor.page_index = 0;
                self.cursor.page_results = items;
                Ok(true)
            }
            Err(error) => {
                self.state = State::Failed;
                self.cursor.page_results = Vec::new();
                Err(error)
            }
        }
    }

    async fn load_page(&mut self, page: u32) -> Result<Vec<T>, ResourceError> {
        let query = self.request.query_for_page(page)?;

        tracing::debug!(
            resource = self.resource,
            path = self.request.path(),
            page,
            "Fetching page"
        );

        let response = match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => return Err(ResourceError::Cancelled),
                result = self.request_page(&query) => result?,
            },
            None => self.request_page(&query).await?,
        };
        self.pages_fetched += 1;
        self.last_call_limit = response.api_call_limit;

        let items = self.transformer.transform(&response)?;
        tracing::debug!(
            resource = self.resource,
            page,
            items = items.len(),
            "Fetched page"
        );
        Ok(items)
    }

    async fn request_page(&self, query: &[(String, String)]) -> Result<HttpResponse, ResourceError> {
        let response = self
            .client
            .get(self.request.path(), query)
            .await
            .map_err(ResourceError::from)?;
        tokio::time::sleep(self.delay).await;
        Ok(response)
    }
}

impl<'a, T, R, X> PagedCollection<'a, T, R, X>
where
    T: Clone,
    R: PagedRequest,
    X: Transformer<Output = Vec<T>>,
{
    /// Advances and returns the new current item.
    ///
    /// Returns `None` once the collection is exhausted or after an error has
    /// been returned.
    pub async fn next(&mut self) -> Option<Result<T, ResourceError>> {
        match self.advance().await {
            Ok(true) => self.current().cloned().map(Ok),
            Ok(false) => None,
            Err(error) => Some(Err(error)),
        }
    }

    /// Reads every remaining item.
    ///
    /// # Errors
    ///
    /// The first page error; items read before it are dropped.
    pub async fn collect_all(mut self) -> Result<Vec<T>, ResourceError> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item?);
        }
        Ok(items)
    }

    /// Turns the collection into a [`Stream`] with the same ordering and
    /// page spacing.
    pub fn into_stream(self) -> impl Stream<Item = Result<T, ResourceError>> + 'a
    where
        T: 'a,
        R: 'a,
        X: 'a,
    {
        futures::stream::unfold(self, |mut collection| async move {
            collection.next().await.map(|item| (item, collection))
        })
    }
}

impl<T, R: std::fmt::Debug, X> std::fmt::Debug for PagedCollection<'_, T, R, X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedCollection")
            .field("request", &self.request)
            .field("resource", &self.resource)
            .field("state", &self.state)
            .field("page", &self.cursor.page)
            .field("page_index", &self.cursor.page_index)
            .field("buffered", &self.cursor.page_results.len())
            .field("overall_index", &self.cursor.overall_index)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Scopes, Session};
    use crate::config::{ApiKey, ApiSecretKey, HostUrl, ShopDomain, ShopifyConfig};
    use crate::rest::{CollectionTransformer, ListRequest};
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Clone, Debug, Deserialize, PartialEq)]
    struct Item {
        id: u64,
    }

    impl Resource for Item {
        type Id = u64;
        const NAME: &'static str = "Item";
        const KEY: &'static str = "item";
        const PLURAL: &'static str = "items";

        fn get_id(&self) -> Option<u64> {
            Some(self.id)
        }
    }

    fn client(server: &MockServer) -> RestClient {
        let config = ShopifyConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret_key(ApiSecretKey::new("secret").unwrap())
            .api_host(HostUrl::new(server.uri()).unwrap())
            .page_delay(Duration::ZERO)
            .build()
            .unwrap();
        let session = Session::new(ShopDomain::new("test-shop").unwrap(), "token", Scopes::new());
        RestClient::new(&session, &config)
    }

    async fn mount_page(server: &MockServer, page: &str, ids: &[u64]) {
        let items: Vec<_> = ids.iter().map(|id| json!({ "id": id })).collect();
        Mock::given(method("GET"))
            .and(path("/admin/api/2025-10/items.json"))
            .and(query_param("page", page))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
            .expect(1)
            .mount(server)
            .await;
    }

    fn collection(
        client: &RestClient,
    ) -> PagedCollection<'_, Item, ListRequest, CollectionTransformer<Item>> {
        PagedCollection::new(
            client,
            ListRequest::new("items", ()).unwrap(),
            CollectionTransformer::new(),
        )
    }

    #[tokio::test]
    async fn test_cursor_walks_across_pages() {
        let server = MockServer::start().await;
        mount_page(&server, "1", &[1, 2]).await;
        mount_page(&server, "2", &[3]).await;
        mount_page(&server, "3", &[]).await;
        let client = client(&server);

        let mut items = collection(&client);
        assert!(!items.valid());
        assert_eq!(items.current(), None);

        assert!(items.advance().await.unwrap());
        assert_eq!(items.key().as_deref(), Some("1"));
        assert_eq!(items.position(), Some(0));
        assert_eq!(items.page(), 1);

        assert!(items.advance().await.unwrap());
        assert_eq!(items.key().as_deref(), Some("2"));

        assert!(items.advance().await.unwrap());
        assert_eq!(items.current(), Some(&Item { id: 3 }));
        assert_eq!(items.position(), Some(2));
        assert_eq!(items.page(), 2);

        assert!(!items.advance().await.unwrap());
        assert!(!items.valid());
        assert_eq!(items.pages_fetched(), 3);

        // Exhausted collections do not fetch again.
        assert!(!items.advance().await.unwrap());
        assert_eq!(items.pages_fetched(), 3);
    }

    #[tokio::test]
    async fn test_initial_page_offsets_first_fetch() {
        let server = MockServer::start().await;
        mount_page(&server, "5", &[9]).await;
        mount_page(&server, "6", &[]).await;
        let client = client(&server);

        let items = PagedCollection::new(
            &client,
            ListRequest::new("items", ()).unwrap().starting_after(4),
            CollectionTransformer::<Item>::new(),
        );
        let all = items.collect_all().await.unwrap();
        assert_eq!(all, vec![Item { id: 9 }]);
    }

    #[tokio::test]
    async fn test_custom_key_fn() {
        let server = MockServer::start().await;
        mount_page(&server, "1", &[4]).await;
        let client = client(&server);

        let mut items = collection(&client).with_key_fn(|item| Some(format!("item-{}", item.id)));
        assert!(items.advance().await.unwrap());
        assert_eq!(items.key().as_deref(), Some("item-4"));
    }

    #[tokio::test]
    async fn test_failure_ends_collection() {
        let server = MockServer::start().await;
        mount_page(&server, "1", &[1]).await;
        Mock::given(method("GET"))
            .and(path("/admin/api/2025-10/items.json"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;
        let client = client(&server);

        let mut items = collection(&client);
        assert_eq!(items.next().await.unwrap().unwrap(), Item { id: 1 });

        let error = items.next().await.unwrap().unwrap_err();
        assert!(matches!(error, ResourceError::Rest(_)));
        assert!(!items.valid());
        assert!(items.next().await.is_none());
    }

    #[tokio::test]
    async fn test_cancelled_before_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .expect(0)
            .mount(&server)
            .await;
        let client = client(&server);

        let token = CancellationToken::new();
        token.cancel();

        let mut items = collection(&client).with_cancellation(token);
        assert!(matches!(
            items.next().await,
            Some(Err(ResourceError::Cancelled))
        ));
        assert!(items.next().await.is_none());
    }
}
