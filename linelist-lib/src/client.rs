//! Main LinelistClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::error::BackendErrorDetail;
use crate::error::Error;
use crate::query::Page;
use crate::query::RequestQuery;

/// The main client for a linelist REST backend.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely. Resources are addressed by their collection path
/// relative to the base URL, e.g. `"cases"` or `"outbreaks/123/contacts"`.
///
/// # Example
///
/// ```ignore
/// use linelist_lib::LinelistClient;
/// use linelist_lib::query::RequestQuery;
///
/// let client = LinelistClient::builder()
///     .url("https://linelist.example.org/api")
///     .access_token("my-token")
///     .build();
///
/// let mut query = RequestQuery::new();
/// query.filter_mut().by_equality("classification", "CONFIRMED");
/// let cases = client.list("cases", &query).await?;
/// ```
#[derive(Clone)]
pub struct LinelistClient {
    inner: Arc<LinelistClientInner>,
}

struct LinelistClientInner {
    base_url: String,
    access_token: Option<String>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl LinelistClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> LinelistClientBuilder<Missing> {
        LinelistClientBuilder::new()
    }

    /// Lists records of a resource matching a query.
    ///
    /// The query serializes into a `filter` query-string parameter on
    /// `GET {base}/{resource}`; an empty query sends no parameter.
    pub async fn list(
        &self,
        resource: &str,
        query: &RequestQuery,
    ) -> Result<Vec<serde_json::Value>, Error> {
        let mut url = self.endpoint(resource)?;
        let envelope = query.build();
        if envelope.as_object().is_some_and(|object| !object.is_empty()) {
            url.query_pairs_mut()
                .append_pair("filter", &envelope.to_string());
        }
        debug!(%url, "listing records");

        let request = self.prepare(self.inner.http_client.get(url.as_str()));
        let response = request.send().await.map_err(ApiError::from)?;
        read_records(response).await
    }

    /// Lists records of a resource, carrying the filter in the request body.
    ///
    /// For queries too large for a URL: posts `{"filter": ...}` to
    /// `POST {base}/{resource}/filter`.
    pub async fn list_via_post(
        &self,
        resource: &str,
        query: &RequestQuery,
    ) -> Result<Vec<serde_json::Value>, Error> {
        let url = self.endpoint(&format!("{resource}/filter"))?;
        debug!(%url, "listing records via POST");

        let body = serde_json::json!({ "filter": query.build() });
        let request = self.prepare(self.inner.http_client.post(url.as_str()).json(&body));
        let response = request.send().await.map_err(ApiError::from)?;
        read_records(response).await
    }

    /// Counts records of a resource matching a query.
    ///
    /// Only the condition tree participates: `GET {base}/{resource}/count`
    /// takes a bare `where` parameter rather than a filter envelope.
    pub async fn count(&self, resource: &str, query: &RequestQuery) -> Result<u64, Error> {
        let mut url = self.endpoint(&format!("{resource}/count"))?;
        let where_clause = query.build_where();
        if where_clause.as_object().is_some_and(|object| !object.is_empty()) {
            url.query_pairs_mut()
                .append_pair("where", &where_clause.to_string());
        }
        debug!(%url, "counting records");

        let request = self.prepare(self.inner.http_client.get(url.as_str()));
        let response = request.send().await.map_err(ApiError::from)?;

        if response.status().is_success() {
            let body = response.text().await.map_err(ApiError::from)?;
            let count: CountResponse = serde_json::from_str(&body)
                .map_err(|e| ApiError::parse_with_body(e.to_string(), body))?;
            Ok(count.count)
        } else {
            Err(Error::Api(error_from_response(response).await))
        }
    }

    /// Returns the first record matching a query, if any.
    pub async fn first(
        &self,
        resource: &str,
        query: &RequestQuery,
    ) -> Result<Option<serde_json::Value>, Error> {
        let mut query = query.clone();
        query.limit(1);
        let records = self.list(resource, &query).await?;
        Ok(records.into_iter().next())
    }

    /// Returns an async iterator over a query's results, one page at a time.
    ///
    /// The query's own skip, if set, positions the first page; its limit is
    /// replaced by `page_size` on every request.
    pub fn pages(
        &self,
        resource: impl Into<String>,
        query: &RequestQuery,
        page_size: u64,
    ) -> ListPages<'_> {
        ListPages::new(self, resource.into(), query.clone(), page_size)
    }

    /// Returns the base URL of the backend.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn endpoint(&self, resource: &str) -> Result<url::Url, ApiError> {
        let raw = format!(
            "{}/{}",
            self.inner.base_url.trim_end_matches('/'),
            resource.trim_start_matches('/')
        );
        url::Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
    }

    fn prepare(&self, mut request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.inner.access_token {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        request
    }
}

async fn read_records(response: reqwest::Response) -> Result<Vec<serde_json::Value>, Error> {
    if response.status().is_success() {
        let records = response.json().await.map_err(ApiError::from)?;
        Ok(records)
    } else {
        Err(Error::Api(error_from_response(response).await))
    }
}

async fn error_from_response(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: BackendErrorDetail,
    }

    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => {
            ApiError::http_with_detail(status, envelope.error.message.clone(), envelope.error)
        }
        Err(_) => ApiError::http(status, body),
    }
}

/// Response from a count endpoint.
#[derive(Debug, Clone, Deserialize)]
struct CountResponse {
    count: u64,
}

// =============================================================================
// Page iteration
// =============================================================================

/// Async iterator that yields pages of list results.
///
/// Advances a skip/limit window over the resource until the backend returns
/// a short page.
///
/// # Example
///
/// ```ignore
/// let mut pages = client.pages("cases", &query, 50);
///
/// while let Some(page) = pages.next().await {
///     let page = page?;
///     for record in page.records() {
///         println!("{record:?}");
///     }
/// }
/// ```
pub struct ListPages<'a> {
    /// Reference to the client for making requests.
    client: &'a LinelistClient,
    /// Resource collection being listed.
    resource: String,
    /// Query template; its pagination is overwritten per page.
    query: RequestQuery,
    /// Records per page.
    page_size: u64,
    /// Offset of the next page to fetch.
    offset: u64,
    /// Whether we've exhausted all pages.
    done: bool,
    /// Whether any page has been yielded yet.
    yielded_any: bool,
}

impl<'a> ListPages<'a> {
    pub(crate) fn new(
        client: &'a LinelistClient,
        resource: String,
        query: RequestQuery,
        page_size: u64,
    ) -> Self {
        let offset = query.paginator().skip_value().unwrap_or(0);
        Self {
            client,
            resource,
            query,
            page_size: page_size.max(1),
            offset,
            done: false,
            yielded_any: false,
        }
    }

    /// Fetches the next page of results.
    ///
    /// Returns `None` when all pages have been consumed. A failed request
    /// yields its error and ends the iteration.
    pub async fn next(&mut self) -> Option<Result<Page, Error>> {
        if self.done {
            return None;
        }

        let mut query = self.query.clone();
        query.limit(self.page_size).skip(self.offset);

        match self.client.list(&self.resource, &query).await {
            Ok(records) => self.accept(records).map(Ok),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    /// Applies the window rules to a fetched batch and advances the offset.
    fn accept(&mut self, records: Vec<serde_json::Value>) -> Option<Page> {
        let fetched = records.len() as u64;
        if fetched < self.page_size {
            self.done = true;
        }
        // An empty trailing page is not worth yielding; an empty first page
        // is, so callers observe the empty result.
        if records.is_empty() && self.yielded_any {
            return None;
        }

        let page = Page::new(records, self.offset);
        self.offset += fetched;
        self.yielded_any = true;
        Some(page)
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`LinelistClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The backend base URL, including any API prefix
///
/// # Example
///
/// ```ignore
/// let client = LinelistClient::builder()
///     .url("https://linelist.example.org/api")
///     .access_token(token)
///     .timeout(Duration::from_secs(30))
///     .build();
/// ```
pub struct LinelistClientBuilder<Url> {
    url: Url,
    access_token: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl LinelistClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            access_token: None,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the backend base URL.
    ///
    /// # Example
    ///
    /// ```ignore
    /// .url("https://linelist.example.org/api")
    /// ```
    pub fn url(self, url: impl Into<String>) -> LinelistClientBuilder<Set<String>> {
        LinelistClientBuilder {
            url: Set(url.into()),
            access_token: self.access_token,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for LinelistClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> LinelistClientBuilder<U> {
    /// Sets the bearer token sent with every request.
    ///
    /// Without one, requests are sent unauthenticated.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl LinelistClientBuilder<Set<String>> {
    /// Builds the [`LinelistClient`].
    ///
    /// This method is only available once `url` has been set.
    pub fn build(self) -> LinelistClient {
        let http_client = self.http_client.unwrap_or_else(|| {
            let mut builder = Client::builder();
            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            builder.build().expect("Failed to build HTTP client")
        });

        LinelistClient {
            inner: Arc::new(LinelistClientInner {
                base_url: self.url.0,
                access_token: self.access_token,
                http_client,
                timeout: self.timeout,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> LinelistClient {
        LinelistClient::builder()
            .url("https://linelist.example.org/api/")
            .access_token("secret")
            .build()
    }

    #[test]
    fn test_endpoint_joins_without_double_slashes() {
        let url = client().endpoint("/cases").unwrap();
        assert_eq!(url.as_str(), "https://linelist.example.org/api/cases");
    }

    #[test]
    fn test_endpoint_rejects_invalid_base() {
        let client = LinelistClient::builder().url("not a url").build();
        assert!(matches!(
            client.endpoint("cases"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_pages_starts_at_the_query_skip() {
        let client = client();
        let mut query = RequestQuery::new();
        query.skip(30);

        let pages = client.pages("cases", &query, 10);
        assert_eq!(pages.offset, 30);
        assert_eq!(pages.page_size, 10);
    }

    #[test]
    fn test_pages_clamps_page_size() {
        let client = client();
        let pages = client.pages("cases", &RequestQuery::new(), 0);
        assert_eq!(pages.page_size, 1);
    }

    #[test]
    fn test_pages_ends_after_a_short_page() {
        let client = client();
        let mut pages = client.pages("cases", &RequestQuery::new(), 2);

        let full = pages
            .accept(vec![json!({"id": 1}), json!({"id": 2})])
            .unwrap();
        assert_eq!(full.offset(), 0);
        assert_eq!(full.len(), 2);
        assert!(!pages.done);

        let short = pages.accept(vec![json!({"id": 3})]).unwrap();
        assert_eq!(short.offset(), 2);
        assert_eq!(short.len(), 1);
        assert!(pages.done);
    }

    #[test]
    fn test_pages_swallows_a_trailing_empty_page() {
        let client = client();
        let mut pages = client.pages("cases", &RequestQuery::new(), 1);

        assert!(pages.accept(vec![json!({"id": 1})]).is_some());
        assert!(pages.accept(Vec::new()).is_none());
        assert!(pages.done);
    }

    #[test]
    fn test_pages_yields_an_empty_first_page() {
        let client = client();
        let mut pages = client.pages("cases", &RequestQuery::new(), 5);

        let page = pages.accept(Vec::new()).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.offset(), 0);
        assert!(pages.done);
    }
}
