//! Gather API client: typed queries, envelope parsing, HTTP transport

use std::future::Future;

use gather_core::{FetchError, http_client};
use serde::de::DeserializeOwned;

use crate::config::WikiEndpoint;
use crate::paginate::{Batch, Continuation};
use crate::schema::{Collection, Page};

/// Properties requested for each collection
pub const LIST_PROPS: &[&str] = &[
    "label",
    "description",
    "public",
    "review",
    "image",
    "count",
    "updated",
    "owner",
];

/// Upper bound the API accepts for `lstlimit` / `lsplimit`
pub const MAX_PAGE_SIZE: u32 = 500;

/// Query parameters as ordered `(name, value)` pairs
pub type Params = Vec<(String, String)>;

fn base_params(list: &str) -> Params {
    vec![
        ("action".to_string(), "query".to_string()),
        ("list".to_string(), list.to_string()),
        ("format".to_string(), "json".to_string()),
        ("formatversion".to_string(), "2".to_string()),
    ]
}

/// Append continuation fields, or the empty `continue=` marker that opts
/// into the current continuation protocol on the first request.
fn push_continuation(params: &mut Params, cont: Option<&Continuation>) {
    let mut has_marker = false;
    if let Some(cont) = cont {
        for (k, v) in cont.params() {
            has_marker |= k == "continue";
            params.push((k.to_string(), v.to_string()));
        }
    }
    if !has_marker {
        params.push(("continue".to_string(), String::new()));
    }
}

/// `list=lists`: the collections owned by a user
#[derive(Debug, Clone)]
pub struct ListsQuery<'a> {
    pub owner: &'a str,
    pub limit: u32,
    pub cont: Option<&'a Continuation>,
}

impl ListsQuery<'_> {
    pub fn params(&self) -> Params {
        let mut params = base_params("lists");
        params.push(("lstowner".to_string(), self.owner.to_string()));
        params.push(("lstprop".to_string(), LIST_PROPS.join("|")));
        params.push(("lstlimit".to_string(), self.limit.to_string()));
        push_continuation(&mut params, self.cont);
        params
    }
}

/// `list=listpages`: the member pages of one collection
#[derive(Debug, Clone)]
pub struct ListPagesQuery<'a> {
    pub id: u64,
    pub limit: u32,
    pub cont: Option<&'a Continuation>,
}

impl ListPagesQuery<'_> {
    pub fn params(&self) -> Params {
        let mut params = base_params("listpages");
        params.push(("lspid".to_string(), self.id.to_string()));
        params.push(("lsplimit".to_string(), self.limit.to_string()));
        push_continuation(&mut params, self.cont);
        params
    }
}

/// Parse a query response body into a batch of `query.<list>` items.
pub fn parse_batch<T: DeserializeOwned>(body: &str, list: &str) -> Result<Batch<T>, FetchError> {
    let envelope: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| FetchError::malformed(format!("invalid JSON: {e}")))?;

    if let Some(error) = envelope.get("error") {
        let field = |name: &str| {
            error
                .get(name)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        return Err(FetchError::Api {
            code: field("code"),
            info: field("info"),
        });
    }
    if let Some(warnings) = envelope.get("warnings") {
        log::warn!("API warnings for {list}: {warnings}");
    }

    let raw = envelope
        .get("query")
        .and_then(|q| q.get(list))
        .ok_or_else(|| FetchError::malformed(format!("missing query.{list}")))?;
    let items: Vec<T> = serde_json::from_value(raw.clone())
        .map_err(|e| FetchError::malformed(format!("bad query.{list} entry: {e}")))?;

    Ok(Batch {
        items,
        next: Continuation::from_response(&envelope),
    })
}

/// Read-only access to a wiki's Gather lists.
///
/// One call is one request; pagination is driven by the caller.
pub trait WikiApi: Send + Sync {
    /// Domain used for progress messages and export links
    fn domain(&self) -> &str;

    fn list_collections(
        &self,
        owner: &str,
        cont: Option<Continuation>,
    ) -> impl Future<Output = Result<Batch<Collection>, FetchError>> + Send;

    fn list_pages(
        &self,
        id: u64,
        cont: Option<Continuation>,
    ) -> impl Future<Output = Result<Batch<Page>, FetchError>> + Send;
}

/// [`WikiApi`] over HTTP GET against `api.php`
#[derive(Debug, Clone)]
pub struct HttpWikiApi {
    endpoint: WikiEndpoint,
    page_size: u32,
    client: reqwest::Client,
}

impl HttpWikiApi {
    /// `page_size` is clamped to `1..=MAX_PAGE_SIZE`
    pub fn new(endpoint: WikiEndpoint, page_size: u32) -> Self {
        Self::with_client(endpoint, page_size, http_client().clone())
    }

    pub fn with_client(endpoint: WikiEndpoint, page_size: u32, client: reqwest::Client) -> Self {
        let clamped = page_size.clamp(1, MAX_PAGE_SIZE);
        if clamped != page_size {
            log::warn!("page size {page_size} out of range, using {clamped}");
        }
        Self {
            endpoint,
            page_size: clamped,
            client,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    async fn query<T: DeserializeOwned>(
        &self,
        params: &Params,
        list: &str,
    ) -> Result<Batch<T>, FetchError> {
        log::debug!("GET {} list={list}", self.endpoint.api_url);
        let body = self
            .client
            .get(&self.endpoint.api_url)
            .query(params)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(FetchError::from_reqwest)?
            .text()
            .await
            .map_err(FetchError::from_reqwest)?;
        parse_batch(&body, list)
    }
}

impl WikiApi for HttpWikiApi {
    fn domain(&self) -> &str {
        &self.endpoint.domain
    }

    async fn list_collections(
        &self,
        owner: &str,
        cont: Option<Continuation>,
    ) -> Result<Batch<Collection>, FetchError> {
        let params = ListsQuery {
            owner,
            limit: self.page_size,
            cont: cont.as_ref(),
        }
        .params();
        self.query(&params, "lists").await
    }

    async fn list_pages(
        &self,
        id: u64,
        cont: Option<Continuation>,
    ) -> Result<Batch<Page>, FetchError> {
        let params = ListPagesQuery {
            id,
            limit: self.page_size,
            cont: cont.as_ref(),
        }
        .params();
        self.query(&params, "listpages").await
    }
}
