//! Continuation-following pagination
//!
//! A query is walked by calling a request function with the cursor from the
//! previous response until a response carries no `continue` object.

use std::collections::BTreeMap;
use std::future::Future;

use futures_util::{Stream, TryStreamExt};
use gather_core::FetchError;

/// Opaque continuation cursor.
///
/// Holds every field of the response's `continue` object so the next request
/// can echo them back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Continuation(BTreeMap<String, String>);

impl Continuation {
    /// Cursor with a single field, e.g. `lstcontinue=...`
    pub fn single(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(key.into(), value.into());
        Self(fields)
    }

    /// Read the `continue` object of a response.
    ///
    /// Returns `None` when the object is absent or empty (end of sequence).
    pub fn from_response(envelope: &serde_json::Value) -> Option<Self> {
        let object = envelope.get("continue")?.as_object()?;
        let fields: BTreeMap<String, String> = object
            .iter()
            .filter_map(|(k, v)| {
                let value = match v {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Number(n) => n.to_string(),
                    _ => return None,
                };
                Some((k.clone(), value))
            })
            .collect();
        (!fields.is_empty()).then_some(Self(fields))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Fields as request parameters
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// One response worth of items plus the cursor for the next request
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<T> {
    pub items: Vec<T>,
    pub next: Option<Continuation>,
}

impl<T> Batch<T> {
    /// Final batch (no continuation)
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }
}

/// Lazy stream of batches, one request per item.
///
/// The first request gets `None`. The stream ends after the first batch
/// without a continuation and stops at the first error. A response that hands
/// back the cursor it was called with is treated as malformed, since
/// following it would loop forever.
pub fn batches<T, F, Fut>(request: F) -> impl Stream<Item = Result<Batch<T>, FetchError>>
where
    F: FnMut(Option<Continuation>) -> Fut,
    Fut: Future<Output = Result<Batch<T>, FetchError>>,
{
    // None: finished. Some(None): first request. Some(Some(c)): continue from c.
    let start: Option<Option<Continuation>> = Some(None);
    futures_util::stream::try_unfold((request, start), |(mut request, cursor)| async move {
        let Some(cursor) = cursor else {
            return Ok(None);
        };
        let batch = request(cursor.clone()).await?;
        if cursor.is_some() && batch.next == cursor {
            return Err(FetchError::malformed("continuation cursor did not advance"));
        }
        let following = batch.next.clone().map(Some);
        Ok(Some((batch, (request, following))))
    })
}

/// Follow continuations to the end and concatenate all items in order.
///
/// Fails as a unit: any failed request discards everything fetched so far.
pub async fn fetch_all<T, F, Fut>(request: F) -> Result<Vec<T>, FetchError>
where
    F: FnMut(Option<Continuation>) -> Fut,
    Fut: Future<Output = Result<Batch<T>, FetchError>>,
{
    let mut stream = std::pin::pin!(batches(request));
    let mut items = Vec::new();
    let mut requests = 0usize;
    while let Some(batch) = stream.try_next().await? {
        requests += 1;
        items.extend(batch.items);
    }
    log::debug!("pagination done: {} items in {requests} requests", items.len());
    Ok(items)
}
