//! In-memory `WikiApi` for aggregator and session tests

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use gather_core::FetchError;

use crate::api::WikiApi;
use crate::paginate::{Batch, Continuation};
use crate::schema::{Collection, Page};

/// Serves pre-split batches; the cursor is the index of the next batch.
#[derive(Default)]
pub(crate) struct FakeApi {
    pub collections: Vec<Vec<Collection>>,
    pub pages: HashMap<u64, Vec<Vec<Page>>>,
    pub fail_pages_of: Option<u64>,
    pub delay: Duration,
    /// "start:<what>" / "end:<what>" entries in call order
    pub log: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new(collections: Vec<Vec<Collection>>) -> Self {
        Self {
            collections,
            ..Default::default()
        }
    }

    pub fn with_pages(mut self, id: u64, batches: Vec<Vec<&str>>) -> Self {
        let batches = batches
            .into_iter()
            .map(|b| b.into_iter().map(Page::new).collect())
            .collect();
        self.pages.insert(id, batches);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }

    fn serve<T: Clone>(batches: &[Vec<T>], key: &str, cont: Option<Continuation>) -> Batch<T> {
        let idx: usize = cont
            .as_ref()
            .and_then(|c| c.get(key))
            .map_or(0, |s| s.parse().unwrap());
        let items = batches.get(idx).cloned().unwrap_or_default();
        let next = (idx + 1 < batches.len()).then(|| Continuation::single(key, (idx + 1).to_string()));
        Batch { items, next }
    }
}

impl WikiApi for FakeApi {
    fn domain(&self) -> &str {
        "en.wikipedia.org"
    }

    async fn list_collections(
        &self,
        owner: &str,
        cont: Option<Continuation>,
    ) -> Result<Batch<Collection>, FetchError> {
        self.record(format!("start:lists:{owner}"));
        tokio::time::sleep(self.delay).await;
        let batch = Self::serve(&self.collections, "lstcontinue", cont);
        self.record(format!("end:lists:{owner}"));
        Ok(batch)
    }

    async fn list_pages(
        &self,
        id: u64,
        cont: Option<Continuation>,
    ) -> Result<Batch<Page>, FetchError> {
        self.record(format!("start:pages:{id}"));
        tokio::time::sleep(self.delay).await;
        if self.fail_pages_of == Some(id) {
            self.record(format!("fail:pages:{id}"));
            return Err(FetchError::Transport {
                status: Some(500),
                message: "boom".to_string(),
            });
        }
        let batches = self.pages.get(&id).map(Vec::as_slice).unwrap_or_default();
        let batch = Self::serve(batches, "lspcontinue", cont);
        self.record(format!("end:pages:{id}"));
        Ok(batch)
    }
}
