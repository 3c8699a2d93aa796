//! Two-tier aggregation: a user's collections, then each collection's pages.
//!
//! Collections are processed strictly one after another so that at most one
//! request is in flight and progress messages come out in collection order.

use gather_core::{FetchError, RunToken};

use crate::api::WikiApi;
use crate::paginate::fetch_all;
use crate::schema::{Collection, Page};

/// Progress notification emitted while a run advances
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    FetchingCollections { user: String, domain: String },
    CollectionsFound { user: String, count: usize },
    /// `index` is 1-based
    FetchingPages {
        index: usize,
        total: usize,
        label: String,
    },
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FetchingCollections { user, domain } => {
                write!(f, "Fetching user {user} lists from {domain}")
            }
            Self::CollectionsFound { user, count } => {
                write!(f, "Received {count} lists for {user}")
            }
            Self::FetchingPages {
                index,
                total,
                label,
            } => write!(f, "List {index} of {total}. Fetching {label}"),
        }
    }
}

/// Runs aggregations against one wiki
pub struct Aggregator<A> {
    api: A,
}

impl<A: WikiApi> Aggregator<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// All collections of `user`, without member pages.
    pub async fn list_collections(
        &self,
        user: &str,
        token: &RunToken,
    ) -> Result<Vec<Collection>, FetchError> {
        let api = &self.api;
        fetch_all(|cont| {
            let cancelled = token.is_cancelled();
            async move {
                if cancelled {
                    return Err(FetchError::Cancelled);
                }
                api.list_collections(user, cont).await
            }
        })
        .await
    }

    /// All member pages of one collection, in upstream order.
    pub async fn collection_pages(&self, id: u64, token: &RunToken) -> Result<Vec<Page>, FetchError> {
        let api = &self.api;
        fetch_all(|cont| {
            let cancelled = token.is_cancelled();
            async move {
                if cancelled {
                    return Err(FetchError::Cancelled);
                }
                api.list_pages(id, cont).await
            }
        })
        .await
    }

    /// Full aggregation run.
    ///
    /// Emits progress through `on_progress` and returns every collection with
    /// its pages attached. The first error at either tier ends the run.
    pub async fn run(
        &self,
        user: &str,
        token: &RunToken,
        mut on_progress: impl FnMut(Progress) + Send,
    ) -> Result<Vec<Collection>, FetchError> {
        on_progress(Progress::FetchingCollections {
            user: user.to_string(),
            domain: self.api.domain().to_string(),
        });

        let mut collections = self.list_collections(user, token).await?;
        log::info!("{user}: {} collections", collections.len());
        on_progress(Progress::CollectionsFound {
            user: user.to_string(),
            count: collections.len(),
        });

        let total = collections.len();
        for (i, collection) in collections.iter_mut().enumerate() {
            on_progress(Progress::FetchingPages {
                index: i + 1,
                total,
                label: collection.label.clone(),
            });
            let pages = self.collection_pages(collection.id, token).await?;
            if (pages.len() as u64) < collection.count {
                log::warn!(
                    "{}: wiki reports {} pages, received {}",
                    collection.label,
                    collection.count,
                    pages.len()
                );
            }
            collection.pages = pages;
        }

        Ok(collections)
    }
}
