//! Gather Wiki - collection aggregation from a Wikimedia wiki
//!
//! Fetches a user's Gather collections through the MediaWiki action API,
//! following continuations for both the collection list and each
//! collection's member pages.
//!
//! # Example
//!
//! ```ignore
//! use gather_wiki::{Aggregator, Config, HttpWikiApi, RunToken};
//!
//! let config = Config::new("en.wikipedia.org");
//! let aggregator = Aggregator::new(HttpWikiApi::new(config.endpoint, config.page_size));
//! let collections = aggregator
//!     .run("Alice", &RunToken::new(), |p| println!("{p}"))
//!     .await?;
//! ```

pub mod aggregate;
pub mod api;
pub mod config;
pub mod paginate;
pub mod schema;
pub mod session;

#[cfg(test)]
mod testing;

// Re-exports
pub use aggregate::{Aggregator, Progress};
pub use api::{HttpWikiApi, ListPagesQuery, ListsQuery, WikiApi};
pub use config::{Config, WikiEndpoint};
pub use gather_core::{FetchError, RunToken};
pub use paginate::{Batch, Continuation, batches, fetch_all};
pub use schema::{Collection, Page, Timestamp};
pub use session::{RunEvent, RunHandle, RunState, Session};
