//! Gather Core - Common infrastructure for collection export
//!
//! Shared HTTP client and runtime, the fetch error taxonomy, logging,
//! progress display and run cancellation.

pub mod cancel;
pub mod error;
pub mod http;
pub mod logging;
pub mod progress;

// Re-exports for convenience
pub use cancel::RunToken;
pub use error::FetchError;
pub use http::{HttpConfig, SHARED_RUNTIME, USER_AGENT, http_client, http_config, set_http_config};
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, SharedProgress, StageLine, fmt_num};
