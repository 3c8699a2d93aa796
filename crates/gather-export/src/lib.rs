//! Gather Export - serialize aggregated collections
//!
//! Four exporters (JSON, YAML, HTML, wikitext) and a zip packager that
//! bundles their outputs under fixed file names. Exporters are pure and
//! never fail; missing optional fields render as empty text.

pub mod bundle;
pub mod context;
pub mod format;
pub mod html;
pub mod json;
pub mod wikitext;
pub mod yaml;

// Re-exports
pub use bundle::{ARCHIVE_NAME, build_bundle, package, save};
pub use context::ExportContext;
pub use format::{Format, render_all};
