//! Structured export: pretty-printed JSON

use gather_wiki::Collection;

/// Two-space indented JSON array, keys in declaration order.
pub fn render(collections: &[Collection]) -> String {
    serde_json::to_string_pretty(collections).expect("collections always serialize to JSON")
}
