//! YAML export

use gather_wiki::Collection;

/// Same data as the JSON export, as a YAML sequence.
pub fn render(collections: &[Collection]) -> String {
    serde_yaml::to_string(collections).expect("collections always serialize to YAML")
}
