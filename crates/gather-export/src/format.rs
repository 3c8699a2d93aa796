//! Export formats and their canonical file names

use std::collections::BTreeMap;

use gather_wiki::Collection;

use crate::context::ExportContext;
use crate::{html, json, wikitext, yaml};

/// One of the four bundle formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Format {
    Json,
    Yaml,
    Html,
    Wikitext,
}

impl Format {
    pub const ALL: [Format; 4] = [Self::Json, Self::Yaml, Self::Html, Self::Wikitext];

    /// Name of this format's entry inside the archive
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Json => "collections.json",
            Self::Yaml => "collections.yaml",
            Self::Html => "collections.html",
            Self::Wikitext => "collections.mediawiki",
        }
    }

    pub fn render(self, collections: &[Collection], ctx: &ExportContext) -> String {
        match self {
            Self::Json => json::render(collections),
            Self::Yaml => yaml::render(collections),
            Self::Html => html::render(collections, ctx),
            Self::Wikitext => wikitext::render(collections, ctx),
        }
    }
}

/// Every format rendered, keyed by archive file name
pub fn render_all(collections: &[Collection], ctx: &ExportContext) -> BTreeMap<String, String> {
    Format::ALL
        .iter()
        .map(|f| (f.file_name().to_string(), f.render(collections, ctx)))
        .collect()
}
