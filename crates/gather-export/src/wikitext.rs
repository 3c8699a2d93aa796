//! Wiki markup export (MediaWiki dialect)

use std::borrow::Cow;
use std::fmt::Write;

use gather_wiki::Collection;

use crate::context::{ExportContext, format_date};

/// Wrap free text in `<nowiki>` when it would otherwise be parsed as markup
fn nowiki(s: &str) -> Cow<'_, str> {
    const MARKUP: &[char] = &['[', ']', '{', '}', '<', '>', '|', '=', '\'', '~'];
    let starts_line_markup = s
        .lines()
        .any(|l| l.starts_with(['*', '#', ':', ';', '-', ' ']));
    if starts_line_markup || s.contains(MARKUP) {
        Cow::Owned(format!("<nowiki>{}</nowiki>", s.replace("</nowiki>", "&lt;/nowiki>")))
    } else {
        Cow::Borrowed(s)
    }
}

fn write_collection(out: &mut String, c: &Collection, ctx: &ExportContext) {
    let _ = writeln!(out, "=={}==", nowiki(&c.label));
    if let Some(image) = c.image.as_deref().filter(|i| !i.is_empty()) {
        let name = image.strip_prefix("File:").unwrap_or(image);
        let _ = writeln!(out, "[[File:{name}|thumb]]");
    }
    let _ = writeln!(
        out,
        "{}",
        nowiki(c.description.as_deref().unwrap_or_default())
    );
    let _ = writeln!(out, "Last updated: {}", format_date(c.updated_date()));
    for page in &c.pages {
        let _ = writeln!(out, "* [{} {}]", ctx.article_url(&page.title), page.title);
    }
    out.push('\n');
}

/// Render all collections as one wikitext page.
pub fn render(collections: &[Collection], ctx: &ExportContext) -> String {
    let mut out = format!("=Collections of {} on {}=\n\n", ctx.user, ctx.domain);
    for c in collections {
        write_collection(&mut out, c, ctx);
    }
    out
}
