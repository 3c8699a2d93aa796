//! HTML export: one standalone document, one section per collection

use std::fmt::Write;

use gather_wiki::Collection;

use crate::context::{ExportContext, format_date};

/// Escape text for element content and double-quoted attributes
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_image(out: &mut String, c: &Collection) {
    let Some(url) = c.imageurl.as_deref().filter(|u| !u.is_empty()) else {
        return;
    };
    let _ = write!(out, "<img src=\"{}\" alt=\"{}\"", escape(url), escape(&c.label));
    if let Some(w) = c.imagewidth {
        let _ = write!(out, " width=\"{w}\"");
    }
    if let Some(h) = c.imageheight {
        let _ = write!(out, " height=\"{h}\"");
    }
    out.push_str(">\n");
}

fn write_collection(out: &mut String, c: &Collection, ctx: &ExportContext) {
    out.push_str("<section>\n");
    let _ = writeln!(out, "<h2>{}</h2>", escape(&c.label));
    write_image(out, c);
    let _ = writeln!(
        out,
        "<p>{}</p>",
        escape(c.description.as_deref().unwrap_or_default())
    );
    let _ = writeln!(
        out,
        "<p>Last updated: {}</p>",
        format_date(c.updated_date())
    );
    out.push_str("<ul>\n");
    for page in &c.pages {
        let _ = writeln!(
            out,
            "<li><a href=\"{}\">{}</a></li>",
            escape(&ctx.article_url(&page.title)),
            escape(&page.title)
        );
    }
    out.push_str("</ul>\n</section>\n");
}

/// Render all collections as a single HTML document.
pub fn render(collections: &[Collection], ctx: &ExportContext) -> String {
    let title = escape(&format!("Collections of {} on {}", ctx.user, ctx.domain));
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{title}</title>");
    out.push_str("</head>\n<body>\n");
    let _ = writeln!(out, "<h1>{title}</h1>");
    for c in collections {
        write_collection(&mut out, c, ctx);
    }
    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gather_wiki::{Page, Timestamp};

    fn ctx() -> ExportContext {
        ExportContext::new("Alice", "en.wikipedia.org")
    }

    fn birds() -> Collection {
        let mut c = Collection::new(1, "Birds");
        c.description = Some(String::new());
        c.count = 2;
        c.updated = Some(Timestamp::Epoch(1000));
        c.pages = vec![Page::new("Robin"), Page::new("Owl")];
        c
    }

    #[test]
    fn title_names_user_and_domain() {
        let out = render(&[], &ctx());
        assert!(out.contains("<title>Collections of Alice on en.wikipedia.org</title>"));
        assert!(out.contains("<h1>Collections of Alice on en.wikipedia.org</h1>"));
    }

    #[test]
    fn section_with_links_and_date() {
        let out = render(&[birds()], &ctx());
        assert!(out.contains("<h2>Birds</h2>"));
        assert!(out.contains("<p>Last updated: 1970-01-01</p>"));
        assert!(out.contains(
            "<li><a href=\"https://en.wikipedia.org/wiki/Robin\">Robin</a></li>\n\
             <li><a href=\"https://en.wikipedia.org/wiki/Owl\">Owl</a></li>"
        ));
    }

    #[test]
    fn empty_collection_renders_empty_list() {
        let out = render(&[Collection::new(3, "Nothing yet")], &ctx());
        assert!(out.contains("<ul>\n</ul>"));
        assert!(!out.contains("<li>"));
    }

    #[test]
    fn missing_optionals_degrade_to_empty() {
        let out = render(&[Collection::new(3, "Bare")], &ctx());
        assert!(!out.contains("<img"));
        assert!(out.contains("<p></p>"));
        assert!(out.contains("<p>Last updated: </p>"));
        assert!(!out.contains("None"));
        assert!(!out.contains("null"));
    }

    #[test]
    fn image_from_url() {
        let mut c = birds();
        c.image = Some("Robin.jpg".to_string());
        c.imageurl = Some("https://upload.wikimedia.org/Robin.jpg".to_string());
        c.imagewidth = Some(320);
        let out = render(&[c], &ctx());
        assert!(out.contains(
            "<img src=\"https://upload.wikimedia.org/Robin.jpg\" alt=\"Birds\" width=\"320\">"
        ));
    }

    #[test]
    fn text_is_escaped() {
        let mut c = Collection::new(4, "<script>");
        c.description = Some("Tom & \"Jerry\"".to_string());
        c.pages = vec![Page::new("A&B")];
        let out = render(&[c], &ctx());
        assert!(out.contains("<h2>&lt;script&gt;</h2>"));
        assert!(out.contains("<p>Tom &amp; &quot;Jerry&quot;</p>"));
        assert!(out.contains("href=\"https://en.wikipedia.org/wiki/A%26B\">A&amp;B</a>"));
    }
}
