//! Caller-supplied context shared by the markup exporters

use chrono::NaiveDate;

/// Who and where the collections came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportContext {
    pub user: String,
    pub domain: String,
}

impl ExportContext {
    pub fn new(user: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            domain: domain.into(),
        }
    }

    /// Absolute article link: `https://{domain}/wiki/{title}`.
    ///
    /// Spaces become underscores (the wiki's canonical form), then the
    /// title is percent-encoded.
    pub fn article_url(&self, title: &str) -> String {
        let canonical = title.trim().replace(' ', "_");
        format!(
            "https://{}/wiki/{}",
            self.domain,
            urlencoding::encode(&canonical)
        )
    }
}

/// `YYYY-MM-DD`, empty when unknown
pub(crate) fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ExportContext {
        ExportContext::new("Alice", "en.wikipedia.org")
    }

    #[test]
    fn plain_title() {
        assert_eq!(ctx().article_url("Robin"), "https://en.wikipedia.org/wiki/Robin");
    }

    #[test]
    fn spaces_become_underscores() {
        assert_eq!(
            ctx().article_url("Barn owl"),
            "https://en.wikipedia.org/wiki/Barn_owl"
        );
    }

    #[test]
    fn special_characters_are_encoded() {
        assert_eq!(
            ctx().article_url("AT&T/Ü?"),
            "https://en.wikipedia.org/wiki/AT%26T%2F%C3%9C%3F"
        );
    }

    #[test]
    fn date_formatting() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2015, 6, 1)), "2015-06-01");
        assert_eq!(format_date(None), "");
    }
}
