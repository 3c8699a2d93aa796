//! Wiki connection settings

use crate::api::MAX_PAGE_SIZE;

/// Where to send API requests for one wiki
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiEndpoint {
    /// Wiki host, e.g. `en.wikipedia.org`; also the base of exported links
    pub domain: String,
    /// Full `api.php` URL
    pub api_url: String,
}

impl WikiEndpoint {
    /// Standard Wikimedia layout: `https://{domain}/w/api.php`
    pub fn for_domain(domain: &str) -> Self {
        let domain = domain.trim().trim_end_matches('/').to_string();
        Self {
            api_url: format!("https://{domain}/w/api.php"),
            domain,
        }
    }

    /// Keep the domain for links but send requests elsewhere (mirrors, tests)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

/// Runtime configuration for one export
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: WikiEndpoint,
    /// Items per request for both pagination tiers
    pub page_size: u32,
}

impl Config {
    pub fn new(domain: &str) -> Self {
        Self {
            endpoint: WikiEndpoint::for_domain(domain),
            page_size: MAX_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_api_url() {
        let ep = WikiEndpoint::for_domain("he.wikipedia.org");
        assert_eq!(ep.domain, "he.wikipedia.org");
        assert_eq!(ep.api_url, "https://he.wikipedia.org/w/api.php");
    }

    #[test]
    fn domain_is_trimmed() {
        let ep = WikiEndpoint::for_domain(" en.wikipedia.org/ ");
        assert_eq!(ep.domain, "en.wikipedia.org");
    }

    #[test]
    fn api_url_override_keeps_domain() {
        let ep = WikiEndpoint::for_domain("en.wikipedia.org").with_api_url("http://127.0.0.1:9/api.php");
        assert_eq!(ep.domain, "en.wikipedia.org");
        assert_eq!(ep.api_url, "http://127.0.0.1:9/api.php");
    }

    #[test]
    fn default_page_size() {
        assert_eq!(Config::new("en.wikipedia.org").page_size, 500);
    }
}
