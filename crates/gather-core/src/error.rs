//! Error type for wiki query runs

/// Error from a single aggregation run (any request of any pagination tier).
///
/// A run fails as a unit: the first error aborts it and no partial
/// result is produced.
#[derive(Debug)]
pub enum FetchError {
    /// Network failure or non-success HTTP status
    Transport {
        status: Option<u16>,
        message: String,
    },
    /// Response body did not have the expected envelope shape
    Malformed(String),
    /// The wiki answered with an `error` object
    Api { code: String, info: String },
    /// The run was superseded or interrupted before it finished
    Cancelled,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Transport {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
            Self::Malformed(msg) => write!(f, "malformed response: {msg}"),
            Self::Api { code, info } => write!(f, "API error {code}: {info}"),
            Self::Cancelled => f.write_str("run cancelled"),
        }
    }
}

impl std::error::Error for FetchError {}

impl FetchError {
    /// Create transport error from reqwest error.
    ///
    /// The URL is stripped so query parameters (user names) stay out of logs.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        Self::Transport {
            status: e.status().map(|s| s.as_u16()),
            message: e.without_url().to_string(),
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
