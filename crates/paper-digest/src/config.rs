//! Configuration for the paper digest pipeline.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Graph API endpoint.
    pub const GRAPH_API: &str = "https://api.semanticscholar.org/graph/v1";

    /// Smallest number of papers a search may ask for.
    pub const MIN_RESULTS: u8 = 1;

    /// Largest number of papers a search may ask for.
    pub const MAX_RESULTS: u8 = 10;

    /// Number of papers requested when the caller does not say.
    pub const DEFAULT_RESULTS: u8 = 3;

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Search result cache TTL (10 minutes).
    pub const CACHE_TTL: Duration = Duration::from_secs(600);

    /// Dashboard sessions idle longer than this are dropped (30 minutes).
    pub const SESSION_IDLE: Duration = Duration::from_secs(1800);

    /// Maximum number of live dashboard sessions.
    pub const MAX_SESSIONS: u64 = 10_000;

    /// Sentences kept in each abstract summary.
    pub const SUMMARY_SENTENCES: usize = 3;
}

/// Paper field sets for API requests.
pub mod fields {
    /// Fields requested for every paper detail fetch.
    pub const DETAIL: &[&str] = &[
        "title",
        "url",
        "year",
        "abstract",
        "authors",
        "venue",
        "referenceCount",
        "citationCount",
        "influentialCitationCount",
        "isOpenAccess",
        "fieldsOfStudy",
        "s2FieldsOfStudy",
        "publicationTypes",
        "publicationDate",
        "journal",
        "openAccessPdf",
    ];
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Semantic Scholar API key (optional).
    pub api_key: Option<String>,

    /// Base URL for Graph API (for testing with mock servers).
    pub graph_api_url: String,

    /// Request timeout. `None` waits for the remote end indefinitely.
    pub request_timeout: Option<Duration>,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Search result cache TTL.
    pub cache_ttl: Duration,

    /// Sentences kept in each summary.
    pub summary_sentences: usize,
}

impl Config {
    /// Create a new configuration with optional API key.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            graph_api_url: api::GRAPH_API.to_string(),
            request_timeout: None,
            connect_timeout: api::CONNECT_TIMEOUT,
            cache_ttl: api::CACHE_TTL,
            summary_sentences: api::SUMMARY_SENTENCES,
        }
    }

    /// Create a test configuration with custom URLs for mock servers.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            graph_api_url: format!("{}/graph/v1", base_url),
            request_timeout: Some(Duration::from_secs(5)),
            connect_timeout: Duration::from_secs(2),
            cache_ttl: api::CACHE_TTL,
            summary_sentences: api::SUMMARY_SENTENCES,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `SEMANTIC_SCHOLAR_API_KEY`, `PAPER_DIGEST_API_URL` and
    /// `PAPER_DIGEST_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("SEMANTIC_SCHOLAR_API_KEY").ok().filter(|k| !k.is_empty());
        let mut config = Self::new(api_key);

        if let Ok(url) = std::env::var("PAPER_DIGEST_API_URL") {
            config.graph_api_url = url.trim_end_matches('/').to_string();
        }

        if let Ok(secs) = std::env::var("PAPER_DIGEST_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|e| anyhow::anyhow!("PAPER_DIGEST_TIMEOUT_SECS must be an integer: {e}"))?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
