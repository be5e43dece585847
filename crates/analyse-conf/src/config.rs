//! Configuration for the conference analysis pipeline.

use std::path::PathBuf;
use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Semantic Scholar Graph API endpoint.
    pub const GRAPH_API: &str = "https://api.semanticscholar.org/graph/v1";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Rate limit delay between requests without API key (200ms = 5 req/s).
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(200);

    /// Rate limit delay between requests with API key (10ms = 100 req/s).
    pub const RATE_LIMIT_DELAY_WITH_KEY: Duration = Duration::from_millis(10);

    /// Maximum retries after a 429 response before giving up on a lookup.
    pub const MAX_RATE_LIMIT_RETRIES: u32 = 3;

    /// Cap on the Retry-After wait between rate-limit retries.
    pub const RATE_LIMIT_MAX_WAIT: Duration = Duration::from_secs(60);

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Author field sets for API requests.
pub mod fields {
    /// Fields requested on author search.
    pub const AUTHOR: &[&str] =
        &["name", "affiliations", "paperCount", "citationCount", "hIndex"];

    /// Candidate limit on author search.
    pub const AUTHOR_SEARCH_LIMIT: u32 = 20;
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Semantic Scholar API key (optional, enables higher rate limits).
    pub api_key: Option<String>,

    /// Base URL for the Graph API (overridable for mock servers).
    pub graph_api_url: String,

    /// Path of the persisted query cache.
    pub cache_path: PathBuf,

    /// Directory the output tables are written under.
    pub output_dir: PathBuf,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Delay before every network request.
    pub rate_limit_delay: Duration,

    /// Retries after a 429 response.
    pub max_rate_limit_retries: u32,

    /// Cap on the wait between rate-limit retries.
    pub rate_limit_max_wait: Duration,
}

impl Config {
    /// Create a new configuration with optional API key.
    ///
    /// The rate limit delay is adjusted based on API key presence:
    /// 5 req/s without a key, 100 req/s with one.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        let has_key = api_key.is_some();
        Self {
            api_key,
            graph_api_url: api::GRAPH_API.to_string(),
            cache_path: PathBuf::from(".api_cache.json"),
            output_dir: PathBuf::from("outputs"),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            rate_limit_delay: if has_key {
                api::RATE_LIMIT_DELAY_WITH_KEY
            } else {
                api::RATE_LIMIT_DELAY
            },
            max_rate_limit_retries: api::MAX_RATE_LIMIT_RETRIES,
            rate_limit_max_wait: api::RATE_LIMIT_MAX_WAIT,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str, cache_path: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            api_key: None,
            graph_api_url: format!("{}/graph/v1", base_url),
            cache_path,
            output_dir,
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            rate_limit_delay: Duration::from_millis(0), // No delay in tests
            max_rate_limit_retries: api::MAX_RATE_LIMIT_RETRIES,
            rate_limit_max_wait: Duration::from_millis(0),
        }
    }

    /// Create configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::var("SEMANTIC_SCHOLAR_API_KEY").ok())
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
