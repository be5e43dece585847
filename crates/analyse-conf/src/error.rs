//! Error types for the analysis pipeline.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::path::PathBuf;
use std::time::Duration;

/// Errors from the persisted query cache.
#[derive(thiserror::Error, Debug)]
pub enum CacheError {
    /// The cache file exists but cannot be parsed. Silently discarding cached
    /// work would mask stale or wrong results, so this is fatal.
    #[error("cache file {path} is corrupt: {source}")]
    Corrupt {
        /// Path of the cache file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// I/O failure reading or writing the cache file.
    #[error("cache I/O error on {path}: {source}")]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by the Semantic Scholar API (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// Invalid client configuration (e.g. malformed API key)
    #[error("Client configuration error: {0}")]
    Config(String),

    /// Failure persisting a response to the query cache. Fatal: continuing
    /// would silently lose completed lookups.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. })
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Errors from the conference scraping layer. All fatal: without a paper list
/// there is nothing to analyse.
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    /// The requested conference has no registered scraper.
    #[error("unsupported conference {conference:?}; supported: {supported:?}")]
    UnsupportedConference {
        /// The identifier that was requested.
        conference: String,
        /// Identifiers with a registered scraper.
        supported: Vec<&'static str>,
    },

    /// The listing page could not be fetched.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        /// Listing URL.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The listing page responded with a non-success status.
    #[error("fetching {url} returned status {status}")]
    Status {
        /// Listing URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The listing page parsed to zero papers.
    #[error("no papers found in listing at {url}")]
    EmptyListing {
        /// Listing URL.
        url: String,
    },
}

/// Top-level pipeline errors. Anything surfacing here aborts the run.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// Scraping failed (unsupported conference, fetch failure, empty listing).
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    /// The persisted cache could not be loaded or written.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The API client failed in a non-degradable way.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Writing an output table failed.
    #[error("failed to write output under {path}: {source}")]
    Export {
        /// Output directory or file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
