//! Semantic Scholar API client.
//!
//! HTTP access routed through the persisted query cache:
//! - Cache hit: the stored payload is re-parsed, no network call is made.
//! - Cache miss: one GET, the raw payload is persisted before it is parsed,
//!   so an interrupted run keeps the lookup.
//! - Retry middleware with exponential backoff for transient transport
//!   errors, plus bounded Retry-After handling for 429 responses.
//! - Fixed inter-request delay; the API is rate limited and the pipeline is
//!   strictly sequential.

mod middleware;

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use middleware::TransientOnly;

use crate::cache::CacheStore;
use crate::config::{Config, api, fields};
use crate::error::{ClientError, ClientResult};
use crate::models::AuthorSearchResult;

/// Non-word runs are collapsed to `+` to make queries API friendly.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("valid non-word regex"));

/// Semantic Scholar API client backed by the persisted query cache.
pub struct SemanticScholarClient {
    /// HTTP client with retry middleware.
    client: ClientWithMiddleware,

    /// Persisted query cache.
    cache: CacheStore,

    /// API key (optional).
    api_key: Option<String>,

    /// Graph API base URL.
    graph_api_url: String,

    /// Delay before every network request.
    rate_limit_delay: Duration,

    /// Retries after a 429 response.
    max_rate_limit_retries: u32,

    /// Cap on the Retry-After wait.
    rate_limit_max_wait: Duration,
}

impl SemanticScholarClient {
    /// Create a new client over `cache` with the given configuration.
    pub fn new(config: &Config, cache: CacheStore) -> ClientResult<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json".parse().expect("valid content-type header"),
        );

        if let Some(ref key) = config.api_key {
            let value = key
                .parse()
                .map_err(|_| ClientError::Config("API key is not a valid header value".into()))?;
            headers.insert("x-api-key", value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(3);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy_and_strategy(
                retry_policy,
                TransientOnly,
            ))
            .build();

        Ok(Self {
            client,
            cache,
            api_key: config.api_key.clone(),
            graph_api_url: config.graph_api_url.clone(),
            rate_limit_delay: config.rate_limit_delay,
            max_rate_limit_retries: config.max_rate_limit_retries,
            rate_limit_max_wait: config.rate_limit_max_wait,
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// The query cache backing this client.
    #[must_use]
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Search for authors matching `raw_name`.
    ///
    /// The canonical query string doubles as the cache key; a hit re-parses
    /// the stored payload without touching the network.
    pub async fn search_authors(&mut self, raw_name: &str) -> ClientResult<AuthorSearchResult> {
        let key = author_query(raw_name);

        if let Some(cached) = self.cache.get(&key) {
            tracing::trace!(query = %key, "cache hit");
            return serde_json::from_value(cached.clone()).map_err(ClientError::from);
        }

        let value = self.get_json(&key).await?;
        // Persist before parsing: a malformed payload should still be
        // inspectable, and a later crash should not repeat the request.
        self.cache.put(key, value.clone())?;

        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// GET `resource` (relative to the Graph API base) with bounded
    /// rate-limit retries.
    async fn get_json(&self, resource: &str) -> ClientResult<serde_json::Value> {
        let url = format!("{}/{}", self.graph_api_url, resource);
        let mut attempt = 0;

        loop {
            tokio::time::sleep(self.rate_limit_delay).await;

            let response = self.client.get(&url).send().await?;
            match handle_response(response).await {
                Ok(response) => {
                    return response.json().await.map_err(ClientError::from);
                }
                Err(err) if err.retry_after().is_some() && attempt < self.max_rate_limit_retries => {
                    let wait = err
                        .retry_after()
                        .unwrap_or(Duration::from_secs(60))
                        .min(self.rate_limit_max_wait);
                    attempt += 1;
                    tracing::warn!(attempt, wait = ?wait, "rate limited, backing off");
                    tokio::time::sleep(wait).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Handle API response status codes.
async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    match status.as_u16() {
        429 => {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);

            Err(ClientError::rate_limited(retry_after))
        }
        404 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::not_found(text))
        }
        400 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::bad_request(text))
        }
        500..=599 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::server(status.as_u16(), text))
        }
        _ => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
        }
    }
}

/// Canonical author search query for `raw_name`. This exact string is the
/// cache key; any change to it invalidates every previously cached lookup.
#[must_use]
pub fn author_query(raw_name: &str) -> String {
    format!(
        "author/search?query={}&fields={}&limit={}",
        clean_query(raw_name),
        fields::AUTHOR.join(","),
        fields::AUTHOR_SEARCH_LIMIT
    )
}

/// Trim, lowercase, and collapse non-word runs to `+`, matching what the
/// search endpoint expects. Mismatched normalization would defeat caching.
fn clean_query(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    NON_WORD.replace_all(&lowered, "+").trim_matches('+').to_string()
}

impl std::fmt::Debug for SemanticScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticScholarClient")
            .field("has_api_key", &self.has_api_key())
            .field("cached_queries", &self.cache.len())
            .finish()
    }
}
