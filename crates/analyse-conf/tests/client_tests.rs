//! Client behavior tests against a mocked Semantic Scholar API.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use analyse_conf::cache::CacheStore;
use analyse_conf::client::{SemanticScholarClient, author_query};
use analyse_conf::config::Config;
use analyse_conf::error::ClientError;

/// Test config pointing at a mock server, cache and outputs in `dir`.
fn test_config(mock_server: &MockServer, dir: &std::path::Path) -> Config {
    Config::for_testing(&mock_server.uri(), dir.join("cache.json"), dir.join("out"))
}

fn test_client(config: &Config) -> SemanticScholarClient {
    let cache = CacheStore::load(&config.cache_path).unwrap();
    SemanticScholarClient::new(config, cache).unwrap()
}

/// Sample author search payload with one candidate.
fn sample_search_result(id: &str, name: &str, citations: i32) -> serde_json::Value {
    json!({
        "total": 1,
        "offset": 0,
        "data": [{
            "authorId": id,
            "name": name,
            "affiliations": ["MIT"],
            "paperCount": 10,
            "citationCount": citations,
            "hIndex": 5
        }]
    })
}

// =============================================================================
// Cache interaction
// =============================================================================

#[tokio::test]
async fn test_cache_miss_fetches_and_persists() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/graph/v1/author/search"))
        .and(query_param("query", "j smith"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(sample_search_result("42", "Jane Smith", 100)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server, dir.path());
    let mut client = test_client(&config);

    let result = client.search_authors("J. Smith").await.unwrap();
    assert_eq!(result.data[0].author_id, "42");

    // Second call is served from the cache store: still one request total.
    let again = client.search_authors("J. Smith").await.unwrap();
    assert_eq!(again.data[0].author_id, "42");

    // And the payload survived to disk.
    let reloaded = CacheStore::load(&config.cache_path).unwrap();
    assert!(reloaded.get(&author_query("J. Smith")).is_some());
}

#[tokio::test]
async fn test_warm_cache_issues_no_requests() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&mock_server, dir.path());

    // Pre-populate the cache file, then expect zero API traffic.
    let mut warm = CacheStore::load(&config.cache_path).unwrap();
    warm.put(author_query("A. Lee"), sample_search_result("7", "Anna Lee", 50)).unwrap();
    drop(warm);

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut client = test_client(&config);
    let result = client.search_authors("A. Lee").await.unwrap();
    assert_eq!(result.data[0].author_id, "7");
}

#[tokio::test]
async fn test_equivalent_spellings_share_one_lookup() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/graph/v1/author/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(sample_search_result("42", "Jane Smith", 100)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server, dir.path());
    let mut client = test_client(&config);

    client.search_authors("J. Smith").await.unwrap();
    // Different surface form, same canonical query.
    client.search_authors("  j smith ").await.unwrap();
}

// =============================================================================
// Error handling
// =============================================================================

#[tokio::test]
async fn test_not_found_is_an_error_not_a_retry() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/graph/v1/author/search"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such author"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server, dir.path());
    let mut client = test_client(&config);

    let err = client.search_authors("nobody").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_rate_limited_then_success_is_retried() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/graph/v1/author/search"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/graph/v1/author/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(sample_search_result("42", "Jane Smith", 100)),
        )
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server, dir.path());
    let mut client = test_client(&config);

    let result = client.search_authors("J. Smith").await.unwrap();
    assert_eq!(result.data[0].author_id, "42");
}

#[tokio::test]
async fn test_rate_limit_retries_are_bounded() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/graph/v1/author/search"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        // 1 initial attempt + MAX_RATE_LIMIT_RETRIES.
        .expect(4)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server, dir.path());
    let mut client = test_client(&config);

    let err = client.search_authors("J. Smith").await.unwrap_err();
    assert!(matches!(err, ClientError::RateLimited { .. }));
}

#[tokio::test]
async fn test_failed_lookup_is_not_cached() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/graph/v1/author/search"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server, dir.path());
    let mut client = test_client(&config);

    let _ = client.search_authors("nobody").await.unwrap_err();
    assert!(client.cache().is_empty());
}

// =============================================================================
// Construction
// =============================================================================

#[tokio::test]
async fn test_client_debug_hides_api_key() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::new(Some("super-secret-key".to_string()));
    config.cache_path = dir.path().join("cache.json");

    let cache = CacheStore::load(&config.cache_path).unwrap();
    let client = SemanticScholarClient::new(&config, cache).unwrap();

    let debug = format!("{client:?}");
    assert!(!debug.contains("super-secret-key"));
    assert!(debug.contains("has_api_key"));
}
