//! Warm-cache rerun produces byte-identical output tables, without touching
//! the network.

use std::fs;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use analyse_conf::cache::CacheStore;
use analyse_conf::client::SemanticScholarClient;
use analyse_conf::config::Config;
use analyse_conf::export::write_tables;
use analyse_conf::join::join;
use analyse_conf::models::RawPaper;
use analyse_conf::resolver::AuthorResolver;

fn papers() -> Vec<RawPaper> {
    vec![
        RawPaper {
            title: "Paper A".into(),
            track: "Long".into(),
            authors: vec!["j. smith".into(), "a. lee".into()],
        },
        RawPaper {
            title: "Paper B".into(),
            track: "Short".into(),
            authors: vec!["a. lee".into(), "ghost writer".into()],
        },
    ]
}

async fn mount_authors(mock_server: &MockServer) {
    // One mock serving per-query payloads keyed off the query parameter.
    Mock::given(method("GET"))
        .and(path("/graph/v1/author/search"))
        .respond_with(move |request: &wiremock::Request| {
            let query = request
                .url
                .query_pairs()
                .find(|(k, _)| k == "query")
                .map(|(_, v)| v.to_string())
                .unwrap_or_default();
            let body = match query.as_str() {
                "j smith" => json!({"total": 1, "offset": 0, "data": [
                    {"authorId": "smith1", "name": "Jane Smith",
                     "affiliations": ["MIT"], "citationCount": 100}
                ]}),
                "a lee" => json!({"total": 1, "offset": 0, "data": [
                    {"authorId": "lee1", "name": "Anna Lee",
                     "affiliations": [], "citationCount": 50}
                ]}),
                // "ghost writer" stays unmatched.
                _ => json!({"total": 0, "offset": 0, "data": []}),
            };
            ResponseTemplate::new(200).set_body_json(body)
        })
        .mount(mock_server)
        .await;
}

async fn run_once(config: &Config, out_name: &str) -> std::path::PathBuf {
    let cache = CacheStore::load(&config.cache_path).unwrap();
    let mut client = SemanticScholarClient::new(config, cache).unwrap();
    let mut resolver = AuthorResolver::new(&mut client);

    let tables = join(&papers(), &mut resolver).await.unwrap();
    write_tables(&config.output_dir, out_name, &tables).unwrap()
}

#[tokio::test]
async fn test_warm_rerun_is_byte_identical_and_offline() {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("cache.json");

    // Cold run against the mock API.
    let first_out = {
        let mock_server = MockServer::start().await;
        mount_authors(&mock_server).await;
        let config =
            Config::for_testing(&mock_server.uri(), cache_path.clone(), dir.path().join("out"));
        run_once(&config, "run1").await
        // Mock server drops here; its port goes away.
    };

    // Warm rerun pointing at a dead endpoint: every lookup must come from the
    // persisted cache. Any network attempt would fail and change the output.
    let config = Config::for_testing(
        "http://127.0.0.1:1",
        cache_path.clone(),
        dir.path().join("out"),
    );
    let second_out = run_once(&config, "run2").await;

    for file in ["papers.csv", "authors.csv", "authorships.csv"] {
        let first = fs::read(first_out.join(file)).unwrap();
        let second = fs::read(second_out.join(file)).unwrap();
        assert_eq!(first, second, "{file} differs between runs");
        assert!(!first.is_empty());
    }

    // The unresolved ghost writer was cached too (as an empty result set),
    // so the warm run still reports it without a lookup.
    let cache = CacheStore::load(&cache_path).unwrap();
    assert_eq!(cache.len(), 3);
}
