//! Author resolution: raw scraped name to a Semantic Scholar identity.
//!
//! Lookups are memoized per run by normalized name, on top of the persistent
//! query cache, so one run never issues the same lookup twice. API failures
//! degrade to an unresolved record instead of aborting the run; only cache
//! persistence failures propagate.

use std::collections::HashMap;

use crate::client::SemanticScholarClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{ApiAuthor, AuthorRecord};

/// Resolves raw author names through the Semantic Scholar API.
#[derive(Debug)]
pub struct AuthorResolver<'c> {
    client: &'c mut SemanticScholarClient,
    memo: HashMap<String, AuthorRecord>,
    unresolved: usize,
}

impl<'c> AuthorResolver<'c> {
    /// Create a resolver over `client` with an empty per-run memo.
    pub fn new(client: &'c mut SemanticScholarClient) -> Self {
        Self { client, memo: HashMap::new(), unresolved: 0 }
    }

    /// Resolve `raw_name` to an author record.
    ///
    /// Never fails on API errors: not-found and exhausted retries yield an
    /// unresolved record and the run continues. A failure persisting to the
    /// query cache is the one fatal case.
    pub async fn resolve(&mut self, raw_name: &str) -> ClientResult<AuthorRecord> {
        let key = normalize_name(raw_name);

        if let Some(record) = self.memo.get(&key) {
            return Ok(record.clone());
        }

        let record = match self.client.search_authors(raw_name).await {
            Ok(result) => match best_candidate(&result.data) {
                Some(candidate) => AuthorRecord::from_api(candidate),
                None => {
                    tracing::info!(name = raw_name, "no candidates, recording as unresolved");
                    AuthorRecord::unresolved(raw_name)
                }
            },
            Err(ClientError::Cache(err)) => return Err(ClientError::Cache(err)),
            Err(ClientError::NotFound { .. }) => {
                tracing::info!(name = raw_name, "not found, recording as unresolved");
                AuthorRecord::unresolved(raw_name)
            }
            Err(err) => {
                tracing::warn!(name = raw_name, error = %err, "lookup failed, recording as unresolved");
                AuthorRecord::unresolved(raw_name)
            }
        };

        if !record.resolved {
            self.unresolved += 1;
        }
        self.memo.insert(key, record.clone());
        Ok(record)
    }

    /// Distinct names that could not be resolved this run.
    #[must_use]
    pub fn unresolved_count(&self) -> usize {
        self.unresolved
    }
}

/// Pick one candidate deterministically: highest citation count, ties broken
/// by the API's own result order. Author-name collisions are common, so an
/// arbitrary pick would make results non-reproducible.
fn best_candidate(candidates: &[ApiAuthor]) -> Option<&ApiAuthor> {
    candidates.iter().fold(None, |best: Option<&ApiAuthor>, candidate| match best {
        Some(current) if current.citations() >= candidate.citations() => Some(current),
        _ => Some(candidate),
    })
}

/// Memo key for a raw name. Coarser than the wire-level query cleanup; two
/// names that normalize equal are treated as the same person within a run.
#[must_use]
pub fn normalize_name(raw_name: &str) -> String {
    raw_name.trim().to_lowercase()
}
