//! Author data model matching the Semantic Scholar API schema.

use serde::{Deserialize, Serialize};

/// Author search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorSearchResult {
    /// Total matching authors.
    pub total: i64,

    /// Offset for pagination.
    #[serde(default)]
    pub offset: i32,

    /// Next offset if more results.
    #[serde(default)]
    pub next: Option<i32>,

    /// List of candidate authors.
    pub data: Vec<ApiAuthor>,
}

/// A research author as returned by Semantic Scholar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAuthor {
    /// Unique Semantic Scholar author ID.
    pub author_id: String,

    /// Author name.
    #[serde(default)]
    pub name: Option<String>,

    /// Author's institutional affiliations.
    #[serde(default)]
    pub affiliations: Vec<String>,

    /// Total number of papers by this author.
    #[serde(default)]
    pub paper_count: Option<i32>,

    /// Total citation count across all papers.
    #[serde(default)]
    pub citation_count: Option<i32>,

    /// h-index metric.
    #[serde(default)]
    pub h_index: Option<i32>,
}

impl ApiAuthor {
    /// Get the author name, falling back to "Unknown" if not available.
    #[must_use]
    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// Get the primary affiliation if available.
    #[must_use]
    pub fn primary_affiliation(&self) -> Option<&str> {
        self.affiliations.first().map(String::as_str)
    }

    /// Get citation count or 0 if not available.
    #[must_use]
    pub fn citations(&self) -> i32 {
        self.citation_count.unwrap_or(0)
    }
}
