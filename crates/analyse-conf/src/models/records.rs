//! Records flowing through the pipeline: scraped input and the three output
//! tables (papers, authors, authorships).

use serde::Serialize;

use super::ApiAuthor;

/// A paper as scraped from a conference listing, before author resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPaper {
    /// Paper title as listed.
    pub title: String,

    /// Track or paper category from the listing (e.g. "Long", "Short").
    pub track: String,

    /// Author names in listed order.
    pub authors: Vec<String>,
}

/// Output row: a paper with its run-scoped surrogate id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paper {
    /// Surrogate id, sequential from 1 in listing order.
    pub paper_id: u32,

    /// Paper title.
    pub title: String,

    /// Track or paper category.
    pub track: String,
}

/// Output row: an author enriched through the Semantic Scholar API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRecord {
    /// Semantic Scholar author id; empty when the author is unresolved.
    pub author_id: String,

    /// Display name: the API's name when resolved, the raw scraped name
    /// otherwise.
    pub name: String,

    /// Primary affiliation, possibly empty.
    pub affiliation: String,

    /// Total paper count, if known.
    pub paper_count: Option<i32>,

    /// Total citation count, if known.
    pub citation_count: Option<i32>,

    /// h-index, if known.
    pub h_index: Option<i32>,

    /// Whether the external service resolved this author.
    pub resolved: bool,
}

impl AuthorRecord {
    /// Build a resolved record from an API candidate.
    #[must_use]
    pub fn from_api(author: &ApiAuthor) -> Self {
        Self {
            author_id: author.author_id.clone(),
            name: author.name_or_default().to_string(),
            affiliation: author.primary_affiliation().unwrap_or("").to_string(),
            paper_count: author.paper_count,
            citation_count: author.citation_count,
            h_index: author.h_index,
            resolved: true,
        }
    }

    /// Build an unresolved placeholder carrying only the scraped name.
    #[must_use]
    pub fn unresolved(raw_name: &str) -> Self {
        Self {
            author_id: String::new(),
            name: raw_name.to_string(),
            affiliation: String::new(),
            paper_count: None,
            citation_count: None,
            h_index: None,
            resolved: false,
        }
    }
}

/// Output row: one author at one listed position on one paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Authorship {
    /// Surrogate id of the paper.
    pub paper_id: u32,

    /// Semantic Scholar author id; empty when the author is unresolved.
    pub author_id: String,

    /// Raw listed author name. Keeps unresolved rows joinable against the
    /// authors table.
    pub author_name: String,

    /// 1-indexed position in the paper's author list.
    pub position: u32,
}

/// The three joined output tables for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    /// One row per scraped paper.
    pub papers: Vec<Paper>,

    /// One row per distinct author.
    pub authors: Vec<AuthorRecord>,

    /// The many-to-many paper/author join.
    pub authorships: Vec<Authorship>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_record_from_api() {
        let api: ApiAuthor = serde_json::from_str(
            r#"{"authorId": "7", "name": "A. Lee", "affiliations": ["KAIST"],
                "paperCount": 12, "citationCount": 340, "hIndex": 9}"#,
        )
        .unwrap();

        let record = AuthorRecord::from_api(&api);
        assert_eq!(record.author_id, "7");
        assert_eq!(record.affiliation, "KAIST");
        assert_eq!(record.citation_count, Some(340));
        assert!(record.resolved);
    }

    #[test]
    fn test_unresolved_record_is_empty_but_named() {
        let record = AuthorRecord::unresolved("j. smith");
        assert!(record.author_id.is_empty());
        assert!(record.affiliation.is_empty());
        assert_eq!(record.name, "j. smith");
        assert!(!record.resolved);
    }
}
