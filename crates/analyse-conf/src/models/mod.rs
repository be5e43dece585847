//! Data models: Semantic Scholar API schemas and the pipeline's own records.
//!
//! API models use `#[serde(default)]` for optional fields and
//! `#[serde(rename = "camelCase")]` to match API naming, so unexpected
//! response shapes fail at the boundary instead of propagating silently.

mod author;
mod records;

pub use author::{ApiAuthor, AuthorSearchResult};
pub use records::{AuthorRecord, Authorship, Paper, RawPaper, Tables};
