//! Joins scraped papers with resolved authors into the three output tables.

use std::collections::HashSet;

use crate::error::ClientResult;
use crate::models::{Authorship, Paper, RawPaper, Tables};
use crate::resolver::{AuthorResolver, normalize_name};

/// Build the papers, authors, and authorships tables from `raw_papers`.
///
/// Papers get sequential surrogate ids (from 1, in input order). Each listed
/// author name is resolved in order; authors are deduplicated by Semantic
/// Scholar id, and unresolved authors by normalized name so distinct
/// unresolved people never collapse. Every authorship row references a paper
/// and an author present in the returned tables.
pub async fn join(
    raw_papers: &[RawPaper],
    resolver: &mut AuthorResolver<'_>,
) -> ClientResult<Tables> {
    let mut tables = Tables::default();
    let mut seen_authors: HashSet<String> = HashSet::new();

    for (index, raw) in raw_papers.iter().enumerate() {
        let paper_id = u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1);
        tables.papers.push(Paper {
            paper_id,
            title: raw.title.clone(),
            track: raw.track.clone(),
        });

        for (position, raw_name) in raw.authors.iter().enumerate() {
            let record = resolver.resolve(raw_name).await?;

            let dedup_key = if record.resolved {
                format!("id:{}", record.author_id)
            } else {
                format!("name:{}", normalize_name(raw_name))
            };
            if seen_authors.insert(dedup_key) {
                tables.authors.push(record.clone());
            }

            tables.authorships.push(Authorship {
                paper_id,
                author_id: record.author_id,
                author_name: raw_name.clone(),
                position: u32::try_from(position).unwrap_or(u32::MAX).saturating_add(1),
            });
        }
    }

    debug_assert!(is_referentially_complete(&tables));
    Ok(tables)
}

/// Check the join invariant: every authorship references a paper id and an
/// author id present in the tables.
#[must_use]
pub fn is_referentially_complete(tables: &Tables) -> bool {
    let paper_ids: HashSet<u32> = tables.papers.iter().map(|p| p.paper_id).collect();
    let author_ids: HashSet<&str> =
        tables.authors.iter().map(|a| a.author_id.as_str()).collect();

    tables
        .authorships
        .iter()
        .all(|a| paper_ids.contains(&a.paper_id) && author_ids.contains(a.author_id.as_str()))
}
