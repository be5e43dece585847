//! CSV serialization of the output tables.
//!
//! Three files per conference: papers.csv, authors.csv, authorships.csv.
//! Row order follows table order, so a warm-cache rerun writes byte-identical
//! files.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::models::Tables;

/// Write the three tables under `<output_dir>/<conference>/`, overwriting
/// old results. Returns the conference output directory.
pub fn write_tables(
    output_dir: &Path,
    conference: &str,
    tables: &Tables,
) -> io::Result<PathBuf> {
    let dir = output_dir.join(conference);
    fs::create_dir_all(&dir)?;

    fs::write(dir.join("papers.csv"), papers_csv(tables))?;
    fs::write(dir.join("authors.csv"), authors_csv(tables))?;
    fs::write(dir.join("authorships.csv"), authorships_csv(tables))?;

    Ok(dir)
}

/// Format the papers table as CSV.
fn papers_csv(tables: &Tables) -> String {
    let mut output = String::from("paper_id,title,track\n");
    for paper in &tables.papers {
        let _ = writeln!(
            output,
            "{},{},{}",
            paper.paper_id,
            csv_escape(&paper.title),
            csv_escape(&paper.track)
        );
    }
    output
}

/// Format the authors table as CSV.
fn authors_csv(tables: &Tables) -> String {
    let mut output =
        String::from("author_id,name,affiliation,paper_count,citation_count,h_index,resolved\n");
    for author in &tables.authors {
        let _ = writeln!(
            output,
            "{},{},{},{},{},{},{}",
            csv_escape(&author.author_id),
            csv_escape(&author.name),
            csv_escape(&author.affiliation),
            opt(author.paper_count),
            opt(author.citation_count),
            opt(author.h_index),
            author.resolved
        );
    }
    output
}

/// Format the authorships table as CSV.
fn authorships_csv(tables: &Tables) -> String {
    let mut output = String::from("paper_id,author_id,author_name,position\n");
    for authorship in &tables.authorships {
        let _ = writeln!(
            output,
            "{},{},{},{}",
            authorship.paper_id,
            csv_escape(&authorship.author_id),
            csv_escape(&authorship.author_name),
            authorship.position
        );
    }
    output
}

/// Render an optional metric, empty when unknown.
fn opt(value: Option<i32>) -> String {
    value.map_or(String::new(), |v| v.to_string())
}

/// Escape a string for CSV output.
fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
