//! SIGIR 2022 accepted-paper listing parser.
//!
//! The listing is a single `div.post-body` of paragraphs. Paragraphs holding
//! an `<a name=…>` anchor open a track section ("Long", "Short", …); every
//! following paragraph is one paper, with the title bolded and the author
//! list as the paragraph's own text.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::models::RawPaper;

/// Conference identifier handled by this parser.
pub const CONFERENCE: &str = "SIGIR2022";

/// Accepted-paper listing URL.
pub const LISTING_URL: &str = "https://sigir.org/sigir2022/program/accepted/";

struct Selectors {
    post_body: Selector,
    paragraph: Selector,
    anchor: Selector,
    bold: Selector,
}

static SELECTORS: Lazy<Selectors> = Lazy::new(|| Selectors {
    post_body: Selector::parse("div.post-body").expect("valid post-body selector"),
    paragraph: Selector::parse("p").expect("valid paragraph selector"),
    anchor: Selector::parse("a").expect("valid anchor selector"),
    bold: Selector::parse("b").expect("valid bold selector"),
});

/// Extract papers from the listing HTML. Unrecognized paragraphs are
/// skipped; an unusable page simply parses to zero papers, which the caller
/// treats as fatal.
#[must_use]
pub fn parse(html: &str) -> Vec<RawPaper> {
    let document = Html::parse_document(html);
    let Some(body) = document.select(&SELECTORS.post_body).next() else {
        return Vec::new();
    };

    let mut papers = Vec::new();
    let mut track: Option<String> = None;

    for paragraph in body.select(&SELECTORS.paragraph) {
        // Paragraphs containing a link open a track section.
        if let Some(anchor) = paragraph.select(&SELECTORS.anchor).next() {
            if let Some(name) = anchor.value().attr("name") {
                track = Some(name.to_string());
            }
            continue;
        }

        let Some(current_track) = track.clone() else { continue };
        let Some(bold) = paragraph.select(&SELECTORS.bold).next() else { continue };

        let title = bold.text().collect::<String>().trim().to_string();
        let authors = split_authors(&direct_text(paragraph));
        if title.is_empty() || authors.is_empty() {
            continue;
        }

        papers.push(RawPaper { title, track: current_track, authors });
    }

    papers
}

/// The paragraph's own text nodes (the author list), excluding the bolded
/// title and any other child elements.
fn direct_text(paragraph: ElementRef<'_>) -> String {
    paragraph
        .children()
        .filter_map(|node| node.value().as_text().map(|text| &**text))
        .collect()
}

/// Split the typical academic author list into individual names, lowercased
/// and trimmed. Handles `"a, b and c"`, lone authors, and lists separated by
/// commas only.
fn split_authors(author_str: &str) -> Vec<String> {
    let mut parts = author_str.trim().splitn(2, " and ");
    let head = parts.next().unwrap_or("");

    let mut names: Vec<String> =
        head.split(", ").map(|name| name.trim().to_lowercase()).collect();
    if let Some(last) = parts.next() {
        names.push(last.trim().to_lowercase());
    }

    names.retain(|name| !name.is_empty());
    names
}
