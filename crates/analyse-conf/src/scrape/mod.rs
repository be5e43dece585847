//! Conference listing scrapers.
//!
//! One parser per supported conference; the registry maps conference
//! identifiers to them. Parsers are pure (`&str` in, papers out) so they are
//! testable without network access.

pub mod sigir;

use crate::config::Config;
use crate::error::ScrapeError;
use crate::models::RawPaper;

/// Conference identifiers with a registered scraper.
pub const SUPPORTED_CONFERENCES: &[&str] = &[sigir::CONFERENCE];

/// Fetch and parse the accepted-paper listing for `conference`.
///
/// Fatal on an unknown identifier, a failed fetch, or an empty listing:
/// without a paper list there is nothing to analyse.
pub async fn scrape(conference: &str, config: &Config) -> Result<Vec<RawPaper>, ScrapeError> {
    let url = match conference {
        sigir::CONFERENCE => sigir::LISTING_URL,
        _ => {
            return Err(ScrapeError::UnsupportedConference {
                conference: conference.to_string(),
                supported: SUPPORTED_CONFERENCES.to_vec(),
            });
        }
    };

    let html = fetch(url, config).await?;
    let papers = sigir::parse(&html);

    if papers.is_empty() {
        return Err(ScrapeError::EmptyListing { url: url.to_string() });
    }

    tracing::info!(conference, papers = papers.len(), "scraped accepted-paper listing");
    Ok(papers)
}

/// Fetch a listing page as text.
async fn fetch(url: &str, config: &Config) -> Result<String, ScrapeError> {
    let fetch_err = |source| ScrapeError::Fetch { url: url.to_string(), source };

    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .gzip(true)
        .build()
        .map_err(fetch_err)?;

    let response = client.get(url).send().await.map_err(fetch_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status { url: url.to_string(), status: status.as_u16() });
    }

    response.text().await.map_err(fetch_err)
}
