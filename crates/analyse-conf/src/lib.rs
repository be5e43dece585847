//! Conference authorship analysis
//!
//! Scrapes a conference's accepted-paper listing, enriches author records
//! through the Semantic Scholar Graph API, and writes three linked CSV
//! tables (papers, authors, authorships) for offline analysis.
//!
//! Lookups go through a persisted query cache, so interrupted runs resume
//! where they left off and warm reruns never touch the network.
//!
//! # Example
//!
//! ```no_run
//! use analyse_conf::{config::Config, pipeline};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let stats = pipeline::run(&config, "SIGIR2022").await?;
//!     println!("{} papers, {} unresolved authors", stats.papers, stats.unresolved);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod join;
pub mod models;
pub mod pipeline;
pub mod resolver;
pub mod scrape;

pub use cache::CacheStore;
pub use client::SemanticScholarClient;
pub use config::Config;
pub use error::{CacheError, ClientError, PipelineError, ScrapeError};
