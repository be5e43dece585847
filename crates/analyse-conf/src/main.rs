//! Conference analysis CLI - entry point.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use analyse_conf::{config::Config, pipeline, scrape};

#[derive(Parser, Debug)]
#[command(name = "analyse-conf")]
#[command(about = "Scrape a conference and enrich its authors via Semantic Scholar")]
#[command(version)]
struct Cli {
    /// Conference identifier (e.g. SIGIR2022)
    conference: String,

    /// Semantic Scholar API key (optional, enables higher rate limits)
    #[arg(long, env = "SEMANTIC_SCHOLAR_API_KEY")]
    api_key: Option<String>,

    /// Path of the persisted query cache
    #[arg(long, default_value = ".api_cache.json")]
    cache_path: PathBuf,

    /// Directory the output tables are written under
    #[arg(long, default_value = "outputs")]
    output_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

// Sequential by design: one request in flight at a time against a
// rate-limited API, so a single-threaded runtime is all we need.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        conference = %cli.conference,
        supported = ?scrape::SUPPORTED_CONFERENCES,
        "starting conference analysis"
    );

    let mut config = Config::new(cli.api_key);
    config.cache_path = cli.cache_path;
    config.output_dir = cli.output_dir;

    let stats = pipeline::run(&config, &cli.conference).await?;

    println!(
        "{}: {} papers, {} authors, {} authorships -> {}",
        cli.conference,
        stats.papers,
        stats.authors,
        stats.authorships,
        stats.output_dir.display()
    );
    if stats.unresolved > 0 {
        println!("warning: {} author name(s) unresolved", stats.unresolved);
    }

    Ok(())
}
