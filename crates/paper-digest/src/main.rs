//! Paper Digest - Entry Point
//!
//! Runs a one-off search from the command line, or serves the dashboard.

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use paper_digest::formatters::{ResponseFormat, cards};
use paper_digest::models::SearchQuery;
use paper_digest::server::DashboardServer;
use paper_digest::{Config, Pipeline, ScholarClient, SearchCache, Summarizer};

#[derive(Parser, Debug)]
#[command(name = "paper-digest")]
#[command(about = "Search Semantic Scholar and summarize paper abstracts")]
#[command(version)]
struct Cli {
    /// Semantic Scholar API key (optional, enables higher rate limits)
    #[arg(long, global = true, env = "SEMANTIC_SCHOLAR_API_KEY")]
    api_key: Option<String>,

    /// Per-request timeout in seconds (no timeout when unset)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for papers and print summarized cards
    Search {
        /// Topic to search for
        topic: String,

        /// Number of papers to analyze (1-10)
        #[arg(long, short = 'n', default_value_t = 3)]
        count: i64,

        /// Output format
        #[arg(long, value_enum, default_value_t = ResponseFormat::Markdown)]
        format: ResponseFormat,
    },
    /// Serve the HTML dashboard
    Serve {
        /// HTTP server port
        #[arg(long, default_value = "8000", env = "PORT")]
        port: u16,
    },
}

/// Logs go to stderr so that `search` output can be piped.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr)).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let mut config = Config::from_env()?;
    if cli.api_key.is_some() {
        config.api_key = cli.api_key;
    }
    if let Some(secs) = cli.timeout_secs {
        config.request_timeout = Some(Duration::from_secs(secs));
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        has_api_key = config.has_api_key(),
        "Starting paper-digest"
    );

    let summarizer = Summarizer::new(config.summary_sentences);
    let cache = SearchCache::from_config(&config);
    let pipeline = Pipeline::new(Arc::new(ScholarClient::new(config)?), cache);

    match cli.command {
        Command::Search { topic, count, format } => {
            let query = match SearchQuery::new(&topic, count) {
                Ok(query) => query,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(2);
                }
            };

            let papers = match pipeline.try_search(&query).await {
                Ok(papers) => papers,
                Err(err) => {
                    eprintln!("An error occurred while searching for papers: {err}");
                    Arc::new(Vec::new())
                }
            };

            println!("{}", format.render(&cards(&papers, &summarizer)));
        }
        Command::Serve { port } => {
            tracing::info!(port, "Running dashboard");
            DashboardServer::new(pipeline, summarizer).run(port).await?;
        }
    }

    Ok(())
}
