//! Paper Digest
//!
//! Searches the Semantic Scholar Graph API for papers on a topic, fetches
//! each paper's metadata, and condenses its abstract into a short extractive
//! summary.
//!
//! # Features
//!
//! - **Search pipeline**: one search call, then one detail fetch per paper
//! - **LSA summaries**: three sentences per abstract, in reading order
//! - **Cached**: 10-minute TTL cache keyed by (topic, count)
//! - **Dashboard**: HTML cards plus a JSON endpoint served with axum
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use paper_digest::{Config, Pipeline, ScholarClient, SearchCache, Summarizer};
//! use paper_digest::formatters::{cards, format_cards_markdown};
//! use paper_digest::models::SearchQuery;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let cache = SearchCache::from_config(&config);
//!     let pipeline = Pipeline::new(Arc::new(ScholarClient::new(config)?), cache);
//!
//!     let papers = pipeline.search(&SearchQuery::new("chatgpt", 3)?).await;
//!     println!("{}", format_cards_markdown(&cards(&papers, &Summarizer::default())));
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod session;
pub mod summarizer;

pub use client::{PaperSource, ScholarClient};
pub use config::Config;
pub use error::{ClientError, DetailFetchError, PaperError, SearchError, ValidationError};
pub use pipeline::{Pipeline, SearchCache};
pub use session::{DashboardSession, SearchOutcome, SessionManager};
pub use summarizer::Summarizer;
