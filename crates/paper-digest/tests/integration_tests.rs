//! Integration tests for paper-digest.
//!
//! These tests hit the real Semantic Scholar API.
//! Run with: `cargo test --features integration -- --nocapture`

#![cfg(feature = "integration")]

use std::sync::Arc;

use paper_digest::client::{PaperSource, ScholarClient};
use paper_digest::config::{Config, fields};
use paper_digest::formatters::cards;
use paper_digest::models::SearchQuery;
use paper_digest::{Pipeline, SearchCache, Summarizer};

/// "Attention Is All You Need" - Vaswani et al. 2017
const ATTENTION: &str = "204e3073870fae3d05bcbc2f6a8e263d9b72e776";

fn create_client() -> ScholarClient {
    let config = Config {
        api_key: std::env::var("SEMANTIC_SCHOLAR_API_KEY").ok(),
        request_timeout: Some(std::time::Duration::from_secs(30)),
        ..Config::default()
    };
    ScholarClient::new(config).expect("Failed to create client")
}

#[tokio::test]
async fn test_live_search_ids() {
    let client = create_client();
    let ids = client.search_ids("transformer attention", 3).await.unwrap();
    assert!(!ids.is_empty());
    assert!(ids.len() <= 3);
}

#[tokio::test]
async fn test_live_paper_details() {
    let client = create_client();
    let details = client.fetch_details(ATTENTION, fields::DETAIL).await.unwrap();

    assert!(details.title.unwrap_or_default().contains("Attention"));
    assert_eq!(details.year, Some(2017));
    assert!(!details.authors.is_empty());
}

#[tokio::test]
async fn test_live_pipeline() {
    let pipeline = Pipeline::new(Arc::new(create_client()), SearchCache::default());
    let papers = pipeline.search(&SearchQuery::new("chatgpt", 3).unwrap()).await;

    for card in cards(&papers, &Summarizer::default()) {
        println!("{} :: {}", card.title, card.summary);
        assert!(!card.title.is_empty());
    }
}
