//! End-to-end pipeline tests against a mocked Semantic Scholar API.
//!
//! Call counts are asserted with `.expect(n)`; wiremock verifies them when
//! the mock server is dropped.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use paper_digest::config::Config;
use paper_digest::formatters::{PLACEHOLDER, cards};
use paper_digest::models::SearchQuery;
use paper_digest::{Pipeline, ScholarClient, SearchCache, Summarizer};

fn setup_pipeline(mock_server: &MockServer) -> Pipeline {
    let config = Config::for_testing(&mock_server.uri());
    let cache = SearchCache::from_config(&config);
    Pipeline::new(Arc::new(ScholarClient::new(config).unwrap()), cache)
}

fn search_body(ids: &[&str]) -> serde_json::Value {
    let data: Vec<_> = ids.iter().map(|id| json!({ "paperId": id })).collect();
    json!({ "total": ids.len(), "offset": 0, "data": data })
}

fn detail_body(id: &str, title: &str) -> serde_json::Value {
    json!({
        "paperId": id,
        "title": title,
        "url": format!("https://www.semanticscholar.org/paper/{id}"),
        "year": 2023,
        "abstract": "ChatGPT is a conversational model. \
                     We evaluate ChatGPT on reasoning benchmarks. \
                     Results show strong reasoning ability. \
                     The evaluation covers twelve benchmarks. \
                     We release our code.",
        "authors": [{"authorId": "1", "name": "Ada Lovelace"}, {"authorId": "2", "name": "Alan Turing"}],
        "venue": "ACL",
        "referenceCount": 30,
        "citationCount": 120,
        "influentialCitationCount": 12,
        "isOpenAccess": true,
        "fieldsOfStudy": ["Computer Science"],
        "s2FieldsOfStudy": [{"category": "Computer Science", "source": "external"}],
        "publicationTypes": ["JournalArticle"],
        "publicationDate": "2023-03-01",
        "journal": {"name": "ArXiv", "volume": "abs/2303.00001"},
        "openAccessPdf": {"url": format!("https://arxiv.org/pdf/{id}"), "status": "GREEN"}
    })
}

async fn mount_detail(mock_server: &MockServer, id: &str, title: &str, expected: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/graph/v1/paper/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_body(id, title)))
        .expect(expected)
        .mount(mock_server)
        .await;
}

// =============================================================================
// Happy path
// =============================================================================

#[tokio::test]
async fn test_chatgpt_three_papers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/search"))
        .and(query_param("query", "chatgpt"))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&["p1", "p2", "p3"])))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_detail(&mock_server, "p1", "First", 1).await;
    mount_detail(&mock_server, "p2", "Second", 1).await;
    mount_detail(&mock_server, "p3", "Third", 1).await;

    let pipeline = setup_pipeline(&mock_server);
    let papers = pipeline.search(&SearchQuery::new("chatgpt", 3).unwrap()).await;

    assert_eq!(papers.len(), 3);
    assert!(papers.iter().all(|p| p.is_fetched() && !p.is_partial()));

    let cards = cards(&papers, &Summarizer::default());
    assert_eq!(cards.len(), 3);
    let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);

    let card = &cards[0];
    assert_eq!(card.authors, "Ada Lovelace, Alan Turing");
    assert_eq!(card.detail("Venue"), Some("ACL"));
    assert_eq!(card.detail("Journal"), Some("ArXiv abs/2303.00001"));
    assert_eq!(card.detail("Open Access PDF"), Some("https://arxiv.org/pdf/p1"));
    assert_eq!(card.summary.matches(". ").count() + 1, 3, "summary: {}", card.summary);
}

#[tokio::test]
async fn test_repeated_search_is_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&["p1", "p2"])))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_detail(&mock_server, "p1", "First", 1).await;
    mount_detail(&mock_server, "p2", "Second", 1).await;

    let pipeline = setup_pipeline(&mock_server);
    let query = SearchQuery::new("chatgpt", 2).unwrap();

    let first = pipeline.search(&query).await;
    let second = pipeline.search(&query).await;

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.len(), 2);
}

#[tokio::test]
async fn test_trimmed_topic_shares_cache_entry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/search"))
        .and(query_param("query", "chatgpt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&["p1"])))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_detail(&mock_server, "p1", "First", 1).await;

    let pipeline = setup_pipeline(&mock_server);
    pipeline.search(&SearchQuery::new("chatgpt", 1).unwrap()).await;
    pipeline.search(&SearchQuery::new("  chatgpt  ", 1).unwrap()).await;
}

#[tokio::test]
async fn test_concurrent_identical_searches_coalesce() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_body(&["p1"]))
                .set_delay(std::time::Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_detail(&mock_server, "p1", "First", 1).await;

    let pipeline = setup_pipeline(&mock_server);
    let query = SearchQuery::new("chatgpt", 1).unwrap();

    let (a, b) = tokio::join!(pipeline.search(&query), pipeline.search(&query));
    assert!(Arc::ptr_eq(&a, &b));
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_search_500_returns_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let pipeline = setup_pipeline(&mock_server);
    let query = SearchQuery::new("chatgpt", 3).unwrap();

    assert!(pipeline.search(&query).await.is_empty());

    let err = pipeline.try_search(&query).await.unwrap_err();
    assert_eq!(err.cause().status(), Some(500));
}

#[tokio::test]
async fn test_missing_venue_renders_placeholder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&["p1"])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "paperId": "p1",
            "title": "No Venue",
            "authors": []
        })))
        .mount(&mock_server)
        .await;

    let pipeline = setup_pipeline(&mock_server);
    let papers = pipeline.search(&SearchQuery::new("x", 1).unwrap()).await;
    let cards = cards(&papers, &Summarizer::default());

    assert_eq!(cards[0].detail("Venue"), Some(PLACEHOLDER));
    assert_eq!(cards[0].authors, PLACEHOLDER);
    assert_eq!(cards[0].link(), "#");
}

#[tokio::test]
async fn test_detail_404_is_isolated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&["p1", "gone", "p3"])))
        .mount(&mock_server)
        .await;
    mount_detail(&mock_server, "p1", "First", 1).await;
    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Paper not found"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_detail(&mock_server, "p3", "Third", 1).await;

    let pipeline = setup_pipeline(&mock_server);
    let papers = pipeline.try_search(&SearchQuery::new("x", 3).unwrap()).await.unwrap();

    assert_eq!(papers.len(), 3);
    assert!(papers[1].is_partial());
    assert!(papers[1].warning().is_some());
    assert_eq!(papers[2].title(), Ok(Some("Third")));

    let cards = cards(&papers, &Summarizer::default());
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[1].title, PLACEHOLDER);
    assert!(cards[1].warning.is_some());
}
