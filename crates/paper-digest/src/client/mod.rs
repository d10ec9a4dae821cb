//! Semantic Scholar API client.
//!
//! Provides the two remote calls the pipeline needs:
//! - paper search, reduced to identifiers
//! - per-paper detail lookup with an explicit field list
//!
//! Each call is a single attempt. Failures are classified by status and
//! returned to the caller; nothing is retried.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::{PaperDetails, SearchResult};

/// Remote source of papers.
///
/// The pipeline depends on this seam rather than on [`ScholarClient`]
/// directly so that it can be driven by in-memory sources.
#[async_trait]
pub trait PaperSource: Send + Sync {
    /// Search for papers matching `topic`, returning at most `limit` identifiers.
    async fn search_ids(&self, topic: &str, limit: u8) -> ClientResult<Vec<String>>;

    /// Fetch the requested `fields` of one paper.
    async fn fetch_details(&self, paper_id: &str, fields: &[&str]) -> ClientResult<PaperDetails>;
}

/// Semantic Scholar Graph API client.
#[derive(Clone)]
pub struct ScholarClient {
    /// HTTP client.
    client: Client,

    /// API key (optional).
    api_key: Option<String>,

    /// Graph API base URL.
    graph_api_url: Url,
}

impl ScholarClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or HTTP client
    /// initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();

        if let Some(ref key) = config.api_key {
            headers.insert("x-api-key", key.parse()?);
        }

        let mut builder = Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .gzip(true);

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let graph_api_url = Url::parse(&config.graph_api_url)?;
        if graph_api_url.cannot_be_a_base() {
            anyhow::bail!("graph API URL cannot be used as a base: {}", config.graph_api_url);
        }

        Ok(Self { client: builder.build()?, api_key: config.api_key, graph_api_url })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search for papers.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn search_papers(&self, query: &str, limit: u8) -> ClientResult<SearchResult> {
        let url = self.endpoint(&["paper", "search"]);
        let params = [("query", query.to_string()), ("limit", limit.to_string())];

        self.get(url, &params).await
    }

    /// Get a single paper by ID.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-2xx response.
    pub async fn get_paper(&self, paper_id: &str, fields: &[&str]) -> ClientResult<PaperDetails> {
        let url = self.endpoint(&["paper", paper_id]);
        let params = [("fields", fields.join(","))];

        self.get(url, &params).await
    }

    /// Build an endpoint URL under the Graph API base, encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.graph_api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Make a GET request.
    async fn get<T>(&self, url: Url, params: &[(&str, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(url).query(params).send().await?;
        let response = Self::handle_response(response).await?;
        let value: serde_json::Value = response.json().await?;

        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

#[async_trait]
impl PaperSource for ScholarClient {
    async fn search_ids(&self, topic: &str, limit: u8) -> ClientResult<Vec<String>> {
        let result = self.search_papers(topic, limit).await?;
        let mut ids = result.paper_ids();
        ids.truncate(usize::from(limit));
        Ok(ids)
    }

    async fn fetch_details(&self, paper_id: &str, fields: &[&str]) -> ClientResult<PaperDetails> {
        self.get_paper(paper_id, fields).await
    }
}

impl std::fmt::Debug for ScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScholarClient")
            .field("graph_api_url", &self.graph_api_url.as_str())
            .field("has_api_key", &self.has_api_key())
            .finish()
    }
}
