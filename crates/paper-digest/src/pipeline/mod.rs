//! Search-and-fetch pipeline.
//!
//! One search call, then one detail fetch per returned identifier, strictly
//! one after another. Completed searches are cached for a fixed window.

mod cache;

pub use cache::{PaperList, SearchCache};

use std::sync::Arc;

use crate::client::PaperSource;
use crate::error::SearchError;
use crate::models::{Paper, SearchQuery};

/// Orchestrates search, per-paper detail fetches, and result caching.
#[derive(Clone)]
pub struct Pipeline {
    source: Arc<dyn PaperSource>,
    cache: SearchCache,
}

impl Pipeline {
    /// Create a pipeline over `source`, caching results in `cache`.
    #[must_use]
    pub fn new(source: Arc<dyn PaperSource>, cache: SearchCache) -> Self {
        Self { source, cache }
    }

    /// The result cache.
    #[must_use]
    pub const fn cache(&self) -> &SearchCache {
        &self.cache
    }

    /// Search and fetch, reporting a failed search as empty.
    ///
    /// A search failure is logged and yields an empty list; it never
    /// propagates further.
    pub async fn search(&self, query: &SearchQuery) -> PaperList {
        match self.try_search(query).await {
            Ok(papers) => papers,
            Err(err) => {
                tracing::error!(topic = query.topic(), error = %err, "An error occurred while searching for papers");
                Arc::new(Vec::new())
            }
        }
    }

    /// Search and fetch, returning a failed search to the caller.
    ///
    /// Repeated queries within the cache window return the earlier result
    /// without touching the network.
    ///
    /// # Errors
    ///
    /// Returns the [`SearchError`] if the search call itself fails. Per-paper
    /// detail failures are not errors: those papers come back partial.
    pub async fn try_search(&self, query: &SearchQuery) -> Result<PaperList, Arc<SearchError>> {
        if let Some(papers) = self.cache.get(query).await {
            tracing::debug!(topic = query.topic(), count = query.count(), "Search cache hit");
            return Ok(papers);
        }

        self.cache.get_or_try_insert(query, async { self.run(query).await.map(Arc::new) }).await
    }

    async fn run(&self, query: &SearchQuery) -> Result<Vec<Paper>, SearchError> {
        tracing::info!(topic = query.topic(), count = query.count(), "Searching papers");

        let mut ids = self.source.search_ids(query.topic(), query.count()).await?;
        ids.truncate(usize::from(query.count()));

        let mut papers = Vec::with_capacity(ids.len());
        for id in ids {
            let mut paper = Paper::new(id);
            if let Err(err) = paper.fetch(self.source.as_ref()).await {
                tracing::warn!(paper_id = paper.id(), error = %err, "Paper details unavailable");
            }
            papers.push(paper);
        }

        let partial = papers.iter().filter(|p| p.is_partial()).count();
        tracing::info!(topic = query.topic(), papers = papers.len(), partial, "Search complete");

        Ok(papers)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline").field("cache", &self.cache).finish()
    }
}
