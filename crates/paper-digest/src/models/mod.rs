//! Data models for Semantic Scholar API entities.
//!
//! Wire models use `#[serde(default)]` for optional fields and
//! `#[serde(rename_all = "camelCase")]` to match API naming.

mod paper;
mod query;

use serde::{Deserialize, Serialize};

pub use paper::{AuthorRef, Journal, OpenAccessPdf, Paper, PaperDetails, S2FieldOfStudy};
pub use query::SearchQuery;

/// Search response wrapper. Only identifiers are requested.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    /// Total number of matching papers.
    #[serde(default)]
    pub total: i64,

    /// Papers in this page.
    #[serde(default)]
    pub data: Vec<PaperHandle>,
}

impl SearchResult {
    /// Identifiers in ranked order.
    #[must_use]
    pub fn paper_ids(self) -> Vec<String> {
        self.data.into_iter().map(|h| h.paper_id).collect()
    }
}

/// A search hit reduced to its identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperHandle {
    /// Semantic Scholar paper ID.
    pub paper_id: String,
}
