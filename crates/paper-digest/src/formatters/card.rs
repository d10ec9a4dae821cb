//! Display-ready view of a paper.

use serde::Serialize;

use crate::error::PaperError;
use crate::models::{Paper, PaperDetails};
use crate::summarizer::Summarizer;

/// Shown for every missing, null, or empty value.
pub const PLACEHOLDER: &str = "Info Not Available";

/// One labelled value in a card's detail table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    /// Row label (e.g. "Citation Count").
    pub field: &'static str,
    /// Display value, or [`PLACEHOLDER`].
    pub value: String,
}

/// Everything needed to render one paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperCard {
    /// Semantic Scholar paper ID.
    pub paper_id: String,
    /// Title, or [`PLACEHOLDER`].
    pub title: String,
    /// Canonical URL, if known.
    pub url: Option<String>,
    /// Comma-separated author names, or [`PLACEHOLDER`].
    pub authors: String,
    /// Extractive summary of the abstract.
    pub summary: String,
    /// Flattened metadata table.
    pub details: Vec<DetailRow>,
    /// Set when the paper's details could not be fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl PaperCard {
    /// Build a card from a fetched paper.
    ///
    /// # Errors
    ///
    /// Returns [`PaperError::NotFetched`] if the paper has not been fetched.
    pub fn from_paper(paper: &Paper, summarizer: &Summarizer) -> Result<Self, PaperError> {
        let details = paper.details()?;

        Ok(Self {
            paper_id: paper.id().to_string(),
            title: or_placeholder(details.title.clone()),
            url: details.url.clone().filter(|u| !u.trim().is_empty()),
            authors: or_placeholder(Some(details.author_names())),
            summary: summarizer.summarize(details.abstract_text()),
            details: detail_rows(details),
            warning: paper.warning().map(str::to_string),
        })
    }

    /// Value of the detail row labelled `field`.
    #[must_use]
    pub fn detail(&self, field: &str) -> Option<&str> {
        self.details.iter().find(|r| r.field == field).map(|r| r.value.as_str())
    }

    /// Link target for the title: the URL, or `#` when unknown.
    #[must_use]
    pub fn link(&self) -> &str {
        self.url.as_deref().unwrap_or("#")
    }
}

/// Build cards for a result set, skipping papers that were never fetched.
#[must_use]
pub fn cards(papers: &[Paper], summarizer: &Summarizer) -> Vec<PaperCard> {
    papers
        .iter()
        .filter_map(|p| match PaperCard::from_paper(p, summarizer) {
            Ok(card) => Some(card),
            Err(err) => {
                tracing::warn!(error = %err, "Skipping paper");
                None
            }
        })
        .collect()
}

fn detail_rows(d: &PaperDetails) -> Vec<DetailRow> {
    let row = |field: &'static str, value: Option<String>| DetailRow { field, value: or_placeholder(value) };

    vec![
        row("Year", d.year.map(|y| y.to_string())),
        row("Venue", d.venue.clone()),
        row("Open Access PDF", d.pdf_url().map(str::to_string)),
        row("Reference Count", d.reference_count.map(|c| c.to_string())),
        row("Citation Count", d.citation_count.map(|c| c.to_string())),
        row("Influential Citation Count", d.influential_citation_count.map(|c| c.to_string())),
        row("Is Open Access", d.is_open_access.map(|b| b.to_string())),
        row("Fields of Study", d.fields_of_study.as_deref().map(join)),
        row("Publication Types", d.publication_types.as_deref().map(join)),
        row("Publication Date", d.publication_date.map(|date| date.format("%Y-%m-%d").to_string())),
        row("Journal", d.journal.as_ref().and_then(|j| j.display())),
    ]
}

fn join(values: &[String]) -> String {
    values.join(", ")
}

fn or_placeholder(value: Option<String>) -> String {
    value.filter(|v| !v.trim().is_empty()).unwrap_or_else(|| PLACEHOLDER.to_string())
}
