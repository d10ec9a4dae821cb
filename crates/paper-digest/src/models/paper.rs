//! Paper data model matching Semantic Scholar API schema.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::client::PaperSource;
use crate::config::fields;
use crate::error::{DetailFetchError, PaperError};

/// Metadata returned by the per-paper detail endpoint.
///
/// Every field is optional: the API omits fields it has no value for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperDetails {
    /// Semantic Scholar paper ID (echoed back by the API).
    #[serde(default)]
    pub paper_id: Option<String>,

    /// Paper title.
    #[serde(default)]
    pub title: Option<String>,

    /// Canonical Semantic Scholar URL.
    #[serde(default)]
    pub url: Option<String>,

    /// Publication year.
    #[serde(default)]
    pub year: Option<i32>,

    /// Paper abstract.
    #[serde(default)]
    pub r#abstract: Option<String>,

    /// List of authors, in byline order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub authors: Vec<AuthorRef>,

    /// Publication venue (journal or conference).
    #[serde(default)]
    pub venue: Option<String>,

    /// Number of references in this paper.
    #[serde(default)]
    pub reference_count: Option<i32>,

    /// Number of citations this paper has received.
    #[serde(default)]
    pub citation_count: Option<i32>,

    /// Influential citation count.
    #[serde(default)]
    pub influential_citation_count: Option<i32>,

    /// Whether this paper is open access.
    #[serde(default)]
    pub is_open_access: Option<bool>,

    /// Fields of study (e.g., "Computer Science", "Medicine").
    #[serde(default)]
    pub fields_of_study: Option<Vec<String>>,

    /// Fields of study with their classifier source.
    #[serde(default)]
    pub s2_fields_of_study: Option<Vec<S2FieldOfStudy>>,

    /// Publication types (e.g., "JournalArticle", "Review").
    #[serde(default)]
    pub publication_types: Option<Vec<String>>,

    /// Publication date. Values that are not `YYYY-MM-DD` are dropped.
    #[serde(default, deserialize_with = "lenient_date")]
    pub publication_date: Option<NaiveDate>,

    /// Journal the paper appeared in.
    #[serde(default)]
    pub journal: Option<Journal>,

    /// Open access PDF information.
    #[serde(default)]
    pub open_access_pdf: Option<OpenAccessPdf>,
}

impl PaperDetails {
    /// Get the open access PDF URL if available.
    #[must_use]
    pub fn pdf_url(&self) -> Option<&str> {
        self.open_access_pdf.as_ref()?.url.as_deref().filter(|u| !u.is_empty())
    }

    /// Get the abstract if it has any non-whitespace text.
    #[must_use]
    pub fn abstract_text(&self) -> Option<&str> {
        self.r#abstract.as_deref().filter(|a| !a.trim().is_empty())
    }

    /// Get author names as a comma-separated string.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .filter_map(|a| a.name.as_deref())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Minimal author reference embedded in a paper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    /// Author ID.
    #[serde(default)]
    pub author_id: Option<String>,

    /// Author name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Journal information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    /// Journal name.
    #[serde(default)]
    pub name: Option<String>,

    /// Volume, as printed by the journal.
    #[serde(default)]
    pub volume: Option<String>,

    /// Page range.
    #[serde(default)]
    pub pages: Option<String>,
}

impl Journal {
    /// Name and volume joined by a space, skipping empty parts.
    ///
    /// The space is deliberate: `ArXiv abs/1706.03762`, not the run-together
    /// `ArXivabs/1706.03762`.
    #[must_use]
    pub fn display(&self) -> Option<String> {
        let parts: Vec<&str> = [self.name.as_deref(), self.volume.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if parts.is_empty() { None } else { Some(parts.join(" ")) }
    }
}

/// Open access PDF information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAccessPdf {
    /// Direct URL to the PDF.
    #[serde(default)]
    pub url: Option<String>,

    /// Status of open access.
    #[serde(default)]
    pub status: Option<String>,
}

/// Field of study tagged by a specific classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct S2FieldOfStudy {
    /// Category name.
    #[serde(default)]
    pub category: Option<String>,

    /// Source of the tag ("external" or "s2-fos-model").
    #[serde(default)]
    pub source: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
}

/// Where a paper is in its fetch lifecycle.
#[derive(Debug, Clone, PartialEq)]
enum FetchState {
    /// Only the identifier is known.
    Unfetched,
    /// Details attached.
    Fetched(Box<PaperDetails>),
    /// The detail fetch failed; attributes read as absent.
    Partial { details: Box<PaperDetails>, warning: String },
}

/// A paper returned by a search.
///
/// Created with only an identifier; attributes become readable once the
/// detail fetch has run, successfully or not. Both outcomes are terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct Paper {
    paper_id: String,
    state: FetchState,
}

impl Paper {
    /// Create an unfetched paper.
    #[must_use]
    pub fn new(paper_id: impl Into<String>) -> Self {
        Self { paper_id: paper_id.into(), state: FetchState::Unfetched }
    }

    /// Create a paper with its details already attached.
    #[must_use]
    pub fn fetched(paper_id: impl Into<String>, details: PaperDetails) -> Self {
        Self { paper_id: paper_id.into(), state: FetchState::Fetched(Box::new(details)) }
    }

    /// The Semantic Scholar identifier. Always readable.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.paper_id
    }

    /// True once details (or a failure) have been recorded.
    #[must_use]
    pub const fn is_fetched(&self) -> bool {
        !matches!(self.state, FetchState::Unfetched)
    }

    /// True if the detail fetch failed and attributes read as absent.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        matches!(self.state, FetchState::Partial { .. })
    }

    /// Warning recorded when the detail fetch failed.
    #[must_use]
    pub fn warning(&self) -> Option<&str> {
        match &self.state {
            FetchState::Partial { warning, .. } => Some(warning),
            _ => None,
        }
    }

    /// Attach fetched details.
    ///
    /// # Errors
    ///
    /// Returns [`PaperError::AlreadyFetched`] if details or a failure were
    /// already recorded.
    pub fn attach(&mut self, details: PaperDetails) -> Result<(), PaperError> {
        self.ensure_unfetched()?;
        self.state = FetchState::Fetched(Box::new(details));
        Ok(())
    }

    /// Record a failed detail fetch. Attributes then read as absent.
    ///
    /// # Errors
    ///
    /// Returns [`PaperError::AlreadyFetched`] if the paper is not unfetched.
    pub fn mark_partial(&mut self, warning: impl Into<String>) -> Result<(), PaperError> {
        self.ensure_unfetched()?;
        self.state = FetchState::Partial {
            details: Box::default(),
            warning: warning.into(),
        };
        Ok(())
    }

    /// Run the detail fetch and record its outcome.
    ///
    /// A failed request leaves the paper partial, with the failure as its
    /// warning, and is returned so the caller can surface it.
    ///
    /// # Errors
    ///
    /// Returns [`DetailFetchError::Request`] if the detail request fails, or
    /// [`DetailFetchError::Lifecycle`] if the paper was already fetched.
    pub async fn fetch(&mut self, source: &dyn PaperSource) -> Result<(), DetailFetchError> {
        self.ensure_unfetched()?;

        match source.fetch_details(&self.paper_id, fields::DETAIL).await {
            Ok(details) => {
                self.attach(details)?;
                Ok(())
            }
            Err(cause) => {
                let err = DetailFetchError::Request { paper_id: self.paper_id.clone(), source: cause };
                self.mark_partial(err.to_string())?;
                Err(err)
            }
        }
    }

    /// All attributes.
    ///
    /// # Errors
    ///
    /// Returns [`PaperError::NotFetched`] before the fetch step has run.
    pub fn details(&self) -> Result<&PaperDetails, PaperError> {
        match &self.state {
            FetchState::Unfetched => Err(PaperError::NotFetched { paper_id: self.paper_id.clone() }),
            FetchState::Fetched(details) | FetchState::Partial { details, .. } => Ok(&**details),
        }
    }

    /// Paper title.
    ///
    /// # Errors
    ///
    /// Returns [`PaperError::NotFetched`] before the fetch step has run.
    pub fn title(&self) -> Result<Option<&str>, PaperError> {
        Ok(self.details()?.title.as_deref())
    }

    /// Canonical URL.
    ///
    /// # Errors
    ///
    /// Returns [`PaperError::NotFetched`] before the fetch step has run.
    pub fn url(&self) -> Result<Option<&str>, PaperError> {
        Ok(self.details()?.url.as_deref())
    }

    /// Abstract text, if non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`PaperError::NotFetched`] before the fetch step has run.
    pub fn abstract_text(&self) -> Result<Option<&str>, PaperError> {
        Ok(self.details()?.abstract_text())
    }

    /// Author names as a comma-separated string.
    ///
    /// # Errors
    ///
    /// Returns [`PaperError::NotFetched`] before the fetch step has run.
    pub fn author_names(&self) -> Result<String, PaperError> {
        Ok(self.details()?.author_names())
    }

    fn ensure_unfetched(&self) -> Result<(), PaperError> {
        if self.is_fetched() {
            return Err(PaperError::AlreadyFetched { paper_id: self.paper_id.clone() });
        }
        Ok(())
    }
}
