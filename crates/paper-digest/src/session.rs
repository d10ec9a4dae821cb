//! Per-user dashboard state.
//!
//! The pipeline itself is stateless apart from its cache; the result set a
//! user is looking at, and any error shown above it, live here and are owned
//! by whoever drives the UI.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use tokio::sync::Mutex;

use crate::config::api;
use crate::error::ValidationError;
use crate::models::{Paper, SearchQuery};
use crate::pipeline::{PaperList, Pipeline};

/// Reply to a valid question. Answering is not implemented.
pub const QUESTION_PLACEHOLDER: &str = "Answer to your question...";

/// The current result set and the banner shown above it.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    papers: PaperList,
    query: Option<SearchQuery>,
    searched_at: Option<DateTime<Utc>>,
    banner: Option<String>,
}

impl DashboardSession {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self { papers: Arc::new(Vec::new()), query: None, searched_at: None, banner: None }
    }

    /// Papers currently shown.
    #[must_use]
    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    /// Query that produced the current papers.
    #[must_use]
    pub const fn query(&self) -> Option<&SearchQuery> {
        self.query.as_ref()
    }

    /// When the current papers were loaded.
    #[must_use]
    pub fn searched_at(&self) -> Option<DateTime<Utc>> {
        self.searched_at
    }

    /// Error message to show, if the last action failed.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Warnings for papers whose details could not be fetched.
    #[must_use]
    pub fn warnings(&self) -> Vec<&str> {
        self.papers.iter().filter_map(Paper::warning).collect()
    }

    /// Run a search from raw form input.
    ///
    /// On success the result set is replaced and the banner cleared. On a
    /// validation or search failure the banner is set and the previous
    /// results stay in place.
    ///
    /// Returns true if the result set was replaced.
    pub async fn submit(&mut self, pipeline: &Pipeline, topic: &str, count: i64) -> bool {
        let outcome = SearchOutcome::run(pipeline, topic, count).await;
        self.apply(outcome)
    }

    /// Apply a finished search. Returns true if the result set was replaced.
    pub fn apply(&mut self, outcome: SearchOutcome) -> bool {
        match outcome {
            SearchOutcome::Found { query, papers } => {
                self.papers = papers;
                self.query = Some(query);
                self.searched_at = Some(Utc::now());
                self.banner = None;
                true
            }
            SearchOutcome::Failed(message) => {
                self.banner = Some(message);
                false
            }
        }
    }

    /// Ask a question about the current papers.
    ///
    /// Only the input is checked; answering is a placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyQuestion`] for blank input and
    /// [`ValidationError::NoResults`] when no papers are loaded. Either
    /// also sets the banner.
    pub fn ask(&mut self, question: &str) -> Result<&'static str, ValidationError> {
        let outcome = if question.trim().is_empty() {
            Err(ValidationError::EmptyQuestion)
        } else if self.papers.is_empty() {
            Err(ValidationError::NoResults)
        } else {
            Ok(QUESTION_PLACEHOLDER)
        };

        self.banner = outcome.as_ref().err().map(ToString::to_string);
        outcome
    }
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new()
    }
}

/// A dashboard search, run independently of any session.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// Papers for a valid query.
    Found {
        /// The validated query.
        query: SearchQuery,
        /// Its papers, in search order.
        papers: PaperList,
    },
    /// Banner text for a validation or search failure.
    Failed(String),
}

impl SearchOutcome {
    /// Validate raw form input and run the search.
    pub async fn run(pipeline: &Pipeline, topic: &str, count: i64) -> Self {
        let query = match SearchQuery::new(topic, count) {
            Ok(query) => query,
            Err(err) => return Self::Failed(err.to_string()),
        };

        match pipeline.try_search(&query).await {
            Ok(papers) => Self::Found { query, papers },
            Err(err) => {
                tracing::error!(topic = query.topic(), error = %err, "Search failed");
                Self::Failed(format!("An error occurred while searching for papers: {err}"))
            }
        }
    }
}

/// A session shared between the requests of one visitor.
pub type SharedSession = Arc<Mutex<DashboardSession>>;

/// Dashboard sessions keyed by an opaque id.
///
/// Sessions idle for longer than the configured period are dropped.
#[derive(Clone)]
pub struct SessionManager {
    sessions: Cache<String, SharedSession>,
}

impl SessionManager {
    /// Create a manager holding at most `max_sessions` sessions.
    #[must_use]
    pub fn new(idle: Duration, max_sessions: u64) -> Self {
        let sessions = Cache::builder().max_capacity(max_sessions).time_to_idle(idle).build();
        Self { sessions }
    }

    /// Session stored under `id`, or a new empty one under a fresh id when
    /// `id` is absent or unknown. Returns the id actually in use.
    pub async fn get_or_create(&self, id: Option<&str>) -> (String, SharedSession) {
        if let Some(id) = id {
            if let Some(session) = self.sessions.get(id).await {
                return (id.to_string(), session);
            }
        }

        let id = uuid::Uuid::new_v4().simple().to_string();
        let session = Arc::new(Mutex::new(DashboardSession::new()));
        self.sessions.insert(id.clone(), Arc::clone(&session)).await;
        tracing::debug!(session_id = %id, "Created dashboard session");
        (id, session)
    }

    /// Number of live sessions (approximate).
    #[must_use]
    pub fn session_count(&self) -> u64 {
        self.sessions.entry_count()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(api::SESSION_IDLE, api::MAX_SESSIONS)
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").field("sessions", &self.sessions.entry_count()).finish()
    }
}
