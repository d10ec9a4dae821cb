//! HTTP routes for the dashboard and JSON API.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use super::html;
use crate::config::api;
use crate::formatters::{cards, cards_to_json};
use crate::models::SearchQuery;
use crate::pipeline::Pipeline;
use crate::session::{DashboardSession, SearchOutcome, SessionManager, SharedSession};
use crate::summarizer::Summarizer;

/// Cookie carrying the dashboard session id.
pub const SESSION_COOKIE: &str = "paper_digest_session";

/// Query parameters for the search endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Topic to search for.
    #[serde(default)]
    topic: String,
    /// Number of papers to fetch.
    count: Option<i64>,
}

impl SearchParams {
    fn count(&self) -> i64 {
        self.count.unwrap_or_else(|| i64::from(api::DEFAULT_RESULTS))
    }
}

/// Query parameters for the question endpoint.
#[derive(Debug, Deserialize)]
pub struct AskParams {
    #[serde(default)]
    question: String,
}

/// Shared state for HTTP handlers.
pub struct AppState {
    /// Search pipeline and its result cache, shared by every visitor.
    pub pipeline: Pipeline,
    /// Summarizer applied when rendering cards.
    pub summarizer: Summarizer,
    /// One dashboard session per visitor, keyed by the session cookie.
    pub sessions: SessionManager,
}

impl AppState {
    /// Create handler state with an empty session table.
    #[must_use]
    pub fn new(pipeline: Pipeline, summarizer: Summarizer) -> Self {
        Self { pipeline, summarizer, sessions: SessionManager::default() }
    }

    /// Session for the visitor sending `jar`, plus the jar to send back.
    pub async fn session(&self, jar: CookieJar) -> (CookieJar, SharedSession) {
        let id = jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_string());
        let (id, session) = self.sessions.get_or_create(id.as_deref()).await;
        let cookie = Cookie::build((SESSION_COOKIE, id)).path("/").http_only(true).same_site(SameSite::Lax);
        (jar.add(cookie), session)
    }
}

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", get(search_page))
        .route("/ask", get(ask_page))
        .route("/api/search", get(search_api))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "paper-digest",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.sessions.session_count()
    }))
}

async fn index(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, session) = state.session(jar).await;
    let session = session.lock().await;
    (jar, render(&state, &session, None))
}

/// The search runs without the session lock held.
async fn search_page(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<SearchParams>,
) -> (CookieJar, Html<String>) {
    let (jar, session) = state.session(jar).await;
    let outcome = SearchOutcome::run(&state.pipeline, &params.topic, params.count()).await;

    let mut session = session.lock().await;
    session.apply(outcome);
    (jar, render(&state, &session, None))
}

async fn ask_page(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<AskParams>,
) -> (CookieJar, Html<String>) {
    let (jar, session) = state.session(jar).await;
    let mut session = session.lock().await;
    let answer = session.ask(&params.question).ok();
    (jar, render(&state, &session, answer))
}

/// Run a search without touching the dashboard session.
async fn search_api(State(state): State<Arc<AppState>>, Query(params): Query<SearchParams>) -> Response {
    let query = match SearchQuery::new(&params.topic, params.count()) {
        Ok(query) => query,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, &err.to_string()),
    };

    match state.pipeline.try_search(&query).await {
        Ok(papers) => Json(cards_to_json(&cards(&papers, &state.summarizer))).into_response(),
        Err(err) => {
            tracing::error!(topic = query.topic(), error = %err, "Search failed");
            error_response(
                StatusCode::BAD_GATEWAY,
                &format!("An error occurred while searching for papers: {err}"),
            )
        }
    }
}

fn render(state: &AppState, session: &DashboardSession, answer: Option<&str>) -> Html<String> {
    let cards = cards(session.papers(), &state.summarizer);
    Html(html::render_page(session, &cards, answer))
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
