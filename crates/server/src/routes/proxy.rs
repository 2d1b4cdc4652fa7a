//! Routes that forward to the external book API and never touch the bookstore.

use axum::{
    extract::{Path, State},
    Json,
};
use common::{types::Message, UpstreamError};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    errors::{ApiError, JsonBody},
    metrics,
    state::AppState,
};

type ProxyResult = Result<Json<serde_json::Value>, ApiError>;

fn upstream_failure(route: &str, e: UpstreamError, mapped: ApiError) -> ApiError {
    warn!(route, err = %e, status = mapped.status.as_u16(), "upstream call failed");
    metrics::UPSTREAM_ERRORS_TOTAL.with_label_values(&[route]).inc();
    mapped
}

pub async fn async_books(State(state): State<AppState>) -> ProxyResult {
    state
        .upstream
        .fetch_books()
        .await
        .map(Json)
        .map_err(|e| upstream_failure("async-books", e, ApiError::internal("Internal Server Error.")))
}

pub async fn promise_isbn(State(state): State<AppState>, Path(isbn): Path<String>) -> ProxyResult {
    state
        .upstream
        .fetch_by_isbn(&isbn)
        .await
        .map(Json)
        .map_err(|e| upstream_failure("promise-isbn", e, ApiError::not_found("Book not found.")))
}

pub async fn promise_author(State(state): State<AppState>, Path(author): Path<String>) -> ProxyResult {
    state
        .upstream
        .fetch_by_author(&author)
        .await
        .map(Json)
        .map_err(|e| upstream_failure("promise-author", e, ApiError::not_found("Books not found.")))
}

pub async fn promise_title(State(state): State<AppState>, Path(title): Path<String>) -> ProxyResult {
    state
        .upstream
        .fetch_by_title(&title)
        .await
        .map(Json)
        .map_err(|e| upstream_failure("promise-title", e, ApiError::not_found("Books not found.")))
}

#[derive(Debug, Deserialize)]
pub struct SubmitLinkInput {
    #[serde(rename = "githubLink", default)]
    pub github_link: Option<String>,
}

/// Acknowledge a project link; it is logged and not processed further.
pub async fn submit_link(JsonBody(input): JsonBody<SubmitLinkInput>) -> Json<Message> {
    info!(github_link = input.github_link.as_deref().unwrap_or(""), "link_submitted");
    Json(Message::new("GitHub link submitted successfully."))
}
