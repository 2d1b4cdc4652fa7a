use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::{metrics, state::AppState};

pub mod auth;
pub mod books;
pub mod proxy;
pub mod reviews;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: catalog browsing, accounts, gated
/// review mutations, and the upstream proxy routes.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::metrics_handler));

    let catalog = Router::new()
        .route("/books", get(books::list_books))
        .route("/books/:isbn", get(books::get_book))
        .route("/books/author/:author", get(books::books_by_author))
        .route("/books/title/:title", get(books::books_by_title))
        // GET is open; POST/DELETE require a RegisteredUser in their signature
        .route(
            "/books/review/:isbn",
            get(books::get_reviews)
                .post(reviews::upsert_review)
                .delete(reviews::delete_review),
        );

    let accounts = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let upstream = Router::new()
        .route("/async-books", get(proxy::async_books))
        .route("/promise-isbn/:isbn", get(proxy::promise_isbn))
        .route("/promise-author/:author", get(proxy::promise_author))
        .route("/promise-title/:title", get(proxy::promise_title))
        .route("/submit-link", post(proxy::submit_link));

    public
        .merge(catalog)
        .merge(accounts)
        .merge(upstream)
        .with_state(state)
        .layer(middleware::from_fn(metrics::track_requests))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
