use axum::{
    extract::{Path, State},
    Json,
};
use service::{Book, Review};

use crate::{errors::ApiError, state::AppState};

pub async fn list_books(State(state): State<AppState>) -> Json<Vec<Book>> {
    let store = state.store.read().await;
    Json(store.catalog().list_all().to_vec())
}

pub async fn get_book(State(state): State<AppState>, Path(isbn): Path<String>) -> Result<Json<Book>, ApiError> {
    let store = state.store.read().await;
    let book = store.catalog().find_by_isbn(&isbn)?;
    Ok(Json(book.clone()))
}

pub async fn books_by_author(State(state): State<AppState>, Path(author): Path<String>) -> Json<Vec<Book>> {
    let store = state.store.read().await;
    Json(store.catalog().find_by_author(&author).into_iter().cloned().collect())
}

pub async fn books_by_title(State(state): State<AppState>, Path(title): Path<String>) -> Json<Vec<Book>> {
    let store = state.store.read().await;
    let books: Vec<Book> = store.catalog().find_by_title(&title).into_iter().cloned().collect();
    tracing::debug!(%title, count = books.len(), "title lookup");
    Json(books)
}

pub async fn get_reviews(State(state): State<AppState>, Path(isbn): Path<String>) -> Result<Json<Vec<Review>>, ApiError> {
    let store = state.store.read().await;
    let reviews = store.catalog().get_reviews(&isbn)?;
    Ok(Json(reviews.to_vec()))
}
