use axum::{
    extract::{Path, State},
    Json,
};
use common::types::Message;
use serde::Deserialize;

use crate::{
    errors::{require, ApiError, JsonBody},
    metrics,
    routes::auth::RegisteredUser,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ReviewInput {
    #[serde(default)]
    pub review: Option<String>,
}

pub async fn upsert_review(
    RegisteredUser(identity): RegisteredUser,
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    JsonBody(input): JsonBody<ReviewInput>,
) -> Result<Json<Message>, ApiError> {
    let text = require(input.review, "Review text is required.")?;
    let outcome = state.store.write().await.upsert_review(&identity, &isbn, &text)?;
    metrics::REVIEW_MUTATIONS_TOTAL.with_label_values(&[outcome.as_str()]).inc();
    Ok(Json(Message::new("Review added/modified successfully.")))
}

pub async fn delete_review(
    RegisteredUser(identity): RegisteredUser,
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<Message>, ApiError> {
    state.store.write().await.delete_review(&identity, &isbn)?;
    metrics::REVIEW_MUTATIONS_TOTAL.with_label_values(&["deleted"]).inc();
    Ok(Json(Message::new("Review deleted successfully.")))
}
