use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::request::Parts,
    Json,
};
use common::types::Message;
use serde::Deserialize;
use service::Identity;
use tracing::{info, warn};

use crate::{
    errors::{require, ApiError, JsonBody},
    metrics,
    state::AppState,
};

/// Header carrying the claimed username on gated routes.
pub const USERNAME_HEADER: &str = "username";

#[derive(Debug, Deserialize)]
pub struct CredentialsInput {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl CredentialsInput {
    fn into_parts(self) -> Result<(String, String), ApiError> {
        let username = require(self.username, "Username and password are required.")?;
        let password = require(self.password, "Username and password are required.")?;
        Ok((username, password))
    }
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CredentialsInput>,
) -> Result<Json<Message>, ApiError> {
    let (username, password) = input.into_parts()?;
    state.store.write().await.register(&username, &password)?;
    Ok(Json(Message::new("User registered successfully.")))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CredentialsInput>,
) -> Result<Json<Message>, ApiError> {
    let (username, password) = input.into_parts()?;
    let store = state.store.read().await;
    store.authenticate(&username, &password)?;
    info!(%username, "login_ok");
    Ok(Json(Message::new("Login successful.")))
}

/// Registration gate for review mutations.
///
/// Resolves the `username` header against the user directory; handlers that
/// take this extractor never run for unknown or missing usernames.
#[derive(Debug, Clone)]
pub struct RegisteredUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for RegisteredUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let claimed = parts.headers.get(USERNAME_HEADER).and_then(|v| v.to_str().ok());
        let store = state.store.read().await;
        match store.resolve_identity(claimed) {
            Ok(identity) => Ok(RegisteredUser(identity)),
            Err(e) => {
                warn!(path = %parts.uri.path(), claimed = claimed.unwrap_or(""), "unregistered user rejected");
                metrics::GATE_REJECTIONS_TOTAL.inc();
                Err(e.into())
            }
        }
    }
}
