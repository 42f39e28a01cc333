use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::sessions::resolve_bearer_token;
use crate::errors::AppError;
use crate::state::AppState;

/// The caller's resolved identity. Every owner-scoped handler takes this
/// extractor; a user id is never read from the request body or query.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        resolve_bearer_token(&state.db, token)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}
