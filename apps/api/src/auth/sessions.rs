use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::tokens::{generate_session_token, hash_token};

const SESSION_TTL_DAYS: i64 = 30;

/// Creates a server-side session and returns the raw bearer token.
/// Only the SHA-256 digest of the token is stored.
pub async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<String, sqlx::Error> {
    let token = generate_session_token();
    let expires_at = Utc::now() + Duration::days(SESSION_TTL_DAYS);

    sqlx::query("INSERT INTO sessions (token_hash, user_id, expires_at) VALUES ($1, $2, $3)")
        .bind(hash_token(&token))
        .bind(user_id)
        .bind(expires_at)
        .execute(pool)
        .await?;

    Ok(token)
}

/// Resolves a raw bearer token to its user, skipping expired sessions.
pub async fn resolve_bearer_token(
    pool: &PgPool,
    token: &str,
) -> Result<Option<AuthUser>, sqlx::Error> {
    sqlx::query_as::<_, AuthUser>(
        r#"
        SELECT u.id, u.email, u.name
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token_hash = $1 AND s.expires_at > now()
        "#,
    )
    .bind(hash_token(token))
    .fetch_optional(pool)
    .await
}
