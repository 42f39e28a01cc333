use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::sessions::create_session;
use crate::auth::tokens::{generate_reset_token, hash_token};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    req.validate()
        .map_err(|e| AppError::from_validation_errors(&e))?;

    let email = req.email.trim().to_lowercase();

    let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if exists.is_some() {
        return Err(AppError::BadRequest("User already exists".to_string()));
    }

    let password_hash =
        hash_password(&req.password).map_err(|e| AppError::Hashing(e.to_string()))?;

    let user: User = sqlx::query_as(
        "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(req.name.trim())
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await?;

    let token = create_session(&state.db, user.id).await?;

    info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    req.validate()
        .map_err(|e| AppError::from_validation_errors(&e))?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(req.email.trim().to_lowercase())
        .fetch_optional(&state.db)
        .await?;

    let Some(user) = user else {
        return Err(AppError::Unauthorized);
    };

    let verified = verify_password(&req.password, &user.password_hash)
        .map_err(|e| AppError::Hashing(e.to_string()))?;
    if !verified {
        return Err(AppError::Unauthorized);
    }

    let token = create_session(&state.db, user.id).await?;

    Ok(Json(AuthResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        token,
    }))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Result<Json<User>, AppError> {
    let user: User = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(auth.id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(user))
}

/// POST /api/auth/forgot-password
///
/// Responds identically whether or not the email exists, so the endpoint
/// cannot be used to probe for accounts.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    req.validate()
        .map_err(|e| AppError::from_validation_errors(&e))?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(req.email.trim().to_lowercase())
        .fetch_optional(&state.db)
        .await?;

    if let Some(user) = user {
        let raw_token = generate_reset_token();

        sqlx::query(
            r#"
            UPDATE users
            SET reset_token_hash = $1, reset_token_expires = now() + interval '1 hour'
            WHERE id = $2
            "#,
        )
        .bind(hash_token(&raw_token))
        .bind(user.id)
        .execute(&state.db)
        .await?;

        let reset_link = format!(
            "{}/reset-password?token={}",
            state.config.client_url, raw_token
        );

        state
            .mailer
            .send_password_reset(user.email.clone(), user.name.clone(), reset_link)
            .await
            .map_err(|e| AppError::Email(e.to_string()))?;

        info!("Sent password reset email for user {}", user.id);
    }

    Ok(Json(
        json!({"message": "If the email exists, a reset link was sent."}),
    ))
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    req.validate()
        .map_err(|e| AppError::from_validation_errors(&e))?;

    let user: Option<User> = sqlx::query_as(
        "SELECT * FROM users WHERE reset_token_hash = $1 AND reset_token_expires > now()",
    )
    .bind(hash_token(&req.token))
    .fetch_optional(&state.db)
    .await?;

    let Some(user) = user else {
        return Err(AppError::BadRequest("Invalid or expired token".to_string()));
    };

    let password_hash =
        hash_password(&req.password).map_err(|e| AppError::Hashing(e.to_string()))?;

    sqlx::query(
        r#"
        UPDATE users
        SET password_hash = $1, reset_token_hash = NULL, reset_token_expires = NULL
        WHERE id = $2
        "#,
    )
    .bind(&password_hash)
    .bind(user.id)
    .execute(&state.db)
    .await?;

    Ok(Json(
        json!({"message": "Password has been reset successfully"}),
    ))
}

/// DELETE /api/auth/delete
///
/// Cascade order matters: applications first, then sessions, then the
/// user row, all inside one transaction.
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, AppError> {
    let mut tx = state.db.begin().await?;

    sqlx::query("DELETE FROM applications WHERE user_id = $1")
        .bind(auth.id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM sessions WHERE user_id = $1")
        .bind(auth.id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(auth.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!("Deleted user {} and all owned applications", auth.id);

    Ok(Json(
        json!({"message": "User and all jobs deleted successfully"}),
    ))
}
