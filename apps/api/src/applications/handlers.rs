use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::applications::aggregation::{self, MonthCount};
use crate::applications::followups;
use crate::applications::models::{ApplicationPayload, ApplicationRecord};
use crate::applications::service;
use crate::applications::validation::{validate_create, validate_patch};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;

fn not_found() -> AppError {
    AppError::NotFound("Application not found".to_string())
}

/// POST /api/applications
pub async fn create_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ApplicationPayload>,
) -> Result<(StatusCode, Json<ApplicationRecord>), AppError> {
    let input = validate_create(payload).map_err(AppError::Validation)?;
    let record = service::create(&state.db, auth.id, input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/applications
pub async fn list_applications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ApplicationRecord>>, AppError> {
    let records = service::list(&state.db, auth.id).await?;
    Ok(Json(records))
}

/// GET /api/applications/:id
pub async fn get_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationRecord>, AppError> {
    let record = service::get(&state.db, auth.id, id).await?.ok_or_else(not_found)?;
    Ok(Json(record))
}

/// PUT /api/applications/:id
pub async fn update_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApplicationPayload>,
) -> Result<Json<ApplicationRecord>, AppError> {
    let patch = validate_patch(payload).map_err(AppError::Validation)?;
    let record = service::update(&state.db, auth.id, id, patch)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(record))
}

/// DELETE /api/applications/:id
pub async fn delete_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let deleted = service::delete(&state.db, auth.id, id).await?.ok_or_else(not_found)?;
    Ok(Json(json!({
        "message": "Application deleted",
        "deletedId": deleted
    })))
}

/// PUT /api/applications/:id/followup-toggle
pub async fn toggle_follow_up(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationRecord>, AppError> {
    let record = service::toggle_follow_up(&state.db, auth.id, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(record))
}

/// GET /api/applications/followups/due
pub async fn due_follow_ups(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ApplicationRecord>>, AppError> {
    let as_of = Utc::now().date_naive();
    let records = followups::due(&state.db, auth.id, as_of).await?;
    Ok(Json(records))
}

/// GET /api/applications/dashboard/count
pub async fn dashboard_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, AppError> {
    let count = aggregation::count(&state.db, auth.id).await?;
    Ok(Json(json!({ "count": count })))
}

/// GET /api/applications/dashboard/trends
pub async fn dashboard_trends(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<MonthCount>>, AppError> {
    let months = aggregation::trends_by_month(&state.db, auth.id).await?;
    Ok(Json(months))
}

/// GET /api/applications/dashboard/activity
pub async fn dashboard_activity(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<BTreeMap<String, i64>>, AppError> {
    let days = aggregation::per_day(&state.db, auth.id).await?;
    Ok(Json(days))
}

/// GET /api/applications/dashboard/status
pub async fn dashboard_status(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<BTreeMap<String, i64>>, AppError> {
    let statuses = aggregation::by_status(&state.db, auth.id).await?;
    Ok(Json(statuses))
}
