use axum::{extract::State, http::header, response::IntoResponse};

use crate::applications::service;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::export::{pdf, sheet};
use crate::state::AppState;

const EMPTY_EXPORT_MESSAGE: &str =
    "There are no jobs stored for this user, first create a job to export";

/// GET /api/jobs/export/csv
pub async fn export_csv(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let records = service::list(&state.db, auth.id).await?;
    if records.is_empty() {
        return Err(AppError::BadRequest(EMPTY_EXPORT_MESSAGE.to_string()));
    }

    let bytes = sheet::render_csv(&records).map_err(|e| AppError::Export(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, "attachment; filename=jobs.csv"),
        ],
        bytes,
    ))
}

/// GET /api/jobs/export/pdf
pub async fn export_pdf(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let records = service::list(&state.db, auth.id).await?;
    if records.is_empty() {
        return Err(AppError::BadRequest(EMPTY_EXPORT_MESSAGE.to_string()));
    }

    let bytes = pdf::render_pdf(&records).map_err(|e| AppError::Export(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "attachment; filename=jobs.pdf"),
        ],
        bytes,
    ))
}
