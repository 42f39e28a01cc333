pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::applications::handlers as applications;
use crate::auth::handlers as auth;
use crate::export::handlers as export;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth API
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/reset-password", post(auth::reset_password))
        .route("/api/auth/delete", delete(auth::delete_account))
        // Applications API
        .route(
            "/api/applications",
            get(applications::list_applications).post(applications::create_application),
        )
        .route(
            "/api/applications/followups/due",
            get(applications::due_follow_ups),
        )
        .route(
            "/api/applications/dashboard/count",
            get(applications::dashboard_count),
        )
        .route(
            "/api/applications/dashboard/trends",
            get(applications::dashboard_trends),
        )
        .route(
            "/api/applications/dashboard/activity",
            get(applications::dashboard_activity),
        )
        .route(
            "/api/applications/dashboard/status",
            get(applications::dashboard_status),
        )
        .route(
            "/api/applications/:id",
            get(applications::get_application)
                .put(applications::update_application)
                .delete(applications::delete_application),
        )
        .route(
            "/api/applications/:id/followup-toggle",
            put(applications::toggle_follow_up),
        )
        // Export API
        .route("/api/jobs/export/csv", get(export::export_csv))
        .route("/api/jobs/export/pdf", get(export::export_pdf))
        .with_state(state)
}
