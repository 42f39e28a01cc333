use sqlx::PgPool;

use crate::config::Config;
use crate::email::Mailer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub mailer: Mailer,
    pub config: Config,
}
