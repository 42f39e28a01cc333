#![allow(dead_code)]

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::applications::models::ApplicationRecord;

/// Returns the owner's records whose reminder has passed and whose
/// follow-up is still pending, oldest reminder first.
pub async fn due(
    pool: &PgPool,
    owner: Uuid,
    as_of: NaiveDate,
) -> Result<Vec<ApplicationRecord>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRecord>(
        r#"
        SELECT * FROM applications
        WHERE user_id = $1
          AND follow_up_reminder IS NOT NULL
          AND follow_up_reminder <= $2
          AND follow_up_done = FALSE
        ORDER BY follow_up_reminder ASC
        "#,
    )
    .bind(owner)
    .bind(as_of)
    .fetch_all(pool)
    .await
}

/// The "due" condition: reminder date passed and not yet acknowledged.
/// Dates compare whole calendar days, so a reminder dated today is due
/// from the morning on. `follow_up_done` itself never auto-sets.
pub fn is_due(reminder: Option<NaiveDate>, done: bool, as_of: NaiveDate) -> bool {
    match reminder {
        Some(date) if !done => date <= as_of,
        _ => false,
    }
}
