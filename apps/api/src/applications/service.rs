use sqlx::PgPool;
use uuid::Uuid;

use crate::applications::models::{ApplicationPatch, ApplicationRecord, NewApplication};

/// Owner-scoped data access for application records. Every statement
/// carries a `user_id` predicate; that predicate is the isolation
/// mechanism, so no query here may omit it.
pub async fn create(
    pool: &PgPool,
    owner: Uuid,
    input: NewApplication,
) -> Result<ApplicationRecord, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRecord>(
        r#"
        INSERT INTO applications
            (id, user_id, company, job_title, job_link, location, status,
             applied_at, follow_up_reminder, follow_up_done, tags)
        VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, CURRENT_DATE), $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(owner)
    .bind(&input.company)
    .bind(&input.job_title)
    .bind(&input.job_link)
    .bind(&input.location)
    .bind(input.status)
    .bind(input.applied_at)
    .bind(input.follow_up_reminder)
    .bind(input.follow_up_done)
    .bind(&input.tags)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool, owner: Uuid) -> Result<Vec<ApplicationRecord>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRecord>(
        r#"
        SELECT * FROM applications
        WHERE user_id = $1
        ORDER BY applied_at DESC, created_at DESC
        "#,
    )
    .bind(owner)
    .fetch_all(pool)
    .await
}

/// Returns `None` both when the record does not exist and when it belongs
/// to another user; callers must not be able to tell the two apart.
pub async fn get(
    pool: &PgPool,
    owner: Uuid,
    id: Uuid,
) -> Result<Option<ApplicationRecord>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRecord>(
        "SELECT * FROM applications WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await
}

/// Applies a partial update in one statement; absent patch fields keep
/// their stored value via COALESCE.
pub async fn update(
    pool: &PgPool,
    owner: Uuid,
    id: Uuid,
    patch: ApplicationPatch,
) -> Result<Option<ApplicationRecord>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRecord>(
        r#"
        UPDATE applications SET
            company = COALESCE($3, company),
            job_title = COALESCE($4, job_title),
            job_link = COALESCE($5, job_link),
            location = COALESCE($6, location),
            status = COALESCE($7, status),
            applied_at = COALESCE($8, applied_at),
            follow_up_reminder = COALESCE($9, follow_up_reminder),
            follow_up_done = COALESCE($10, follow_up_done),
            tags = COALESCE($11, tags)
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(owner)
    .bind(patch.company)
    .bind(patch.job_title)
    .bind(patch.job_link)
    .bind(patch.location)
    .bind(patch.status)
    .bind(patch.applied_at)
    .bind(patch.follow_up_reminder)
    .bind(patch.follow_up_done)
    .bind(patch.tags)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("DELETE FROM applications WHERE id = $1 AND user_id = $2 RETURNING id")
        .bind(id)
        .bind(owner)
        .fetch_optional(pool)
        .await
}

/// Flips `follow_up_done` in place. Toggling twice restores the original
/// value; no other column is touched.
pub async fn toggle_follow_up(
    pool: &PgPool,
    owner: Uuid,
    id: Uuid,
) -> Result<Option<ApplicationRecord>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRecord>(
        r#"
        UPDATE applications
        SET follow_up_done = NOT follow_up_done
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await
}
