use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthCount {
    pub month: &'static str,
    pub count: i64,
}

#[derive(FromRow)]
struct MonthRow {
    month: i32,
    count: i64,
}

#[derive(FromRow)]
struct DayRow {
    day: String,
    count: i64,
}

#[derive(FromRow)]
struct StatusRow {
    status: Option<String>,
    count: i64,
}

pub async fn count(pool: &PgPool, owner: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE user_id = $1")
        .bind(owner)
        .fetch_one(pool)
        .await
}

/// Applications grouped by calendar month of `applied_at`, year ignored:
/// records from different years land in the same bucket. The dashboard
/// renders this as a fixed Jan-Dec histogram.
pub async fn trends_by_month(pool: &PgPool, owner: Uuid) -> Result<Vec<MonthCount>, sqlx::Error> {
    let rows: Vec<MonthRow> = sqlx::query_as(
        r#"
        SELECT EXTRACT(MONTH FROM applied_at)::INT4 AS month, COUNT(*) AS count
        FROM applications
        WHERE user_id = $1
        GROUP BY 1
        ORDER BY 1
        "#,
    )
    .bind(owner)
    .fetch_all(pool)
    .await?;

    Ok(fold_month_counts(
        &rows.iter().map(|r| (r.month, r.count)).collect::<Vec<_>>(),
    ))
}

/// Applications grouped by `applied_at` day, ascending by date string.
pub async fn per_day(pool: &PgPool, owner: Uuid) -> Result<BTreeMap<String, i64>, sqlx::Error> {
    let rows: Vec<DayRow> = sqlx::query_as(
        r#"
        SELECT to_char(applied_at, 'YYYY-MM-DD') AS day, COUNT(*) AS count
        FROM applications
        WHERE user_id = $1
        GROUP BY 1
        ORDER BY 1
        "#,
    )
    .bind(owner)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| (r.day, r.count)).collect())
}

/// Applications grouped by status label.
pub async fn by_status(pool: &PgPool, owner: Uuid) -> Result<BTreeMap<String, i64>, sqlx::Error> {
    let rows: Vec<StatusRow> = sqlx::query_as(
        r#"
        SELECT status::TEXT AS status, COUNT(*) AS count
        FROM applications
        WHERE user_id = $1
        GROUP BY 1
        "#,
    )
    .bind(owner)
    .fetch_all(pool)
    .await?;

    Ok(fold_status_counts(
        rows.into_iter().map(|r| (r.status, r.count)),
    ))
}

/// Folds (month 1-12, count) pairs into a fixed 12-entry Jan-Dec
/// sequence, zero-filled. Out-of-range months are ignored.
pub fn fold_month_counts(rows: &[(i32, i64)]) -> Vec<MonthCount> {
    let mut counts = [0i64; 12];
    for &(month, count) in rows {
        if (1..=12).contains(&month) {
            counts[(month - 1) as usize] += count;
        }
    }

    MONTH_LABELS
        .iter()
        .copied()
        .zip(counts)
        .map(|(label, count)| MonthCount {
            month: label,
            count,
        })
        .collect()
}

/// Folds status/count pairs into a label map; rows with no status are
/// reported under "Unknown".
pub fn fold_status_counts(
    rows: impl IntoIterator<Item = (Option<String>, i64)>,
) -> BTreeMap<String, i64> {
    let mut out = BTreeMap::new();
    for (status, count) in rows {
        let label = status.unwrap_or_else(|| "Unknown".to_string());
        *out.entry(label).or_insert(0) += count;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_fold_empty_is_twelve_zeros() {
        let months = fold_month_counts(&[]);
        assert_eq!(months.len(), 12);
        assert!(months.iter().all(|m| m.count == 0));
    }

    #[test]
    fn test_month_fold_always_calendar_order() {
        let months = fold_month_counts(&[(12, 1), (1, 1)]);
        let labels: Vec<_> = months.iter().map(|m| m.month).collect();
        assert_eq!(labels, MONTH_LABELS.to_vec());
    }

    #[test]
    fn test_month_fold_single_march_record() {
        let months = fold_month_counts(&[(3, 1)]);
        assert_eq!(months[2], MonthCount { month: "Mar", count: 1 });
        let others: i64 = months.iter().filter(|m| m.month != "Mar").map(|m| m.count).sum();
        assert_eq!(others, 0);
    }

    #[test]
    fn test_month_fold_sum_equals_record_count() {
        let months = fold_month_counts(&[(1, 4), (6, 2), (12, 5)]);
        let total: i64 = months.iter().map(|m| m.count).sum();
        assert_eq!(total, 11);
    }

    #[test]
    fn test_month_fold_merges_duplicate_months() {
        // Same calendar month from different years arrives as separate
        // pairs only if the SQL didn't group; the fold still merges.
        let months = fold_month_counts(&[(3, 1), (3, 2)]);
        assert_eq!(months[2].count, 3);
    }

    #[test]
    fn test_month_fold_ignores_out_of_range() {
        let months = fold_month_counts(&[(0, 7), (13, 7), (5, 1)]);
        let total: i64 = months.iter().map(|m| m.count).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_status_fold_counts_labels() {
        let out = fold_status_counts(vec![
            (Some("Applied".to_string()), 1),
            (Some("Offer".to_string()), 1),
        ]);
        assert_eq!(out.get("Applied"), Some(&1));
        assert_eq!(out.get("Offer"), Some(&1));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_status_fold_null_groups_under_unknown() {
        let out = fold_status_counts(vec![(None, 2), (Some("Rejected".to_string()), 1)]);
        assert_eq!(out.get("Unknown"), Some(&2));
        assert_eq!(out.get("Rejected"), Some(&1));
    }

    #[test]
    fn test_day_map_sorted_ascending() {
        let map: BTreeMap<String, i64> = vec![
            ("2024-03-05".to_string(), 2),
            ("2024-01-31".to_string(), 1),
        ]
        .into_iter()
        .collect();
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["2024-01-31", "2024-03-05"]);
    }
}
