use anyhow::Result;

use crate::applications::models::ApplicationRecord;

/// Columns exported, matching what the dashboard's history table shows.
pub const CSV_HEADER: [&str; 4] = ["company", "jobTitle", "status", "appliedAt"];

/// Renders a user's records as CSV bytes.
pub fn render_csv(records: &[ApplicationRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record([
            record.company.clone(),
            record.job_title.clone(),
            record.status_label().to_string(),
            record.applied_at.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("CSV buffer error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn record(company: &str, title: &str) -> ApplicationRecord {
        ApplicationRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            company: company.to_string(),
            job_title: title.to_string(),
            job_link: None,
            location: None,
            status: Some(crate::applications::models::ApplicationStatus::Applied),
            applied_at: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            follow_up_reminder: None,
            follow_up_done: false,
            tags: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_record() {
        let bytes = render_csv(&[record("Acme", "Engineer"), record("Globex", "Analyst")]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "company,jobTitle,status,appliedAt");
    }

    #[test]
    fn test_csv_row_contains_record_fields() {
        let bytes = render_csv(&[record("Acme", "Engineer")]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("Acme,Engineer,Applied,2024-03-05"));
    }

    #[test]
    fn test_csv_quotes_embedded_commas() {
        let bytes = render_csv(&[record("Acme, Inc.", "Engineer")]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"Acme, Inc.\""));
    }

    #[test]
    fn test_csv_missing_status_exported_as_unknown() {
        let mut r = record("Acme", "Engineer");
        r.status = None;
        let bytes = render_csv(&[r]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("Unknown"));
    }
}
