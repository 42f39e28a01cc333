use chrono::{DateTime, NaiveDate};
use validator::Validate;

use crate::applications::models::{
    ApplicationPatch, ApplicationPayload, ApplicationStatus, NewApplication, TagsInput,
};
use crate::errors::FieldIssue;

#[derive(Validate)]
struct UrlInput {
    #[validate(url(message = "jobLink must be a valid URL"))]
    url: String,
}

/// Coerces a date string to a calendar date. Accepts `YYYY-MM-DD` or an
/// RFC 3339 timestamp (the date part is taken).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
}

/// Splits and trims tag input; empty segments are dropped, order kept.
pub fn normalize_tags(input: TagsInput) -> Vec<String> {
    let parts = match input {
        TagsInput::List(list) => list,
        TagsInput::Joined(joined) => joined.split(',').map(str::to_string).collect(),
    };
    parts
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Validates a create payload, collecting every field failure instead of
/// stopping at the first. Nothing is persisted unless this passes.
pub fn validate_create(payload: ApplicationPayload) -> Result<NewApplication, Vec<FieldIssue>> {
    let mut issues = Vec::new();

    let company = required_text("company", payload.company, &mut issues);
    let job_title = required_text("jobTitle", payload.job_title, &mut issues);
    let job_link = checked_job_link(payload.job_link, &mut issues);
    let status = match payload.status.as_deref() {
        None => ApplicationStatus::Applied,
        Some(raw) => checked_status(raw, &mut issues).unwrap_or(ApplicationStatus::Applied),
    };
    let applied_at = checked_date("appliedAt", payload.applied_at, &mut issues);
    let follow_up_reminder = checked_date("followUpReminder", payload.follow_up_reminder, &mut issues);
    let tags = payload.tags.map(normalize_tags).unwrap_or_default();

    if !issues.is_empty() {
        return Err(issues);
    }

    Ok(NewApplication {
        company,
        job_title,
        job_link,
        location: non_empty(payload.location),
        status,
        applied_at,
        follow_up_reminder,
        follow_up_done: payload.follow_up_done.unwrap_or(false),
        tags,
    })
}

/// Validates a partial update. Only supplied fields are checked; each is
/// independently coerced before the merge happens in SQL.
pub fn validate_patch(payload: ApplicationPayload) -> Result<ApplicationPatch, Vec<FieldIssue>> {
    let mut issues = Vec::new();

    let company = match payload.company {
        Some(raw) => {
            let trimmed = raw.trim().to_string();
            if trimmed.is_empty() {
                issues.push(FieldIssue::new("company", "company must not be empty"));
                None
            } else {
                Some(trimmed)
            }
        }
        None => None,
    };
    let job_title = match payload.job_title {
        Some(raw) => {
            let trimmed = raw.trim().to_string();
            if trimmed.is_empty() {
                issues.push(FieldIssue::new("jobTitle", "jobTitle must not be empty"));
                None
            } else {
                Some(trimmed)
            }
        }
        None => None,
    };
    let job_link = checked_job_link(payload.job_link, &mut issues);
    let status = match payload.status.as_deref() {
        None => None,
        Some(raw) => checked_status(raw, &mut issues),
    };
    let applied_at = checked_date("appliedAt", payload.applied_at, &mut issues);
    let follow_up_reminder = checked_date("followUpReminder", payload.follow_up_reminder, &mut issues);
    let tags = payload.tags.map(normalize_tags);

    if !issues.is_empty() {
        return Err(issues);
    }

    Ok(ApplicationPatch {
        company,
        job_title,
        job_link,
        location: non_empty(payload.location),
        status,
        applied_at,
        follow_up_reminder,
        follow_up_done: payload.follow_up_done,
        tags,
    })
}

fn required_text(path: &str, value: Option<String>, issues: &mut Vec<FieldIssue>) -> String {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(v) => v,
        None => {
            issues.push(FieldIssue::new(path, format!("{path} is required")));
            String::new()
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// An empty jobLink is allowed and normalized away; a non-empty one must
/// be a URL.
fn checked_job_link(value: Option<String>, issues: &mut Vec<FieldIssue>) -> Option<String> {
    let raw = non_empty(value)?;
    let input = UrlInput { url: raw.clone() };
    if input.validate().is_err() {
        issues.push(FieldIssue::new("jobLink", "jobLink must be a valid URL"));
        return None;
    }
    Some(raw)
}

fn checked_status(raw: &str, issues: &mut Vec<FieldIssue>) -> Option<ApplicationStatus> {
    match ApplicationStatus::parse(raw) {
        Some(status) => Some(status),
        None => {
            issues.push(FieldIssue::new(
                "status",
                "status must be one of Applied, Interview, Offer, Rejected, Other",
            ));
            None
        }
    }
}

fn checked_date(
    path: &str,
    value: Option<String>,
    issues: &mut Vec<FieldIssue>,
) -> Option<NaiveDate> {
    let raw = non_empty(value)?;
    match parse_date(&raw) {
        Some(date) => Some(date),
        None => {
            issues.push(FieldIssue::new(path, format!("{path} must be a valid date")));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ApplicationPayload {
        ApplicationPayload {
            company: Some("Acme".to_string()),
            job_title: Some("Engineer".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_minimal_defaults() {
        let new = validate_create(payload()).unwrap();
        assert_eq!(new.company, "Acme");
        assert_eq!(new.job_title, "Engineer");
        assert_eq!(new.status, ApplicationStatus::Applied);
        assert!(!new.follow_up_done);
        assert!(new.tags.is_empty());
        assert!(new.applied_at.is_none());
    }

    #[test]
    fn test_create_missing_company_and_title() {
        let issues = validate_create(ApplicationPayload::default()).unwrap_err();
        let paths: Vec<_> = issues.iter().map(|i| i.path.as_str()).collect();
        assert!(paths.contains(&"company"));
        assert!(paths.contains(&"jobTitle"));
    }

    #[test]
    fn test_create_blank_company_rejected() {
        let mut p = payload();
        p.company = Some("   ".to_string());
        let issues = validate_create(p).unwrap_err();
        assert_eq!(issues[0].path, "company");
    }

    #[test]
    fn test_create_invalid_status_rejected() {
        let mut p = payload();
        p.status = Some("Ghosted".to_string());
        let issues = validate_create(p).unwrap_err();
        assert_eq!(issues[0].path, "status");
    }

    #[test]
    fn test_create_each_valid_status_accepted() {
        for raw in ["Applied", "Interview", "Offer", "Rejected", "Other"] {
            let mut p = payload();
            p.status = Some(raw.to_string());
            let new = validate_create(p).unwrap();
            assert_eq!(new.status.as_str(), raw);
        }
    }

    #[test]
    fn test_create_plain_date_coerced() {
        let mut p = payload();
        p.applied_at = Some("2024-03-05".to_string());
        let new = validate_create(p).unwrap();
        assert_eq!(new.applied_at.unwrap().to_string(), "2024-03-05");
    }

    #[test]
    fn test_create_rfc3339_date_coerced() {
        let mut p = payload();
        p.follow_up_reminder = Some("2024-03-05T10:30:00Z".to_string());
        let new = validate_create(p).unwrap();
        assert_eq!(new.follow_up_reminder.unwrap().to_string(), "2024-03-05");
    }

    #[test]
    fn test_create_malformed_date_rejected() {
        let mut p = payload();
        p.applied_at = Some("last tuesday".to_string());
        let issues = validate_create(p).unwrap_err();
        assert_eq!(issues[0].path, "appliedAt");
    }

    #[test]
    fn test_create_invalid_job_link_rejected() {
        let mut p = payload();
        p.job_link = Some("not a url".to_string());
        let issues = validate_create(p).unwrap_err();
        assert_eq!(issues[0].path, "jobLink");
    }

    #[test]
    fn test_create_empty_job_link_allowed() {
        let mut p = payload();
        p.job_link = Some("".to_string());
        let new = validate_create(p).unwrap();
        assert!(new.job_link.is_none());
    }

    #[test]
    fn test_create_valid_job_link_kept() {
        let mut p = payload();
        p.job_link = Some("https://jobs.acme.test/eng-42".to_string());
        let new = validate_create(p).unwrap();
        assert_eq!(new.job_link.as_deref(), Some("https://jobs.acme.test/eng-42"));
    }

    #[test]
    fn test_create_collects_multiple_issues() {
        let p = ApplicationPayload {
            status: Some("Nope".to_string()),
            applied_at: Some("???".to_string()),
            ..Default::default()
        };
        let issues = validate_create(p).unwrap_err();
        assert_eq!(issues.len(), 4); // company, jobTitle, status, appliedAt
    }

    #[test]
    fn test_tags_comma_string_split_and_trimmed() {
        let tags = normalize_tags(TagsInput::Joined("remote, rust ,, backend".to_string()));
        assert_eq!(tags, vec!["remote", "rust", "backend"]);
    }

    #[test]
    fn test_tags_list_trimmed_and_order_kept() {
        let tags = normalize_tags(TagsInput::List(vec![
            " z ".to_string(),
            "a".to_string(),
            "".to_string(),
        ]));
        assert_eq!(tags, vec!["z", "a"]);
    }

    #[test]
    fn test_body_owner_field_is_ignored() {
        let raw = r#"{"company":"Acme","jobTitle":"Engineer","userId":"someone-else","ownerId":"x"}"#;
        let p: ApplicationPayload = serde_json::from_str(raw).unwrap();
        let new = validate_create(p).unwrap();
        // Nothing in the validated output carries an owner; it is supplied
        // by the service from the resolved bearer identity.
        assert_eq!(new.company, "Acme");
    }

    #[test]
    fn test_patch_empty_is_noop() {
        let patch = validate_patch(ApplicationPayload::default()).unwrap();
        assert_eq!(patch, ApplicationPatch::default());
    }

    #[test]
    fn test_patch_blank_company_rejected() {
        let p = ApplicationPayload {
            company: Some("  ".to_string()),
            ..Default::default()
        };
        let issues = validate_patch(p).unwrap_err();
        assert_eq!(issues[0].path, "company");
    }

    #[test]
    fn test_patch_recoerces_dates() {
        let p = ApplicationPayload {
            follow_up_reminder: Some("2025-01-31T08:00:00+02:00".to_string()),
            ..Default::default()
        };
        let patch = validate_patch(p).unwrap();
        assert_eq!(patch.follow_up_reminder.unwrap().to_string(), "2025-01-31");
    }

    #[test]
    fn test_patch_invalid_status_rejected() {
        let p = ApplicationPayload {
            status: Some("applied".to_string()), // case-sensitive
            ..Default::default()
        };
        assert!(validate_patch(p).is_err());
    }

    #[test]
    fn test_patch_tags_replaced_wholesale() {
        let p = ApplicationPayload {
            tags: Some(TagsInput::Joined("a,b".to_string())),
            ..Default::default()
        };
        let patch = validate_patch(p).unwrap();
        assert_eq!(patch.tags, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2024-13-45").is_none());
        assert!(parse_date("").is_none());
        assert!(parse_date("tomorrow").is_none());
    }
}
