use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The five tracked stages of an application. Stored as the Postgres enum
/// `application_status`; anything else is rejected at the validation
/// boundary and never reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status")]
pub enum ApplicationStatus {
    Applied,
    Interview,
    Offer,
    Rejected,
    Other,
}

impl ApplicationStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Applied" => Some(Self::Applied),
            "Interview" => Some(Self::Interview),
            "Offer" => Some(Self::Offer),
            "Rejected" => Some(Self::Rejected),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Interview => "Interview",
            Self::Offer => "Offer",
            Self::Rejected => "Rejected",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: String,
    pub job_title: String,
    pub job_link: Option<String>,
    pub location: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub applied_at: NaiveDate,
    pub follow_up_reminder: Option<NaiveDate>,
    pub follow_up_done: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ApplicationRecord {
    /// Label used in exports and the status breakdown. Rows imported from
    /// older data may carry no status at all.
    pub fn status_label(&self) -> &'static str {
        self.status.map(|s| s.as_str()).unwrap_or("Unknown")
    }
}

/// Tags arrive either as a JSON array or as one comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Joined(String),
}

/// Raw payload for create and update. Dates arrive as strings and are
/// coerced during validation; unknown keys (including any `userId` or
/// `ownerId` a client might send) are dropped by serde, so ownership can
/// only ever come from the resolved bearer identity.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub job_link: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub applied_at: Option<String>,
    pub follow_up_reminder: Option<String>,
    pub follow_up_done: Option<bool>,
    pub tags: Option<TagsInput>,
}

/// A fully validated create payload; defaults already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub company: String,
    pub job_title: String,
    pub job_link: Option<String>,
    pub location: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: Option<NaiveDate>,
    pub follow_up_reminder: Option<NaiveDate>,
    pub follow_up_done: bool,
    pub tags: Vec<String>,
}

/// A validated partial update. `None` means "leave the field untouched".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationPatch {
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub job_link: Option<String>,
    pub location: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub applied_at: Option<NaiveDate>,
    pub follow_up_reminder: Option<NaiveDate>,
    pub follow_up_done: Option<bool>,
    pub tags: Option<Vec<String>>,
}
