use serde::{Deserialize, Serialize};

/// Lifecycle status of a response record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    InProgress,
    /// No activity for the configured inactivity window before submission.
    /// A later successful submit updates status independently; it does not
    /// transition back through `InProgress`.
    Abandoned,
    Submitted,
}

/// A liveness record for one in-progress response, as stored externally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub form_id: String,
    pub response_id: String,
    /// ISO 8601 / RFC 3339 timestamp string of the last observed activity.
    pub last_activity_at: String,
    pub status: ResponseStatus,
}

/// RFC 3339 timestamp for "now", used by store implementations.
pub(crate) fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::new())
}
