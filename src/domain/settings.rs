use serde::{Deserialize, Serialize};

/// Editable site-wide setting stored by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct SiteSetting {
    pub setting_key: String,
    #[serde(default)]
    pub setting_value: String,
    pub description: Option<String>,
    pub last_updated: Option<String>,
}

impl SiteSetting {
    /// Keys with a `_json` suffix hold JSON documents.
    pub fn is_json(&self) -> bool {
        self.setting_key.ends_with("_json")
    }
}

/// Counters shown on the dashboard; absent values render as `--`.
///
/// Missing counters are left out when serialized so templates can fall back.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_books: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_users: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_borrows: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overdue_borrows: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_users_last7_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_review_posts: Option<i64>,
}
