use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    /// Absent until the task is first updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The full persisted document: `{ "tasks": [...] }` in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskPayload {
    pub text: String,
}

/// Partial update: only fields that are present are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskPayload {
    pub text: Option<String>,
    pub done: Option<bool>,
}
