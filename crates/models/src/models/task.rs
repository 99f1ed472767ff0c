use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

/// Status of a farm task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Overdue,
}

/// Priority of a farm task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// A task scheduled on the farm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct TaskData {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Success payload of `GET /api/tasks`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TasksResponse {
    #[serde(default)]
    pub tasks: Vec<TaskData>,
}
