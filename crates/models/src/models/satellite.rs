use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Processing state of the satellite imagery queue (global, not
/// farm-scoped). Success payload of `GET /api/satellite/queue?action=status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
pub struct QueueStatus {
    #[serde(default)]
    pub pending: i64,
    #[serde(default)]
    pub processing: i64,
    #[serde(default)]
    pub completed: i64,
    #[serde(default)]
    pub failed: i64,
    pub last_processed_at: Option<DateTime<Utc>>,
}
