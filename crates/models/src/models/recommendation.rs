use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A next-best-action recommendation for the farm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct RecommendationData {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: i32,
    pub created_at: Option<DateTime<Utc>>,
}

/// Success payload of `GET /api/nba/recommendations`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub recommendations: Vec<RecommendationData>,
}
