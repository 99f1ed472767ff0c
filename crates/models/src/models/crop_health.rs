use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::weather::AlertSeverity;

/// An alert raised by the disease/pest analysis for a crop nearing harvest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct HarvestAlert {
    pub id: Uuid,
    pub crop_name: String,
    pub severity: AlertSeverity,
    pub message: String,
    pub detected_at: Option<DateTime<Utc>>,
}

/// Success payload of `GET /api/crop-health/disease-pest-analysis`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiseasePestAnalysisResponse {
    #[serde(rename = "harvestAlerts", default)]
    pub harvest_alerts: Vec<HarvestAlert>,
}
