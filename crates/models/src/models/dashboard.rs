use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{
    crop::CropData, crop_health::HarvestAlert, financial::BudgetData,
    recommendation::RecommendationData, regional::RegionalData, satellite::QueueStatus,
    task::TaskData, weather::WeatherData,
};

/// The aggregate dashboard view for the active farm context.
///
/// List fields are always concrete vectors so consumers never null-check
/// collections; the optional record fields stay `None` until their feed has
/// delivered at least once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
pub struct DashboardView {
    pub weather: Option<WeatherData>,
    pub crops: Vec<CropData>,
    pub tasks: Vec<TaskData>,
    pub recommendations: Vec<RecommendationData>,
    pub harvest_alerts: Vec<HarvestAlert>,
    pub queue_status: Option<QueueStatus>,
    pub budget_data: Option<BudgetData>,
    pub regional_data: Option<RegionalData>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl DashboardView {
    /// View for a freshly mounted farm context: empty collections apart
    /// from the seeded crops, `loading` until the first cycle settles.
    pub fn initial(seed_crops: Vec<CropData>) -> Self {
        Self {
            crops: seed_crops,
            loading: true,
            ..Self::default()
        }
    }
}

/// Overwrite of a single view field by a consumer that mutated the
/// underlying resource itself (e.g. right after creating a task). The
/// payload is applied as-is; the caller is trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum DashboardPatch {
    Weather(Option<WeatherData>),
    Crops(Vec<CropData>),
    Tasks(Vec<TaskData>),
    Recommendations(Vec<RecommendationData>),
    HarvestAlerts(Vec<HarvestAlert>),
    QueueStatus(Option<QueueStatus>),
    BudgetData(Option<BudgetData>),
    RegionalData(Option<RegionalData>),
}

impl DashboardPatch {
    /// Name of the view field this patch overwrites
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Weather(_) => "weather",
            Self::Crops(_) => "crops",
            Self::Tasks(_) => "tasks",
            Self::Recommendations(_) => "recommendations",
            Self::HarvestAlerts(_) => "harvest_alerts",
            Self::QueueStatus(_) => "queue_status",
            Self::BudgetData(_) => "budget_data",
            Self::RegionalData(_) => "regional_data",
        }
    }
}
