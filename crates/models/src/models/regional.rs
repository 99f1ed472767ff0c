use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// How the farm compares to others in its region. Success payload of
/// `GET /api/farms/regional-comparison`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct RegionalData {
    pub region: Option<String>,
    #[serde(default)]
    pub farm_count: i64,
    pub average_yield_tons_per_hectare: Option<f64>,
    pub average_ndvi: Option<f64>,
    pub percentile_rank: Option<f64>,
}
