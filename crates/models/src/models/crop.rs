use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A crop planted on the farm. Seeded into the view by the caller when the
/// farm context mounts; the aggregator never fetches crops itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct CropData {
    pub id: Uuid,
    pub name: String,
    pub variety: Option<String>,
    pub planted_area_hectares: Option<f64>,
    pub growth_stage: Option<String>,
    pub health_score: Option<f64>,
}
