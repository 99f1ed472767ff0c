use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Geographic position of a farm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
pub struct FarmCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The farm the dashboard is currently scoped to.
///
/// An empty `farm_id` means "no farm selected yet" and is a normal state,
/// not an error: fetch cycles are skipped until a farm is mounted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
pub struct FarmContext {
    pub farm_id: String,
    pub coordinates: Option<FarmCoordinates>,
}

impl FarmContext {
    pub fn new(farm_id: impl Into<String>, coordinates: Option<FarmCoordinates>) -> Self {
        Self {
            farm_id: farm_id.into(),
            coordinates,
        }
    }

    /// Whether a farm is selected at all.
    pub fn has_farm(&self) -> bool {
        !self.farm_id.trim().is_empty()
    }
}
