//! Runtime configuration for the dashboard aggregator.

use std::time::Duration;

use models::models::farm::FarmCoordinates;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
    #[error("FARM_LATITUDE and FARM_LONGITUDE must be set together")]
    PartialCoordinates,
}

/// Settings for the aggregator and its refresh loop, read from the
/// environment with sensible defaults.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the upstream farm API.
    pub api_base_url: String,
    /// How often the background refresh re-runs the fetch cycle.
    pub poll_interval: Duration,
    /// Per-request timeout on the upstream client.
    pub request_timeout: Duration,
    /// Cap passed to the recommendations feed.
    pub max_recommendations: u32,
    /// Farm the dashboard mounts at startup; empty means "none yet".
    pub farm_id: String,
    pub farm_coordinates: Option<FarmCoordinates>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            poll_interval: Duration::from_secs(300),
            request_timeout: Duration::from_secs(30),
            max_recommendations: 5,
            farm_id: String::new(),
            farm_coordinates: None,
        }
    }
}

impl DashboardConfig {
    /// Read configuration from the environment, falling back to defaults
    /// for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("FARM_API_BASE_URL") {
            config.api_base_url = url;
        }
        if let Some(secs) = parse_var::<u64>("DASHBOARD_POLL_INTERVAL_SECS")? {
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>("DASHBOARD_REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(max) = parse_var::<u32>("DASHBOARD_MAX_RECOMMENDATIONS")? {
            config.max_recommendations = max;
        }
        if let Ok(farm_id) = std::env::var("FARM_ID") {
            config.farm_id = farm_id;
        }

        let latitude = parse_var::<f64>("FARM_LATITUDE")?;
        let longitude = parse_var::<f64>("FARM_LONGITUDE")?;
        config.farm_coordinates = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(FarmCoordinates {
                latitude,
                longitude,
            }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialCoordinates),
        };

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(None),
    }
}
