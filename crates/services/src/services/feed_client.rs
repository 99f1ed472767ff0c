//! HTTP client for the upstream farm API feeds.
//!
//! Each feed method folds non-2xx responses into the feed's documented
//! default (soft failure); only transport-level problems and undecodable
//! bodies surface as [`FeedError`] (hard failure).

use std::time::Duration;

use models::models::{
    crop_health::DiseasePestAnalysisResponse,
    farm::FarmCoordinates,
    financial::BudgetData,
    recommendation::RecommendationsResponse,
    regional::RegionalData,
    satellite::QueueStatus,
    task::TasksResponse,
    weather::{CurrentWeatherResponse, WeatherAlertsResponse},
};
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Error)]
pub enum FeedError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("json error: {0}")]
    Serde(String),
}

/// Client for the farm API consumed by the dashboard aggregator.
#[derive(Debug, Clone)]
pub struct FarmApiClient {
    http: Client,
    base_url: String,
}

impl FarmApiClient {
    pub fn new(
        base_url: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, FeedError> {
        let http = Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("farm-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET a feed, substituting `default` for any non-success status.
    async fn get_or_default<T, Q>(&self, path: &str, query: &Q, default: T) -> Result<T, FeedError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = res.status();
        if !status.is_success() {
            debug!(%status, path, "feed returned non-success status, using default");
            return Ok(default);
        }

        res.json::<T>()
            .await
            .map_err(|e| FeedError::Serde(e.to_string()))
    }

    pub async fn current_weather(&self) -> Result<Option<CurrentWeatherResponse>, FeedError> {
        self.get_or_default("/api/weather/current", &[] as &[(&str, &str)], None)
            .await
    }

    pub async fn weather_alerts(
        &self,
        coordinates: FarmCoordinates,
    ) -> Result<WeatherAlertsResponse, FeedError> {
        self.get_or_default(
            "/api/weather/alerts",
            &[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
            ],
            WeatherAlertsResponse::default(),
        )
        .await
    }

    pub async fn tasks(&self, farm_id: &str) -> Result<TasksResponse, FeedError> {
        self.get_or_default("/api/tasks", &[("farmId", farm_id)], TasksResponse::default())
            .await
    }

    pub async fn recommendations(
        &self,
        farm_id: &str,
        max_recommendations: u32,
    ) -> Result<RecommendationsResponse, FeedError> {
        self.get_or_default(
            "/api/nba/recommendations",
            &[
                ("farmId", farm_id.to_string()),
                ("maxRecommendations", max_recommendations.to_string()),
            ],
            RecommendationsResponse::default(),
        )
        .await
    }

    pub async fn disease_pest_analysis(
        &self,
        farm_id: &str,
    ) -> Result<DiseasePestAnalysisResponse, FeedError> {
        self.get_or_default(
            "/api/crop-health/disease-pest-analysis",
            &[("farmId", farm_id)],
            DiseasePestAnalysisResponse::default(),
        )
        .await
    }

    pub async fn queue_status(&self) -> Result<Option<QueueStatus>, FeedError> {
        self.get_or_default("/api/satellite/queue", &[("action", "status")], None)
            .await
    }

    pub async fn budget(&self, farm_id: &str) -> Result<Option<BudgetData>, FeedError> {
        self.get_or_default("/api/financial/budget", &[("farmId", farm_id)], None)
            .await
    }

    pub async fn regional_comparison(
        &self,
        coordinates: FarmCoordinates,
    ) -> Result<Option<RegionalData>, FeedError> {
        self.get_or_default(
            "/api/farms/regional-comparison",
            &[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
            ],
            None,
        )
        .await
    }
}

fn map_reqwest_error(e: reqwest::Error) -> FeedError {
    if e.is_timeout() {
        FeedError::Timeout
    } else {
        FeedError::Transport(e.to_string())
    }
}
