//! Routes projecting the aggregated dashboard view and its slices.

use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::{get, post, put},
};
use models::models::{
    crop::CropData,
    crop_health::HarvestAlert,
    dashboard::{DashboardPatch, DashboardView},
    farm::FarmCoordinates,
    financial::BudgetData,
    recommendation::RecommendationData,
    regional::RegionalData,
    satellite::QueueStatus,
    task::TaskData,
    weather::WeatherData,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

/// Request body for mounting a farm context
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct SetFarmContextRequest {
    pub farm_id: String,
    pub coordinates: Option<FarmCoordinates>,
    #[serde(default)]
    pub seed_crops: Vec<CropData>,
}

/// Full view snapshot
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<DashboardView>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(
        state.dashboard.view().await,
    )))
}

/// Trigger a manual refresh and return the refreshed view
pub async fn refresh_dashboard(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<DashboardView>>, ApiError> {
    state.dashboard.refetch().await;
    Ok(ResponseJson(ApiResponse::success(
        state.dashboard.view().await,
    )))
}

/// Overwrite one view field on behalf of a consumer that already mutated
/// the underlying resource
pub async fn patch_dashboard(
    State(state): State<AppState>,
    axum::Json(patch): axum::Json<DashboardPatch>,
) -> Result<ResponseJson<ApiResponse<DashboardView>>, ApiError> {
    state.dashboard.apply_patch(patch).await;
    Ok(ResponseJson(ApiResponse::success(
        state.dashboard.view().await,
    )))
}

/// Mount a (new) farm context; resets the view and runs the first cycle
pub async fn put_farm_context(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<SetFarmContextRequest>,
) -> Result<ResponseJson<ApiResponse<DashboardView>>, ApiError> {
    if payload.farm_id.trim().is_empty() {
        return Err(ApiError::BadRequest("farm_id must not be empty".to_string()));
    }

    state
        .dashboard
        .initialize(payload.farm_id, payload.coordinates, payload.seed_crops)
        .await;
    Ok(ResponseJson(ApiResponse::success(
        state.dashboard.view().await,
    )))
}

pub async fn get_weather(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Option<WeatherData>>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(
        state.dashboard.weather().await,
    )))
}

pub async fn get_crops(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<CropData>>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(
        state.dashboard.crops().await,
    )))
}

pub async fn get_tasks(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<TaskData>>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(
        state.dashboard.tasks().await,
    )))
}

pub async fn get_recommendations(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<RecommendationData>>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(
        state.dashboard.recommendations().await,
    )))
}

pub async fn get_harvest_alerts(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<HarvestAlert>>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(
        state.dashboard.harvest_alerts().await,
    )))
}

pub async fn get_queue_status(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Option<QueueStatus>>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(
        state.dashboard.queue_status().await,
    )))
}

pub async fn get_budget(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Option<BudgetData>>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(
        state.dashboard.budget_data().await,
    )))
}

pub async fn get_regional(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Option<RegionalData>>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(
        state.dashboard.regional_data().await,
    )))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/dashboard",
        Router::new()
            .route("/", get(get_dashboard).patch(patch_dashboard))
            .route("/refresh", post(refresh_dashboard))
            .route("/context", put(put_farm_context))
            .route("/weather", get(get_weather))
            .route("/crops", get(get_crops))
            .route("/tasks", get(get_tasks))
            .route("/recommendations", get(get_recommendations))
            .route("/harvest-alerts", get(get_harvest_alerts))
            .route("/queue", get(get_queue_status))
            .route("/budget", get(get_budget))
            .route("/regional", get(get_regional)),
    )
}
