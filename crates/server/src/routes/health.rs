use axum::{Router, response::Json as ResponseJson, routing::get};
use utils::response::ApiResponse;

use crate::AppState;

/// Liveness probe
pub async fn health() -> ResponseJson<ApiResponse<String>> {
    ResponseJson(ApiResponse::success("ok".to_string()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
