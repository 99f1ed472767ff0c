pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use services::services::dashboard::DashboardService;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared state handed to every route handler.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<DashboardService>,
}

/// Build the application router with middleware applied.
pub fn app(state: AppState) -> Router {
    routes::api_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
