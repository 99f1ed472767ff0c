pub mod dashboard;
pub mod health;

use axum::Router;

use crate::AppState;

/// All routes, nested under `/api`.
pub fn api_router() -> Router<AppState> {
    Router::new().nest(
        "/api",
        Router::new()
            .merge(dashboard::router())
            .merge(health::router()),
    )
}
