//! API error type shared by all routes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use services::services::feed_client::FeedError;
use thiserror::Error;
use utils::response::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Feed(_) => StatusCode::BAD_GATEWAY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ApiResponse::<String>::error(self.to_string()));
        (status, body).into_response()
    }
}
