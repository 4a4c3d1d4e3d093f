use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Error envelope returned to clients
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Request boundary errors. Display strings double as the client-facing
/// messages, except for `Internal`, which is logged and replaced with a
/// fixed message so backend failure text never reaches a client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Order ID is required")]
    MissingOrderId,

    #[error("Order not found")]
    OrderNotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingOrderId => StatusCode::BAD_REQUEST,
            ApiError::OrderNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(e) => {
                tracing::error!("Unhandled error: {}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (self.status(), Json(ErrorBody { error: message })).into_response()
    }
}
