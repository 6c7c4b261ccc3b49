//! HTTP error mapping. Every failure becomes a `{"detail": "..."}` body.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use signalgate_core::InputError;
use thiserror::Error;

use crate::dedup::DedupError;
use crate::notifier::NotifyError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Body(#[from] JsonRejection),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Dedup(#[from] DedupError),

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Body(rejection) => rejection.status(),
            Self::Input(_) => StatusCode::BAD_REQUEST,
            Self::Dedup(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Notify(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            Self::Body(rejection) => rejection.body_text(),
            Self::Input(InputError::UnsupportedTimeframe(_)) => "tf must be 5m or 15m".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("request failed: {self}");
        }
        (status, Json(json!({ "detail": self.detail() }))).into_response()
    }
}
