use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::views::pages;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error category surfaced to page state. Carries no error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Network,
    Auth,
    Upstream,
    Configuration,
    NotFound,
    InvalidInput,
    Internal,
}

impl FailureKind {
    /// Status for a page whose load settled in this failure
    pub fn status_code(&self) -> StatusCode {
        match self {
            FailureKind::Network | FailureKind::Auth | FailureKind::Upstream => {
                StatusCode::BAD_GATEWAY
            }
            FailureKind::NotFound => StatusCode::NOT_FOUND,
            FailureKind::InvalidInput => StatusCode::BAD_REQUEST,
            FailureKind::Configuration | FailureKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl AppError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AppError::Network(_) => FailureKind::Network,
            AppError::Auth(_) => FailureKind::Auth,
            AppError::Upstream { .. } => FailureKind::Upstream,
            AppError::Configuration(_) => FailureKind::Configuration,
            AppError::NotFound(_) => FailureKind::NotFound,
            AppError::InvalidInput(_) => FailureKind::InvalidInput,
            AppError::Internal(_) => FailureKind::Internal,
        }
    }

    /// Status for a failed request: the status of its kind, except that an
    /// upstream 404 means the requested title does not exist.
    ///
    /// `FailureKind` carries no upstream status, so a settled page only ever
    /// reports the kind's status.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Upstream { status: 404, .. } => StatusCode::NOT_FOUND,
            _ => self.kind().status_code(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // The URL carries the API key as a query parameter
        let err = err.without_url();

        if err.is_timeout() {
            AppError::Network(format!("request timed out: {}", err))
        } else if err.is_connect() || err.is_request() {
            AppError::Network(err.to_string())
        } else if err.is_decode() || err.is_body() {
            AppError::Upstream {
                status: err.status().map(|s| s.as_u16()).unwrap_or(200),
                message: format!("malformed response: {}", err),
            }
        } else if let Some(status) = err.status() {
            AppError::Upstream {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(error = %self, status = %status, "Request failed");

        let body = if status == StatusCode::NOT_FOUND {
            pages::not_found_page()
        } else {
            pages::error_page(None)
        };

        (status, Html(body)).into_response()
    }
}

/// Error for JSON endpoints: same status as the HTML rendering, but the body
/// is `{"error": {"kind": ..., "message": ...}}` with a fixed message.
#[derive(Debug)]
pub struct JsonError(pub AppError);

impl From<AppError> for JsonError {
    fn from(err: AppError) -> Self {
        JsonError(err)
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        tracing::warn!(error = %self.0, status = %status, "Request failed");

        let message = if status == StatusCode::NOT_FOUND {
            "Not found"
        } else {
            "Something went wrong"
        };
        let body = json!({
            "error": {
                "kind": self.0.kind(),
                "message": message,
            }
        });

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
pub type JsonResult<T> = Result<T, JsonError>;
