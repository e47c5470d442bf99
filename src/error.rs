use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Upstream returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GatewayError::Upstream { status, .. } => *status,
            GatewayError::Http(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Http(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Json(_) | GatewayError::Io(_) | GatewayError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            GatewayError::Unauthorized(_) => "authentication_error",
            GatewayError::Upstream { .. } | GatewayError::Http(_) => "upstream_error",
            _ => "internal_error",
        }
    }
}

// OpenAI 风格的错误体：{"error": {"message", "type", "code"}}
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            GatewayError::Upstream { body, .. } => body.clone(),
            GatewayError::Unauthorized(msg) => msg.clone(),
            GatewayError::Json(_) | GatewayError::Io(_) | GatewayError::Config(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "request failed: {}", self);
        } else {
            tracing::warn!(status = status.as_u16(), "request rejected: {}", self);
        }
        let body = json!({
            "error": {
                "message": message,
                "type": self.error_type(),
                "code": status.as_u16(),
            }
        });
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
