use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::application::services::{AllocError, RateLimitError, RenderError};
use crate::domain::store::StoreError;
use crate::utils::url_normalizer::UrlNormalizationError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Application-level error mapped onto HTTP responses.
///
/// Component errors ([`AllocError`], [`RenderError`], [`StoreError`]) convert
/// into one of these variants at the API boundary. A denied rate-limit
/// decision is not an error and is handled by the middleware directly.
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    TooManyRequests { retry_after_secs: u64 },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::TooManyRequests { retry_after_secs } => {
                let body = ErrorBody {
                    error: ErrorInfo {
                        code: "rate_limited",
                        message: "Too many requests".to_string(),
                        details: json!({ "retry_after_secs": retry_after_secs }),
                    },
                };
                let mut response =
                    (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
                if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                    response.headers_mut().insert(header::RETRY_AFTER, value);
                }
                return response;
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::internal("Store error", json!({ "reason": e.to_string() }))
    }
}

impl From<AllocError> for AppError {
    fn from(e: AllocError) -> Self {
        match e {
            AllocError::Exhausted { attempts } => AppError::internal(
                "Failed to allocate a unique short key",
                json!({ "attempts": attempts }),
            ),
            AllocError::PathInUse { key } => AppError::conflict(
                "Custom key already exists",
                json!({ "key": key }),
            ),
            AllocError::InvalidKey { key, reason } => AppError::bad_request(
                "Invalid custom key",
                json!({ "key": key, "reason": reason }),
            ),
            AllocError::Store(e) => e.into(),
        }
    }
}

impl From<RateLimitError> for AppError {
    fn from(e: RateLimitError) -> Self {
        AppError::internal("Rate limiter error", json!({ "reason": e.to_string() }))
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        AppError::internal(
            "Failed to render QR code",
            json!({ "reason": e.to_string() }),
        )
    }
}

impl From<UrlNormalizationError> for AppError {
    fn from(e: UrlNormalizationError) -> Self {
        AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&e).unwrap_or_else(|_| json!({})),
        )
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Conflict { message, .. }
            | AppError::Internal { message, .. } => write!(f, "{}", message),
            AppError::TooManyRequests { .. } => write!(f, "Too many requests"),
        }
    }
}

impl std::error::Error for AppError {}
