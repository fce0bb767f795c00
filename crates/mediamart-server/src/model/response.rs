//! HTTP error response types.
//!
//! Successful handlers serialize domain models directly; failures share the
//! `ErrorResult` envelope below.

use actix_web::{http::StatusCode, HttpResponse, HttpResponseBuilder};
use serde::{Deserialize, Serialize};

use mediamart_common::MediamartError;

/// Error result for API error responses
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorResult {
    pub timestamp: String,
    pub status: i32,
    pub error: String,
    pub message: String,
    pub path: String,
}

impl ErrorResult {
    pub fn new(status: StatusCode, message: &str, path: &str) -> Self {
        ErrorResult {
            timestamp: chrono::Utc::now().to_rfc3339(),
            status: status.as_u16() as i32,
            error: status.canonical_reason().unwrap_or_default().to_string(),
            message: message.to_string(),
            path: path.to_string(),
        }
    }

    pub fn http_response(status: StatusCode, message: &str, path: &str) -> HttpResponse {
        HttpResponseBuilder::new(status).json(ErrorResult::new(status, message, path))
    }

    pub fn http_response_bad_request(message: &str, path: &str) -> HttpResponse {
        Self::http_response(StatusCode::BAD_REQUEST, message, path)
    }

    pub fn http_response_unauthorized(message: &str, path: &str) -> HttpResponse {
        Self::http_response(StatusCode::UNAUTHORIZED, message, path)
    }

    pub fn http_response_forbidden(message: &str, path: &str) -> HttpResponse {
        Self::http_response(StatusCode::FORBIDDEN, message, path)
    }

    pub fn http_response_not_found(message: &str, path: &str) -> HttpResponse {
        Self::http_response(StatusCode::NOT_FOUND, message, path)
    }

    /// Map a service layer error onto an HTTP response.
    pub fn from_service_error(err: &anyhow::Error, path: &str) -> HttpResponse {
        match err.downcast_ref::<MediamartError>() {
            Some(MediamartError::ConstructionNotFound(_)) => {
                Self::http_response_not_found(&err.to_string(), path)
            }
            Some(MediamartError::IllegalArgument(_))
            | Some(MediamartError::UserAlreadyExist(_)) => {
                Self::http_response_bad_request(&err.to_string(), path)
            }
            Some(MediamartError::UserNotExist(_)) | Some(MediamartError::AuthError(_)) => {
                Self::http_response_unauthorized("invalid credentials", path)
            }
            _ => {
                tracing::error!(path = path, error = %err, "request failed");
                Self::http_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error",
                    path,
                )
            }
        }
    }
}
