//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`. Use
//! `AppError` (or types that implement `Into<AppError>`) for errors and `?` so they
//! become `HttpAppError` and render consistently (status, body, logging).

use axum::{
    extract::multipart::MultipartError,
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reelvault_core::{AppError, ErrorMetadata, LogLevel};
use reelvault_processing::ProcessingError;
use reelvault_storage::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from reelvault-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

/// Convert JSON body deserialization failures into a 400 with our ErrorResponse format.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// Multipart read failures are caller problems: truncated bodies, bad
/// boundaries, disconnects mid-upload.
impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        HttpAppError(AppError::BadRequest(format!(
            "Malformed multipart body: {}",
            err.body_text()
        )))
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            StorageError::UploadFailed(msg) => AppError::StorageGateway(msg),
            StorageError::DeleteFailed(msg) => AppError::StorageGateway(msg),
            StorageError::BackendError(msg) => AppError::StorageGateway(msg),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

impl From<ProcessingError> for HttpAppError {
    fn from(err: ProcessingError) -> Self {
        let app = match err {
            ProcessingError::TooLarge { limit_bytes } => AppError::PayloadTooLarge(format!(
                "Upload exceeds the maximum allowed size of {} bytes",
                limit_bytes
            )),
            ProcessingError::Stream(msg) => {
                AppError::BadRequest(format!("Upload stream failed: {}", msg))
            }
            ProcessingError::NoVideoStream => {
                AppError::InvalidInput("No video stream found in uploaded media".to_string())
            }
            other => AppError::Processing(other.to_string()),
        };
        HttpAppError(app)
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on
/// deserialization failure.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let is_production = is_production_env();

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Always hide details in production; in non-production, only show
        // details for non-sensitive errors.
        let body = if is_production || app_error.is_sensitive() {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: None,
                error_type: None,
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
            })
        } else {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: Some(app_error.detailed_message()),
                error_type: Some(app_error.error_type().to_string()),
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
            })
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_error_not_found() {
        let storage_err = StorageError::NotFound("Object not found".to_string());
        let HttpAppError(app_err) = storage_err.into();
        match app_err {
            AppError::NotFound(msg) => assert_eq!(msg, "Object not found"),
            _ => panic!("Expected NotFound variant"),
        }
    }

    #[test]
    fn test_from_storage_error_upload_failed_is_gateway() {
        let storage_err = StorageError::UploadFailed("put rejected".to_string());
        let HttpAppError(app_err) = storage_err.into();
        assert_eq!(app_err.http_status_code(), 502);
        match app_err {
            AppError::StorageGateway(msg) => assert_eq!(msg, "put rejected"),
            _ => panic!("Expected StorageGateway variant"),
        }
    }

    #[test]
    fn test_from_storage_error_invalid_key() {
        let storage_err = StorageError::InvalidKey("Invalid key".to_string());
        let HttpAppError(app_err) = storage_err.into();
        match app_err {
            AppError::InvalidInput(msg) => assert_eq!(msg, "Invalid key"),
            _ => panic!("Expected InvalidInput variant"),
        }
    }

    #[test]
    fn test_from_processing_error_too_large() {
        let HttpAppError(app_err) = ProcessingError::TooLarge { limit_bytes: 500 }.into();
        assert_eq!(app_err.http_status_code(), 413);
        match app_err {
            AppError::PayloadTooLarge(msg) => assert!(msg.contains("500")),
            _ => panic!("Expected PayloadTooLarge variant"),
        }
    }

    #[test]
    fn test_from_processing_error_tool_failure_is_internal() {
        let HttpAppError(app_err) = ProcessingError::ProbeFailed("exit 1".to_string()).into();
        assert_eq!(app_err.http_status_code(), 500);
        match app_err {
            AppError::Processing(msg) => assert!(msg.contains("exit 1")),
            _ => panic!("Expected Processing variant"),
        }
    }

    #[test]
    fn test_from_processing_error_no_video_stream_is_input() {
        let HttpAppError(app_err) = ProcessingError::NoVideoStream.into();
        assert_eq!(app_err.http_status_code(), 400);
    }

    #[test]
    fn test_from_processing_error_timeout_is_internal() {
        let err = ProcessingError::Timeout {
            tool: "ffmpeg".to_string(),
            secs: 300,
        };
        let HttpAppError(app_err) = err.into();
        assert_eq!(app_err.http_status_code(), 500);
        assert_eq!(app_err.error_code(), "MEDIA_PROCESSING_ERROR");
    }

    /// Verifies the public error response contract: serialized ErrorResponse
    /// has "error", "code", "recoverable", and optionally "details" /
    /// "error_type".
    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            error: "Not found".to_string(),
            details: Some("Video not found".to_string()),
            error_type: Some("NotFound".to_string()),
            code: "NOT_FOUND".to_string(),
            recoverable: false,
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.get("error").and_then(|v| v.as_str()).is_some());
        assert!(json.get("recoverable").and_then(|v| v.as_bool()).is_some());
        assert_eq!(json.get("code").and_then(|v| v.as_str()), Some("NOT_FOUND"));
    }
}
