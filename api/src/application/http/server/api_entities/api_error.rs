use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use foodlens_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::application::http::server::app_state::Diagnostics;

pub const PROCESSING_ERROR_MESSAGE: &str = "Error processing image";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    /// Analysis failed after the request was accepted.
    #[error("Error processing image: {}", .0.details)]
    ProcessingFailed(ProcessingFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingFailure {
    pub details: String,
    pub stack: String,
    pub api_key_configured: bool,
    pub expose: bool,
}

/// Body of every 4xx response and of a redacted 500.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of a 500 when diagnostics are exposed.
///
/// Carries operator-facing detail (error text, error chain, credential
/// presence). It is not meant for end users; disable it with
/// `--expose-error-details false`.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingErrorBody {
    pub error: String,
    pub details: String,
    pub stack: String,
    pub api_key: bool,
}

impl ApiError {
    /// Map a failed analysis to its response, logging the full error
    /// server-side whatever the exposure setting.
    pub fn from_analysis(error: CoreError, diagnostics: Diagnostics) -> Self {
        match error {
            CoreError::MissingImage => ApiError::BadRequest(error.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    api_key_configured = diagnostics.api_key_configured,
                    "Label analysis failed"
                );
                ApiError::ProcessingFailed(ProcessingFailure {
                    details: other.to_string(),
                    stack: error_chain(&other),
                    api_key_configured: diagnostics.api_key_configured,
                    expose: diagnostics.expose,
                })
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ProcessingFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to a person on the HTML page. Follows the same exposure
    /// rule as the JSON body.
    pub fn display_message(&self) -> String {
        match self {
            ApiError::BadRequest(message) | ApiError::PayloadTooLarge(message) => {
                message.clone()
            }
            ApiError::ProcessingFailed(failure) if failure.expose => {
                format!("{PROCESSING_ERROR_MESSAGE}: {}", failure.details)
            }
            ApiError::ProcessingFailed(_) => PROCESSING_ERROR_MESSAGE.to_string(),
        }
    }
}

fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut lines = vec![format!("{error:?}")];
    let mut source = error.source();
    while let Some(cause) = source {
        lines.push(format!("caused by: {cause}"));
        source = cause.source();
    }
    lines.join("\n")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody { error: message }),
            )
                .into_response(),
            ApiError::PayloadTooLarge(message) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorBody { error: message }),
            )
                .into_response(),
            ApiError::ProcessingFailed(failure) if failure.expose => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ProcessingErrorBody {
                    error: PROCESSING_ERROR_MESSAGE.to_string(),
                    details: failure.details,
                    stack: failure.stack,
                    api_key: failure.api_key_configured,
                }),
            )
                .into_response(),
            ApiError::ProcessingFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: PROCESSING_ERROR_MESSAGE.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostics(expose: bool) -> Diagnostics {
        Diagnostics {
            expose,
            api_key_configured: false,
        }
    }

    #[test]
    fn missing_image_is_a_bad_request() {
        let err = ApiError::from_analysis(CoreError::MissingImage, diagnostics(true));
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn external_failure_carries_diagnostics() {
        let err = ApiError::from_analysis(
            CoreError::ExternalServiceError("quota".to_string()),
            diagnostics(true),
        );
        let ApiError::ProcessingFailed(failure) = &err else {
            panic!("expected processing failure, got {err:?}");
        };
        assert!(failure.details.contains("quota"));
        assert!(failure.stack.contains("ExternalServiceError"));
        assert!(!failure.api_key_configured);
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn processing_body_uses_camel_case_api_key() {
        let body = ProcessingErrorBody {
            error: PROCESSING_ERROR_MESSAGE.to_string(),
            details: "d".to_string(),
            stack: "s".to_string(),
            api_key: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["apiKey"], true);
    }

    #[test]
    fn payload_too_large_keeps_its_status_on_the_page_and_in_json() {
        let err = ApiError::PayloadTooLarge("too big".to_string());
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.display_message(), "too big");
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
