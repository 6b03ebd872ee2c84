// HTTP-facing error type for the relay handlers
//
// Every failure is answered with the same envelope:
// `{ "ok": false, "error": ..., "details"?: ..., "raw"?: ... }`

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::ai::LlmError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller sent a blank description or an empty conversation.
    #[error("{0}")]
    BadRequest(&'static str),

    /// No provider credential was configured at startup.
    #[error("Server is misconfigured: missing OPENAI_API_KEY")]
    MissingCredential,

    /// The provider answered with a non-success status.
    #[error("OpenAI error")]
    Upstream { status: u16, body: String },

    /// The provider answered without any completion text.
    #[error("OpenAI returned no content")]
    NoContent { raw: Option<String> },

    /// Structured output was requested but the content is not JSON.
    #[error("OpenAI returned invalid JSON")]
    InvalidJson { raw: String },

    /// The provider could not be reached.
    #[error("Failed to reach OpenAI: {0}")]
    Transport(String),
}

#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Transport(_) => StatusCode::BAD_GATEWAY,
            ApiError::MissingCredential
            | ApiError::Upstream { .. }
            | ApiError::NoContent { .. }
            | ApiError::InvalidJson { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Transport(e) => ApiError::Transport(e.to_string()),
            LlmError::Upstream { status, body } => ApiError::Upstream {
                status: status.as_u16(),
                body,
            },
            LlmError::Malformed { raw } => ApiError::NoContent { raw: Some(raw) },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        let (details, raw) = match self {
            ApiError::Upstream { status: upstream, body } => {
                error!(upstream_status = upstream, details = %body, "provider error");
                (Some(body), None)
            }
            ApiError::NoContent { raw } => {
                error!(raw = ?raw, "provider returned no content");
                (None, raw)
            }
            ApiError::InvalidJson { raw } => {
                error!(raw = %raw, "provider returned invalid JSON");
                (None, Some(raw))
            }
            ApiError::BadRequest(_) => {
                warn!(error = %message, "rejected request");
                (None, None)
            }
            ApiError::MissingCredential | ApiError::Transport(_) => {
                error!(error = %message, "request failed");
                (None, None)
            }
        };

        let body = ErrorBody {
            ok: false,
            error: message,
            details,
            raw,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::BadRequest("Description is required").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::MissingCredential.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Upstream {
                status: 429,
                body: String::new()
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::InvalidJson { raw: "x".into() }.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Transport("connection refused".into()).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_envelope_omits_empty_extras() {
        let body = ErrorBody {
            ok: false,
            error: "messages array is required".into(),
            details: None,
            raw: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "ok": false, "error": "messages array is required" })
        );
    }

    #[test]
    fn test_malformed_completion_maps_to_no_content() {
        let err: ApiError = LlmError::Malformed { raw: "<html>".into() }.into();
        assert!(matches!(err, ApiError::NoContent { raw: Some(ref r) } if r == "<html>"));
    }
}
