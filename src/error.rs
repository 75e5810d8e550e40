//! Application error type and its HTTP mapping.
//!
//! Every layer returns [`AppError`]. Handlers return it directly and rely on
//! the [`IntoResponse`] impl to produce a JSON body of the form:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Short URL not found", "details": {} } }
//! ```
//!
//! Internal and storage failures are logged here and never expose their
//! underlying cause to the client.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

/// Unique constraint that a rejected insert collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    ShortCode,
    OriginalUrl,
}

impl UniqueKey {
    fn as_str(self) -> &'static str {
        match self {
            Self::ShortCode => "short_code",
            Self::OriginalUrl => "original_url",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing input. Surfaced as 400.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unknown short code. Surfaced as 404.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The mapping exists but its `expires_at` has passed. Surfaced as 410.
    #[error("{message}")]
    Expired { message: String, details: Value },

    /// Storage-level uniqueness violation. Recovered by the shortening service.
    #[error("Unique constraint violation on {}", key.as_str())]
    Conflict { key: UniqueKey },

    /// Code generation retry budget exceeded. Surfaced as 503.
    #[error("Failed to generate a unique short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    /// Storage or other unexpected failure. Surfaced as 500.
    #[error("{message}")]
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

    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(key: UniqueKey) -> Self {
        Self::Conflict { key }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code this error is surfaced with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Expired { .. } => StatusCode::GONE,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::GenerationExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its client-facing payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            Self::Validation { message, details } => ErrorInfo {
                code: "validation_error",
                message: message.clone(),
                details: details.clone(),
            },
            Self::NotFound { message, details } => ErrorInfo {
                code: "not_found",
                message: message.clone(),
                details: details.clone(),
            },
            Self::Expired { message, details } => ErrorInfo {
                code: "expired",
                message: message.clone(),
                details: details.clone(),
            },
            Self::Conflict { key } => ErrorInfo {
                code: "conflict",
                message: "Resource already exists".to_string(),
                details: json!({ "key": key.as_str() }),
            },
            Self::GenerationExhausted { .. } => ErrorInfo {
                code: "generation_exhausted",
                message: "Unable to allocate a short code, try again later".to_string(),
                details: json!({}),
            },
            Self::Internal { .. } => ErrorInfo {
                code: "internal_error",
                message: "Internal server error".to_string(),
                details: json!({}),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            Self::Internal { message, details } => {
                tracing::error!(%message, %details, "Request failed with internal error");
            }
            Self::GenerationExhausted { attempts } => {
                tracing::error!(attempts, "Short code space exhausted");
            }
            _ => {}
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            match db.constraint() {
                Some("url_mappings_short_code_key") => return Self::conflict(UniqueKey::ShortCode),
                Some("url_mappings_original_url_key") => {
                    return Self::conflict(UniqueKey::OriginalUrl);
                }
                _ => {}
            }
        }

        Self::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        Self::bad_request("Request validation failed", json!({ "fields": fields }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(
            "Invalid JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
