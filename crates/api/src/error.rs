//! HTTP error responses.
//!
//! Wraps [`AvatarError`] with the two failures only the HTTP layer can
//! produce (missing credentials, wrong owner) and maps everything onto a
//! consistent JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fitspace_domain::AvatarError;
use serde::Serialize;

/// Error type for every handler in this crate.
#[derive(Debug)]
pub enum ApiError {
    /// No usable `Authorization` header or identity headers.
    Unauthorized,
    /// Authenticated, but for a different user than the path names.
    Forbidden,
    /// Anything the domain or storage layer rejected.
    Avatar(AvatarError),
}

impl From<AvatarError> for ApiError {
    fn from(err: AvatarError) -> Self {
        Self::Avatar(err)
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Authentication required".to_owned())
            }
            Self::Forbidden => {
                (StatusCode::FORBIDDEN, "Not allowed for this user".to_owned())
            }
            Self::Avatar(err) => {
                let status = match &err {
                    AvatarError::Validation { .. } | AvatarError::InvalidId(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    AvatarError::NotFound(_) => StatusCode::NOT_FOUND,
                    AvatarError::DuplicateName | AvatarError::QuotaExceeded => {
                        StatusCode::CONFLICT
                    }
                    AvatarError::Database(msg)
                    | AvatarError::Config(msg)
                    | AvatarError::Internal(msg) => {
                        tracing::error!(error = %msg, "request failed");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                // Hide internals behind a generic message.
                let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
                    "Internal server error".to_owned()
                } else {
                    err.to_string()
                };
                (status, message)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, ApiError>;
