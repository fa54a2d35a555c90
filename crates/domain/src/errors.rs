//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the avatar backend.
///
/// `Validation` and `InvalidId` are client errors raised before any write
/// happens; `DuplicateName` and `QuotaExceeded` are conflicts raised inside a
/// transaction (which is rolled back); `Database` is the unclassified storage
/// fault.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum AvatarError {
    #[error("{field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Avatar not found: {0}")]
    NotFound(String),

    #[error("Avatar name must be unique per user")]
    DuplicateName,

    #[error("User has reached the maximum of five avatars")]
    QuotaExceeded,

    #[error("Avatar identifier is invalid: {0}")]
    InvalidId(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AvatarError {
    /// Build a field-scoped validation error.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), reason: reason.into() }
    }
}

/// Result type alias for avatar backend operations
pub type Result<T> = std::result::Result<T, AvatarError>;
