//! Resolved identity tuple supplied by the external identity provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session metadata attached to an authenticated request.
///
/// Used only to keep the shadow `users` record in sync; never consulted for
/// authorization decisions inside the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub user_id: String,
    pub email: Option<String>,
    pub session_id: Option<String>,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl UserContext {
    /// Context carrying only the subject, with no session metadata.
    pub fn bare(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
            session_id: None,
            issued_at: None,
            expires_at: None,
            access_token: None,
            refresh_token: None,
        }
    }
}
