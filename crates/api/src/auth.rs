//! Bearer-token gate and identity extraction.
//!
//! Token verification lives in the external identity provider; by the time a
//! request reaches this service the provider has resolved the subject and
//! forwarded it in headers. This extractor only enforces that the bearer
//! token and the resolved subject are present.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use fitspace_domain::UserContext;

use crate::error::ApiError;

/// Forwarded identity headers.
const USER_ID_HEADER: &str = "x-user-id";
const USER_EMAIL_HEADER: &str = "x-user-email";
const SESSION_ID_HEADER: &str = "x-session-id";
const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";

/// The authenticated caller, rebuilt from the provider's forwarded headers.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub context: UserContext,
}

impl AuthenticatedUser {
    /// The subject the identity provider resolved for this request.
    pub fn user_id(&self) -> &str {
        &self.context.user_id
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let user_id = header_value(&parts.headers, USER_ID_HEADER)
            .ok_or(ApiError::Unauthorized)?;

        let mut context = UserContext::bare(&user_id);
        context.access_token = Some(token);
        context.email = header_value(&parts.headers, USER_EMAIL_HEADER);
        context.session_id = header_value(&parts.headers, SESSION_ID_HEADER);
        context.refresh_token = header_value(&parts.headers, REFRESH_TOKEN_HEADER);

        Ok(Self { context })
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = raw.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_owned())
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let value = headers.get(name)?.to_str().ok()?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}
