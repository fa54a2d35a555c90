//! HTTP route handlers.

use axum::extract::{Path, State};
use axum::http::{header, HeaderName, Method, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use fitspace_core::normalize_mutation;
use fitspace_domain::{AvatarList, AvatarProfile};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Listings return at most one page of the per-user slots.
const LIST_LIMIT: usize = 5;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_owned() })
}

/// Build the complete router with all routes.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    let origins: Vec<_> =
        cors_origins.iter().filter_map(|origin| origin.parse().ok()).collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static("x-user-id"),
            HeaderName::from_static("x-user-email"),
            HeaderName::from_static("x-session-id"),
            HeaderName::from_static("x-refresh-token"),
        ]);

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/users/{user_id}/avatars",
            get(list_avatars).post(create_avatar),
        )
        .route(
            "/api/users/{user_id}/avatars/{avatar_id}",
            get(get_avatar).put(update_avatar).delete(delete_avatar),
        )
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

fn check_owner(user: &AuthenticatedUser, path_user_id: &str) -> Result<()> {
    if user.user_id() == path_user_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

async fn list_avatars(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    user: AuthenticatedUser,
) -> Result<Json<AvatarList>> {
    check_owner(&user, &user_id)?;
    let list = state.store.list_avatars(&user_id, LIST_LIMIT, Some(user.context)).await?;
    Ok(Json(list))
}

async fn get_avatar(
    State(state): State<AppState>,
    Path((user_id, avatar_id)): Path<(String, String)>,
    user: AuthenticatedUser,
) -> Result<Json<AvatarProfile>> {
    check_owner(&user, &user_id)?;
    let profile = state.store.get_avatar(&user_id, &avatar_id).await?;
    Ok(Json(profile))
}

async fn create_avatar(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    user: AuthenticatedUser,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<AvatarProfile>)> {
    check_owner(&user, &user_id)?;
    let mutation = normalize_mutation(&payload)?;
    let profile = state.store.create_avatar(&user_id, mutation, Some(user.context)).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn update_avatar(
    State(state): State<AppState>,
    Path((user_id, avatar_id)): Path<(String, String)>,
    user: AuthenticatedUser,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<AvatarProfile>> {
    check_owner(&user, &user_id)?;
    let mutation = normalize_mutation(&payload)?;
    let profile =
        state.store.update_avatar(&user_id, &avatar_id, mutation, Some(user.context)).await?;
    Ok(Json(profile))
}

async fn delete_avatar(
    State(state): State<AppState>,
    Path((user_id, avatar_id)): Path<(String, String)>,
    user: AuthenticatedUser,
) -> Result<StatusCode> {
    check_owner(&user, &user_id)?;
    state.store.delete_avatar(&user_id, &avatar_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
