//! # Fitspace API
//!
//! HTTP surface for the avatar profile service: bearer-gated REST routes over
//! the [`fitspace_core::AvatarStore`] port, with per-user ownership checks
//! and a consistent JSON error body.

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
