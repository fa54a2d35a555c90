//! # Fitspace Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The payload normalizer (untyped JSON -> validated `ProfileMutation`)
//! - Port/adapter interfaces (traits) for the profile store
//!
//! ## Architecture Principles
//! - Only depends on `fitspace-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod avatar;

// Re-export specific items to avoid ambiguity
pub use avatar::normalizer::{self, normalize_mutation};
pub use avatar::ports::AvatarStore;
