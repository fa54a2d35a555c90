//! # Fitspace Infra
//!
//! Infrastructure layer: SQLite-backed persistence and configuration.
//!
//! This crate contains:
//! - [`database::DbManager`] — the owned connection pool, injected into stores
//! - [`database::SqliteAvatarStore`] — the transactional avatar repository
//! - The env-based configuration loader

pub mod config;
pub mod database;

pub use config::Config;
pub use database::{DbManager, SqliteAvatarStore};
