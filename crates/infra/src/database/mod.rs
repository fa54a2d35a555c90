//! SQLite persistence for avatar profiles.

mod assembler;
mod avatar_store;
mod manager;
mod user_sync;

pub use avatar_store::SqliteAvatarStore;
pub use manager::DbManager;
