//! Port interfaces for avatar profile persistence
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations for avatar profile operations.

use async_trait::async_trait;
use fitspace_domain::{AvatarList, AvatarProfile, ProfileMutation, Result, UserContext};

/// Trait for avatar profile persistence and retrieval.
///
/// Every method runs as one transaction: commit on success, rollback on any
/// error. When a `UserContext` is supplied it is upserted into the shadow
/// `users` record first, inside the same transaction.
#[async_trait]
pub trait AvatarStore: Send + Sync {
    /// List all avatars owned by `user_id`, ordered by `(created_at, id)`,
    /// truncated to `limit`. The result reports both truncated and total
    /// counts so callers can detect truncation.
    async fn list_avatars(
        &self,
        user_id: &str,
        limit: usize,
        context: Option<UserContext>,
    ) -> Result<AvatarList>;

    /// Fetch one avatar scoped by both id and owner. Returns `NotFound` when
    /// absent or owned by another user.
    async fn get_avatar(&self, user_id: &str, avatar_id: &str) -> Result<AvatarProfile>;

    /// Create an avatar in the lowest free slot (1..5), failing with
    /// `QuotaExceeded` when all slots are taken and `DuplicateName` on a
    /// `(user_id, name)` collision.
    async fn create_avatar(
        &self,
        user_id: &str,
        mutation: ProfileMutation,
        context: Option<UserContext>,
    ) -> Result<AvatarProfile>;

    /// Update header fields in place (slot is immutable) and replace all four
    /// satellite sets wholesale.
    async fn update_avatar(
        &self,
        user_id: &str,
        avatar_id: &str,
        mutation: ProfileMutation,
        context: Option<UserContext>,
    ) -> Result<AvatarProfile>;

    /// Delete an avatar and all of its satellite records.
    async fn delete_avatar(&self, user_id: &str, avatar_id: &str) -> Result<()>;
}
