//! SQLite implementation of the [`AvatarStore`] port.
//!
//! Every operation checks out one pooled connection and runs as one
//! transaction: commit on success, rollback (via drop) on any error. Blocking
//! SQL runs inside `tokio::task::spawn_blocking`.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use fitspace_core::AvatarStore;
use fitspace_domain::{
    AvatarError, AvatarList, AvatarProfile, ProfileMutation, Result, UserContext,
};
use rusqlite::{params, Connection, OptionalExtension};
use tokio::task;
use tracing::debug;
use uuid::Uuid;

use super::assembler::{self, HeaderRow, HEADER_COLUMNS};
use super::manager::{map_sql_error, DbManager};
use super::user_sync::ensure_user;

/// Hard per-user profile quota; slots are the integers 1..=5.
const MAX_AVATARS_PER_USER: i64 = 5;

/// Name applied when the payload's name is blank after trimming.
const DEFAULT_AVATAR_NAME: &str = "Untitled Avatar";

/// SQLite-backed implementation of [`AvatarStore`].
pub struct SqliteAvatarStore {
    db: Arc<DbManager>,
}

impl SqliteAvatarStore {
    /// Create a new store over an injected database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AvatarStore for SqliteAvatarStore {
    async fn list_avatars(
        &self,
        user_id: &str,
        limit: usize,
        context: Option<UserContext>,
    ) -> Result<AvatarList> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_owned();

        task::spawn_blocking(move || -> Result<AvatarList> {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;

            ensure_user(&tx, &user_id, context.as_ref())?;

            let mut stmt = tx
                .prepare(&format!(
                    "SELECT {HEADER_COLUMNS} FROM avatars
                     WHERE user_id = ?1 ORDER BY created_at, id"
                ))
                .map_err(map_sql_error)?;
            let rows = stmt
                .query_map(params![user_id], assembler::map_header_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<HeaderRow>>>()
                .map_err(map_sql_error)?;
            // The statement borrows the transaction; release it before commit.
            drop(stmt);

            let total = rows.len();
            let items = rows
                .into_iter()
                .take(limit)
                .map(|header| assembler::assemble(&tx, header))
                .collect::<Result<Vec<AvatarProfile>>>()?;

            tx.commit().map_err(map_sql_error)?;
            debug!(user_id = %user_id, total, returned = items.len(), "avatars listed");

            Ok(AvatarList { user_id, limit, count: items.len(), total, items })
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_avatar(&self, user_id: &str, avatar_id: &str) -> Result<AvatarProfile> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_owned();
        let avatar_id = avatar_id.to_owned();

        task::spawn_blocking(move || -> Result<AvatarProfile> {
            let avatar_uuid = parse_avatar_id(&avatar_id)?;
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;

            let header = fetch_header(&tx, &user_id, avatar_uuid)?
                .ok_or_else(|| AvatarError::NotFound(avatar_id.clone()))?;
            let profile = assembler::assemble(&tx, header)?;

            tx.commit().map_err(map_sql_error)?;
            Ok(profile)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn create_avatar(
        &self,
        user_id: &str,
        mutation: ProfileMutation,
        context: Option<UserContext>,
    ) -> Result<AvatarProfile> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_owned();

        task::spawn_blocking(move || -> Result<AvatarProfile> {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;

            ensure_user(&tx, &user_id, context.as_ref())?;
            let slot = find_available_slot(&tx, &user_id)?;

            let avatar_uuid = Uuid::new_v4();
            let now = Utc::now().timestamp();
            tx.execute(
                "INSERT INTO avatars (
                    id, user_id, name, slot, gender, age_range, creation_mode,
                    source, quick_mode, created_by_session, created_at, updated_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
                params![
                    avatar_uuid.to_string(),
                    user_id,
                    effective_name(&mutation.name),
                    slot,
                    mutation.gender,
                    mutation.age_range,
                    mutation.creation_mode,
                    mutation.source,
                    mutation.quick_mode,
                    mutation.created_by_session,
                    now,
                ],
            )
            .map_err(map_constraint_error)?;

            replace_satellites(&tx, avatar_uuid, &mutation)?;

            let header = fetch_header(&tx, &user_id, avatar_uuid)?
                .ok_or_else(|| AvatarError::Internal("avatar row missing after insert".into()))?;
            let profile = assembler::assemble(&tx, header)?;

            tx.commit().map_err(map_sql_error)?;
            debug!(user_id = %user_id, avatar_id = %avatar_uuid, slot, "avatar created");
            Ok(profile)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update_avatar(
        &self,
        user_id: &str,
        avatar_id: &str,
        mutation: ProfileMutation,
        context: Option<UserContext>,
    ) -> Result<AvatarProfile> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_owned();
        let avatar_id = avatar_id.to_owned();

        task::spawn_blocking(move || -> Result<AvatarProfile> {
            let avatar_uuid = parse_avatar_id(&avatar_id)?;
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;

            ensure_user(&tx, &user_id, context.as_ref())?;

            fetch_header(&tx, &user_id, avatar_uuid)?
                .ok_or_else(|| AvatarError::NotFound(avatar_id.clone()))?;

            // Slot is immutable and deliberately untouched here.
            let now = Utc::now().timestamp();
            tx.execute(
                "UPDATE avatars SET
                    name = ?1, gender = ?2, age_range = ?3, creation_mode = ?4,
                    source = ?5, quick_mode = ?6, created_by_session = ?7, updated_at = ?8
                 WHERE id = ?9",
                params![
                    effective_name(&mutation.name),
                    mutation.gender,
                    mutation.age_range,
                    mutation.creation_mode,
                    mutation.source,
                    mutation.quick_mode,
                    mutation.created_by_session,
                    now,
                    avatar_uuid.to_string(),
                ],
            )
            .map_err(map_constraint_error)?;

            replace_satellites(&tx, avatar_uuid, &mutation)?;

            let header = fetch_header(&tx, &user_id, avatar_uuid)?
                .ok_or_else(|| AvatarError::Internal("avatar row missing after update".into()))?;
            let profile = assembler::assemble(&tx, header)?;

            tx.commit().map_err(map_sql_error)?;
            debug!(user_id = %user_id, avatar_id = %avatar_uuid, "avatar updated");
            Ok(profile)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete_avatar(&self, user_id: &str, avatar_id: &str) -> Result<()> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_owned();
        let avatar_id = avatar_id.to_owned();

        task::spawn_blocking(move || -> Result<()> {
            let avatar_uuid = parse_avatar_id(&avatar_id)?;
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;

            let exists: Option<i64> = tx
                .query_row(
                    "SELECT 1 FROM avatars WHERE id = ?1 AND user_id = ?2",
                    params![avatar_uuid.to_string(), user_id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(map_sql_error)?;
            if exists.is_none() {
                return Err(AvatarError::NotFound(avatar_id.clone()));
            }

            delete_satellites(&tx, avatar_uuid)?;
            tx.execute(
                "DELETE FROM avatars WHERE id = ?1 AND user_id = ?2",
                params![avatar_uuid.to_string(), user_id],
            )
            .map_err(map_sql_error)?;

            tx.commit().map_err(map_sql_error)?;
            debug!(user_id = %user_id, avatar_id = %avatar_uuid, "avatar deleted");
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_avatar_id(avatar_id: &str) -> Result<Uuid> {
    Uuid::parse_str(avatar_id).map_err(|_| AvatarError::InvalidId(avatar_id.to_owned()))
}

fn effective_name(name: &str) -> &str {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_AVATAR_NAME
    } else {
        trimmed
    }
}

fn fetch_header(conn: &Connection, user_id: &str, avatar_id: Uuid) -> Result<Option<HeaderRow>> {
    conn.query_row(
        &format!("SELECT {HEADER_COLUMNS} FROM avatars WHERE id = ?1 AND user_id = ?2"),
        params![avatar_id.to_string(), user_id],
        assembler::map_header_row,
    )
    .optional()
    .map_err(map_sql_error)
}

/// Lowest free slot in 1..=5, or `QuotaExceeded`.
fn find_available_slot(conn: &Connection, user_id: &str) -> Result<i64> {
    let mut stmt =
        conn.prepare("SELECT slot FROM avatars WHERE user_id = ?1").map_err(map_sql_error)?;
    let used = stmt
        .query_map(params![user_id], |row| row.get::<_, i64>(0))
        .map_err(map_sql_error)?
        .collect::<rusqlite::Result<HashSet<i64>>>()
        .map_err(map_sql_error)?;

    (1..=MAX_AVATARS_PER_USER)
        .find(|slot| !used.contains(slot))
        .ok_or(AvatarError::QuotaExceeded)
}

/// Replace all four satellite sets for an avatar: unconditional
/// delete-then-insert, not a diff. Shared morph definitions are the one
/// exception; they are upserted and keep an existing backend key when the new
/// value is null.
fn replace_satellites(conn: &Connection, avatar_id: Uuid, mutation: &ProfileMutation) -> Result<()> {
    delete_satellites(conn, avatar_id)?;
    let id = avatar_id.to_string();
    let now = Utc::now().timestamp();

    for (key, value) in &mutation.basic_measurements {
        conn.execute(
            "INSERT INTO avatar_basic_measurements (avatar_id, measurement_key, value)
             VALUES (?1, ?2, ?3)",
            params![id, key, value],
        )
        .map_err(map_sql_error)?;
    }

    for (key, value) in &mutation.body_measurements {
        conn.execute(
            "INSERT INTO avatar_body_measurements (avatar_id, measurement_key, value)
             VALUES (?1, ?2, ?3)",
            params![id, key, value],
        )
        .map_err(map_sql_error)?;
    }

    for target in &mutation.morph_targets {
        conn.execute(
            "INSERT INTO morph_definitions (id, backend_key, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (id) DO UPDATE SET
                backend_key = COALESCE(excluded.backend_key, morph_definitions.backend_key),
                updated_at = excluded.updated_at",
            params![target.id, target.backend_key, now],
        )
        .map_err(map_sql_error)?;

        conn.execute(
            "INSERT INTO avatar_morph_targets (
                avatar_id, morph_id, backend_key, slider_value, unreal_value, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                target.id,
                target.backend_key,
                target.slider_value,
                target.unreal_value,
                now,
            ],
        )
        .map_err(map_sql_error)?;
    }

    if let Some(settings) = &mutation.quick_mode_settings {
        let measurements_json = serde_json::to_string(&settings.measurements)
            .map_err(|err| AvatarError::Internal(err.to_string()))?;
        conn.execute(
            "INSERT INTO avatar_quickmode_settings (
                avatar_id, body_shape, athletic_level, measurements, created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![id, settings.body_shape, settings.athletic_level, measurements_json, now],
        )
        .map_err(map_sql_error)?;
    }

    Ok(())
}

fn delete_satellites(conn: &Connection, avatar_id: Uuid) -> Result<()> {
    let id = avatar_id.to_string();
    for table in [
        "avatar_basic_measurements",
        "avatar_body_measurements",
        "avatar_morph_targets",
        "avatar_quickmode_settings",
    ] {
        conn.execute(&format!("DELETE FROM {table} WHERE avatar_id = ?1"), params![id])
            .map_err(map_sql_error)?;
    }
    Ok(())
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Translate a `(user_id, name)` unique violation into the recoverable
/// `DuplicateName`; anything else stays an unclassified storage fault.
fn map_constraint_error(err: rusqlite::Error) -> AvatarError {
    if let rusqlite::Error::SqliteFailure(code, Some(message)) = &err {
        if code.code == rusqlite::ErrorCode::ConstraintViolation
            && message.contains("avatars.user_id, avatars.name")
        {
            return AvatarError::DuplicateName;
        }
    }
    map_sql_error(err)
}

fn map_join_error(err: task::JoinError) -> AvatarError {
    AvatarError::Internal(format!("Task join error: {err}"))
}

// =============================================================================
// Tests
// =============================================================================
