//! Shadow `users` record sync.
//!
//! Runs inside the caller's transaction before any profile mutation. Without
//! a context this is a bare existence upsert; with one, every identity field
//! is overwritten (last write wins) and `updated_at` bumped.

use chrono::Utc;
use fitspace_domain::{Result, UserContext};
use rusqlite::{params, Connection};

use super::manager::map_sql_error;

pub(crate) fn ensure_user(
    conn: &Connection,
    user_id: &str,
    context: Option<&UserContext>,
) -> Result<()> {
    let now = Utc::now().timestamp();

    let Some(context) = context else {
        conn.execute(
            "INSERT INTO users (id, created_at, updated_at) VALUES (?1, ?2, ?2)
             ON CONFLICT (id) DO NOTHING",
            params![user_id, now],
        )
        .map_err(map_sql_error)?;
        return Ok(());
    };

    conn.execute(
        "INSERT INTO users (
            id, email, session_id, issued_at, expires_at,
            access_token, refresh_token, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
         ON CONFLICT (id) DO UPDATE SET
            email = excluded.email,
            session_id = excluded.session_id,
            issued_at = excluded.issued_at,
            expires_at = excluded.expires_at,
            access_token = excluded.access_token,
            refresh_token = excluded.refresh_token,
            updated_at = excluded.updated_at",
        params![
            user_id,
            context.email,
            context.session_id,
            context.issued_at.map(|at| at.timestamp()),
            context.expires_at.map(|at| at.timestamp()),
            context.access_token,
            context.refresh_token,
            now,
        ],
    )
    .map_err(map_sql_error)?;
    Ok(())
}
