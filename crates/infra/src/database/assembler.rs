//! Read-side profile assembly.
//!
//! Joins a header row with its four satellite sets into the canonical
//! [`AvatarProfile`] view. Every read path goes through [`assemble`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use fitspace_domain::{
    AvatarProfile, MeasurementMap, MorphTarget, QuickModeSettings, Result,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::manager::map_sql_error;

/// Header column list shared by every avatar SELECT.
pub(crate) const HEADER_COLUMNS: &str = "id, user_id, name, gender, age_range, creation_mode, \
     source, quick_mode, created_by_session, created_at, updated_at";

/// Raw `avatars` row, before satellite hydration.
pub(crate) struct HeaderRow {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub gender: Option<String>,
    pub age_range: Option<String>,
    pub creation_mode: Option<String>,
    pub source: Option<String>,
    pub quick_mode: bool,
    pub created_by_session: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

pub(crate) fn map_header_row(row: &Row<'_>) -> rusqlite::Result<HeaderRow> {
    let id: String = row.get(0)?;
    let id = Uuid::parse_str(&id).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
    })?;
    Ok(HeaderRow {
        id,
        user_id: row.get(1)?,
        name: row.get(2)?,
        gender: row.get(3)?,
        age_range: row.get(4)?,
        creation_mode: row.get(5)?,
        source: row.get(6)?,
        quick_mode: row.get::<_, i64>(7)? != 0,
        created_by_session: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

/// Hydrate a header row into the canonical profile view.
///
/// The effective `quickMode` boolean is the stored flag OR'd with settings
/// presence, so read-after-write stays stable with the normalizer's rule.
pub(crate) fn assemble(conn: &Connection, header: HeaderRow) -> Result<AvatarProfile> {
    let basic = fetch_measurements(conn, header.id, "avatar_basic_measurements")?;
    let body = fetch_measurements(conn, header.id, "avatar_body_measurements")?;
    let morph_targets = fetch_morph_targets(conn, header.id)?;
    let quick_mode_settings = fetch_quick_mode_settings(conn, header.id)?;

    Ok(AvatarProfile {
        id: header.id,
        user_id: header.user_id,
        name: header.name,
        gender: header.gender,
        age_range: header.age_range,
        creation_mode: header.creation_mode,
        source: header.source,
        quick_mode: header.quick_mode || quick_mode_settings.is_some(),
        created_by_session: header.created_by_session,
        basic_measurements: basic,
        body_measurements: body,
        morph_targets,
        quick_mode_settings,
        created_at: from_epoch(header.created_at),
        updated_at: from_epoch(header.updated_at),
    })
}

fn fetch_measurements(conn: &Connection, avatar_id: Uuid, table: &str) -> Result<MeasurementMap> {
    let mut stmt = conn
        .prepare(&format!("SELECT measurement_key, value FROM {table} WHERE avatar_id = ?1"))
        .map_err(map_sql_error)?;
    let rows = stmt
        .query_map(params![avatar_id.to_string()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })
        .map_err(map_sql_error)?
        .collect::<rusqlite::Result<MeasurementMap>>()
        .map_err(map_sql_error)?;
    Ok(rows)
}

fn fetch_morph_targets(conn: &Connection, avatar_id: Uuid) -> Result<Vec<MorphTarget>> {
    let mut stmt = conn
        .prepare(
            "SELECT
                amt.morph_id,
                amt.backend_key,
                amt.slider_value,
                amt.unreal_value,
                amt.updated_at,
                md.backend_key AS definition_backend_key
             FROM avatar_morph_targets AS amt
             LEFT JOIN morph_definitions AS md ON md.id = amt.morph_id
             WHERE amt.avatar_id = ?1
             ORDER BY amt.morph_id",
        )
        .map_err(map_sql_error)?;

    let targets = stmt
        .query_map(params![avatar_id.to_string()], |row| {
            let own_key: Option<String> = row.get(1)?;
            let definition_key: Option<String> = row.get(5)?;
            Ok(MorphTarget {
                id: row.get(0)?,
                // A target inherits the shared definition's backend key when
                // its own row never stored one.
                backend_key: own_key.or(definition_key),
                slider_value: row.get(2)?,
                unreal_value: row.get(3)?,
                updated_at: Some(from_epoch(row.get(4)?)),
            })
        })
        .map_err(map_sql_error)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(map_sql_error)?;
    Ok(targets)
}

fn fetch_quick_mode_settings(
    conn: &Connection,
    avatar_id: Uuid,
) -> Result<Option<QuickModeSettings>> {
    let row = conn
        .query_row(
            "SELECT body_shape, athletic_level, measurements, updated_at
             FROM avatar_quickmode_settings WHERE avatar_id = ?1",
            params![avatar_id.to_string()],
            |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            },
        )
        .optional()
        .map_err(map_sql_error)?;

    let Some((body_shape, athletic_level, measurements_json, updated_at)) = row else {
        return Ok(None);
    };

    let measurements: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(&measurements_json).unwrap_or_default();

    let settings = QuickModeSettings {
        body_shape,
        athletic_level,
        measurements,
        updated_at: Some(from_epoch(updated_at)),
    };
    // A row whose every content field is empty reads back as "no settings",
    // mirroring the write-side collapse.
    Ok(if settings.is_empty() { None } else { Some(settings) })
}

fn from_epoch(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or(DateTime::UNIX_EPOCH)
}
