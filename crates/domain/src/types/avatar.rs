//! Avatar profile types and the normalized write shape.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Measurement-key to numeric value mapping. Keys are unique and unordered;
/// a `BTreeMap` keeps serialization deterministic.
pub type MeasurementMap = BTreeMap<String, f64>;

/// A named morph-target slider controlling a 3D body-shape parameter.
///
/// `backend_key` may be inherited from the shared `morph_definitions` table
/// when the per-avatar row never stored one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MorphTarget {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slider_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unreal_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MorphTarget {
    /// A target carrying only an id, with no stored values yet.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            backend_key: None,
            slider_value: None,
            unreal_value: None,
            updated_at: None,
        }
    }
}

/// Optional quick-mode preset attached to a profile (0 or 1 per avatar).
///
/// `measurements` values are numeric on write; reads pass through whatever an
/// older client stored, so the value type stays loose here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickModeSettings {
    pub body_shape: Option<String>,
    pub athletic_level: Option<String>,
    pub measurements: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl QuickModeSettings {
    /// True when every content field is empty; such settings collapse to
    /// "no settings" on both the write and the read path.
    pub fn is_empty(&self) -> bool {
        self.body_shape.is_none() && self.athletic_level.is_none() && self.measurements.is_empty()
    }
}

/// Canonical avatar profile view: header fields plus the four satellite sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarProfile {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub gender: Option<String>,
    pub age_range: Option<String>,
    pub creation_mode: Option<String>,
    pub source: Option<String>,
    /// Derived on read: stored flag OR settings present.
    pub quick_mode: bool,
    pub created_by_session: Option<String>,
    pub basic_measurements: MeasurementMap,
    pub body_measurements: MeasurementMap,
    pub morph_targets: Vec<MorphTarget>,
    pub quick_mode_settings: Option<QuickModeSettings>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of listing a user's avatars. `total` is the untruncated row count;
/// `count` is the length of `items` after applying `limit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarList {
    pub user_id: String,
    pub limit: usize,
    pub count: usize,
    pub total: usize,
    pub items: Vec<AvatarProfile>,
}

/// A validated, normalized write payload produced by the normalizer.
///
/// Applied wholesale by the store: header fields update in place and all four
/// satellite sets are replaced. `name` is already trimmed; an empty string
/// means "use the default name".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileMutation {
    pub name: String,
    pub gender: Option<String>,
    pub age_range: Option<String>,
    pub creation_mode: Option<String>,
    pub source: Option<String>,
    pub quick_mode: bool,
    pub created_by_session: Option<String>,
    pub basic_measurements: MeasurementMap,
    pub body_measurements: MeasurementMap,
    /// Deterministically ordered by ascending morph id.
    pub morph_targets: Vec<MorphTarget>,
    pub quick_mode_settings: Option<QuickModeSettings>,
}
