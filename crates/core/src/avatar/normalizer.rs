//! Payload normalizer: untyped JSON -> validated [`ProfileMutation`].
//!
//! Stateless and I/O free. Every rejection is a field-scoped
//! [`AvatarError::Validation`]; the boundary layer maps these to 400s.
//!
//! Normalization is deterministic: two equivalent payloads (e.g. morph
//! targets given as a mapping vs. a list, in any order) produce identical
//! mutations, with morph targets sorted by ascending id.

use std::collections::BTreeMap;

use fitspace_domain::{
    AvatarError, MeasurementMap, MorphTarget, ProfileMutation, QuickModeSettings, Result,
};
use serde_json::{Map, Value};

/// Accepted `gender` values.
pub const ALLOWED_GENDERS: &[&str] = &["female", "male", "non_binary", "unspecified"];

/// Semantic `ageRange` buckets.
pub const AGE_RANGE_BUCKETS: &[&str] =
    &["child", "teen", "young_adult", "adult", "mature", "senior"];

/// UI label ranges accepted as first-class `ageRange` values.
pub const AGE_RANGE_UI_LABELS: &[&str] =
    &["15-19", "20-29", "30-39", "40-49", "50-59", "60-69", "70-79", "80-89", "90-99"];

/// Accepted `creationMode` values.
pub const ALLOWED_CREATION_MODES: &[&str] = &["manual", "scan", "preset", "import"];

/// Accepted `source` values.
pub const ALLOWED_SOURCES: &[&str] = &["web", "ios", "android", "kiosk", "api", "integration"];

/// Reserved measurement key carrying metadata, never stored as a measurement.
const MEASUREMENT_STATUS_KEY: &str = "creationMode";

/// Keys accepted inside `quickModeSettings`.
const QUICK_MODE_KEYS: &[&str] = &["bodyShape", "athleticLevel", "measurements"];

/// Convert a raw JSON payload into a validated profile mutation.
pub fn normalize_mutation(payload: &Value) -> Result<ProfileMutation> {
    let Some(object) = payload.as_object() else {
        return Err(AvatarError::validation("payload", "must be a JSON object"));
    };

    let name = match object.get("name") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(_) => return Err(AvatarError::validation("name", "must be a string")),
    };

    let gender = normalize_enum(object.get("gender"), "gender", ALLOWED_GENDERS)?;
    let age_range = normalize_age_range(object.get("ageRange"))?;
    let mut creation_mode = normalize_creation_mode(object.get("creationMode"))?;
    let source = normalize_enum(object.get("source"), "source", ALLOWED_SOURCES)?;

    let quick_mode_settings = normalize_quick_mode_settings(object.get("quickModeSettings"))?;

    let quick_mode = match object.get("quickMode") {
        None | Some(Value::Null) => quick_mode_settings.is_some(),
        Some(Value::Bool(flag)) => *flag || quick_mode_settings.is_some(),
        Some(_) => return Err(AvatarError::validation("quickMode", "must be a boolean value")),
    };

    let created_by_session =
        normalize_optional_string(object.get("createdBySession"), "createdBySession")?;

    let (basic_measurements, basic_status) =
        normalize_measurements(object.get("basicMeasurements"), "basicMeasurements")?;
    let (body_measurements, body_status) =
        normalize_measurements(object.get("bodyMeasurements"), "bodyMeasurements")?;

    if let Some(embedded) = basic_status.or(body_status) {
        if let Some(top_level) = &creation_mode {
            if *top_level != embedded {
                return Err(AvatarError::validation(
                    "creationMode",
                    "provided in measurements does not match the top-level value",
                ));
            }
        }
        creation_mode = Some(embedded);
    }

    let morph_targets = normalize_morph_targets(object.get("morphTargets"))?;

    tracing::debug!(
        basic = basic_measurements.len(),
        body = body_measurements.len(),
        morphs = morph_targets.len(),
        quick_mode,
        "payload normalized"
    );

    Ok(ProfileMutation {
        name,
        gender,
        age_range,
        creation_mode,
        source,
        quick_mode,
        created_by_session,
        basic_measurements,
        body_measurements,
        morph_targets,
        quick_mode_settings,
    })
}

// ---------------------------------------------------------------------------
// Scalar helpers
// ---------------------------------------------------------------------------

fn normalize_enum(value: Option<&Value>, field: &str, allowed: &[&str]) -> Result<Option<String>> {
    let Some(value) = value else { return Ok(None) };
    match value {
        Value::Null => Ok(None),
        Value::String(raw) => {
            let normalized = raw.trim().to_lowercase();
            if normalized.is_empty() {
                return Ok(None);
            }
            if !allowed.contains(&normalized.as_str()) {
                let mut values: Vec<&str> = allowed.to_vec();
                values.sort_unstable();
                return Err(AvatarError::validation(
                    field,
                    format!("must be one of: {}", values.join(", ")),
                ));
            }
            Ok(Some(normalized))
        }
        _ => Err(AvatarError::validation(field, "must be a string")),
    }
}

fn normalize_age_range(value: Option<&Value>) -> Result<Option<String>> {
    let mut allowed: Vec<&str> = AGE_RANGE_BUCKETS.to_vec();
    allowed.extend_from_slice(AGE_RANGE_UI_LABELS);
    normalize_enum(value, "ageRange", &allowed)
}

fn normalize_creation_mode(value: Option<&Value>) -> Result<Option<String>> {
    normalize_enum(value, "creationMode", ALLOWED_CREATION_MODES)
}

fn normalize_optional_string(value: Option<&Value>, field: &str) -> Result<Option<String>> {
    let Some(value) = value else { return Ok(None) };
    match value {
        Value::Null => Ok(None),
        Value::String(raw) => {
            let trimmed = raw.trim();
            Ok(if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) })
        }
        _ => Err(AvatarError::validation(field, "must be a string")),
    }
}

// ---------------------------------------------------------------------------
// Measurements
// ---------------------------------------------------------------------------

/// Normalize one measurement mapping. The reserved `creationMode` key is
/// extracted as metadata (re-validated as the enum) and never stored; the
/// second tuple element carries it when present.
fn normalize_measurements(
    section: Option<&Value>,
    section_name: &str,
) -> Result<(MeasurementMap, Option<String>)> {
    let Some(section) = section else { return Ok((MeasurementMap::new(), None)) };
    if section.is_null() {
        return Ok((MeasurementMap::new(), None));
    }
    let Some(entries) = section.as_object() else {
        return Err(AvatarError::validation(section_name, "must be an object of numeric values"));
    };

    let mut normalized = MeasurementMap::new();
    let mut status = None;
    for (key, value) in entries {
        if key == MEASUREMENT_STATUS_KEY {
            status = normalize_creation_mode(Some(value))?;
            continue;
        }
        let Some(number) = value.as_f64() else {
            return Err(AvatarError::validation(
                format!("{section_name}.{key}"),
                "must be a number",
            ));
        };
        normalized.insert(key.clone(), number);
    }
    Ok((normalized, status))
}

// ---------------------------------------------------------------------------
// Quick-mode settings
// ---------------------------------------------------------------------------

fn normalize_quick_mode_settings(payload: Option<&Value>) -> Result<Option<QuickModeSettings>> {
    let Some(payload) = payload else { return Ok(None) };
    if payload.is_null() {
        return Ok(None);
    }
    let Some(entries) = payload.as_object() else {
        return Err(AvatarError::validation("quickModeSettings", "must be an object"));
    };

    let mut unexpected: Vec<&str> = entries
        .keys()
        .map(String::as_str)
        .filter(|key| !QUICK_MODE_KEYS.contains(key))
        .collect();
    if !unexpected.is_empty() {
        unexpected.sort_unstable();
        return Err(AvatarError::validation(
            "quickModeSettings",
            format!("contains unsupported fields: {}", unexpected.join(", ")),
        ));
    }

    let body_shape = normalize_settings_label(entries.get("bodyShape"), "quickModeSettings.bodyShape")?;
    let athletic_level =
        normalize_settings_label(entries.get("athleticLevel"), "quickModeSettings.athleticLevel")?;

    let mut measurements = BTreeMap::new();
    if let Some(section) = entries.get("measurements") {
        if !section.is_null() {
            let Some(section) = section.as_object() else {
                return Err(AvatarError::validation(
                    "quickModeSettings.measurements",
                    "must be an object of numbers",
                ));
            };
            for (key, value) in section {
                let normalized_key = key.trim();
                if normalized_key.is_empty() {
                    return Err(AvatarError::validation(
                        "quickModeSettings.measurements",
                        "keys must not be empty",
                    ));
                }
                let Some(number) = value.as_f64() else {
                    return Err(AvatarError::validation(
                        format!("quickModeSettings.measurements['{normalized_key}']"),
                        "must be a number",
                    ));
                };
                measurements.insert(normalized_key.to_owned(), Value::from(number));
            }
        }
    }

    let settings =
        QuickModeSettings { body_shape, athletic_level, measurements, updated_at: None };
    Ok(if settings.is_empty() { None } else { Some(settings) })
}

/// Lower-case a settings label and replace spaces with underscores; empty
/// collapses to absent.
fn normalize_settings_label(value: Option<&Value>, field: &str) -> Result<Option<String>> {
    let Some(value) = value else { return Ok(None) };
    match value {
        Value::Null => Ok(None),
        Value::String(raw) => {
            let normalized = raw.trim().to_lowercase().replace(' ', "_");
            Ok(if normalized.is_empty() { None } else { Some(normalized) })
        }
        _ => Err(AvatarError::validation(field, "must be a string")),
    }
}

// ---------------------------------------------------------------------------
// Morph targets
// ---------------------------------------------------------------------------

/// The accepted morph-target payload shapes, classified up front instead of
/// duck-typing each entry.
enum MorphPayload<'a> {
    /// `{ "<id>": <value>, ... }`
    Mapping(&'a Map<String, Value>),
    /// `[ {...}, ["<id>", <value>], ... ]`
    Sequence(&'a [Value]),
}

/// One entry of a sequence payload.
enum SequenceEntry<'a> {
    /// `{"id": ..., "sliderValue": ..., ...}`
    Object(&'a Map<String, Value>),
    /// `["<id>", <value>]`
    Pair(&'a Value, &'a Value),
}

impl<'a> MorphPayload<'a> {
    fn classify(payload: &'a Value) -> Result<Self> {
        match payload {
            Value::Object(map) => Ok(Self::Mapping(map)),
            Value::Array(items) => Ok(Self::Sequence(items)),
            _ => Err(AvatarError::validation(
                "morphTargets",
                "must be provided as an object or list of objects",
            )),
        }
    }
}

impl<'a> SequenceEntry<'a> {
    fn classify(entry: &'a Value) -> Result<Self> {
        match entry {
            Value::Object(map) => Ok(Self::Object(map)),
            Value::Array(pair) if pair.len() == 2 => Ok(Self::Pair(&pair[0], &pair[1])),
            _ => Err(AvatarError::validation(
                "morphTargets",
                "must be provided as objects with id/value data",
            )),
        }
    }
}

fn normalize_morph_targets(payload: Option<&Value>) -> Result<Vec<MorphTarget>> {
    let Some(payload) = payload else { return Ok(Vec::new()) };
    if payload.is_null() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    match MorphPayload::classify(payload)? {
        MorphPayload::Mapping(map) => {
            for (morph_id, value) in map {
                entries.push(normalize_morph_entry(morph_id.clone(), value)?);
            }
        }
        MorphPayload::Sequence(items) => {
            for item in items {
                match SequenceEntry::classify(item)? {
                    SequenceEntry::Object(object) => {
                        let id = object.get("id").ok_or_else(|| {
                            AvatarError::validation("morphTargets", "must include an 'id'")
                        })?;
                        entries.push(normalize_morph_entry(coerce_morph_id(id)?, item)?);
                    }
                    SequenceEntry::Pair(id, value) => {
                        entries.push(normalize_morph_entry(coerce_morph_id(id)?, value)?);
                    }
                }
            }
        }
    }

    // Duplicate ids collapse to the last-seen entry; the BTreeMap gives the
    // deterministic ascending-id ordering required for idempotence.
    let mut collapsed: BTreeMap<String, MorphTarget> = BTreeMap::new();
    for entry in entries {
        collapsed.insert(entry.id.clone(), entry);
    }
    Ok(collapsed.into_values().collect())
}

fn coerce_morph_id(value: &Value) -> Result<String> {
    match value {
        Value::Null => Err(AvatarError::validation("morphTargets", "require an 'id'")),
        Value::String(s) => Ok(s.clone()),
        other => Ok(other.to_string()),
    }
}

fn normalize_morph_entry(morph_id: String, raw_value: &Value) -> Result<MorphTarget> {
    let morph_id = morph_id.trim().to_owned();
    if morph_id.is_empty() {
        return Err(AvatarError::validation("morphTargets", "ids must not be empty"));
    }

    let mut target = MorphTarget::new(morph_id);
    match raw_value {
        Value::Object(object) => {
            if let Some(backend_key) = object.get("backendKey") {
                if !backend_key.is_null() {
                    let text = match backend_key {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    let trimmed = text.trim();
                    target.backend_key =
                        if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) };
                }
            }
            let slider = match object.get("sliderValue") {
                Some(value) if !value.is_null() => Some(value),
                _ => object.get("value"),
            };
            target.slider_value =
                normalize_optional_number(slider, &target.id, "sliderValue")?;
            target.unreal_value =
                normalize_optional_number(object.get("unrealValue"), &target.id, "unrealValue")?;
        }
        Value::Number(number) => {
            target.slider_value = number.as_f64();
        }
        Value::Null => {}
        _ => {
            return Err(AvatarError::validation(
                "morphTargets",
                "must be numbers or objects containing sliderValue/unrealValue",
            ));
        }
    }
    Ok(target)
}

fn normalize_optional_number(
    value: Option<&Value>,
    morph_id: &str,
    field: &str,
) -> Result<Option<f64>> {
    let Some(value) = value else { return Ok(None) };
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => Ok(number.as_f64()),
        _ => Err(AvatarError::validation(
            format!("morphTargets[{morph_id}].{field}"),
            "must be a number",
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn field_of(err: AvatarError) -> String {
        match err {
            AvatarError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn extended_metadata_is_lowercased() {
        let mutation = normalize_mutation(&json!({
            "name": "Runner",
            "gender": "Female",
            "ageRange": "Adult",
            "creationMode": "Manual",
            "source": "Web",
            "quickMode": true,
            "createdBySession": "session-xyz",
            "quickModeSettings": {
                "bodyShape": "Hourglass",
                "athleticLevel": "High",
                "measurements": {"waistCircumference": 70.5}
            }
        }))
        .unwrap();

        assert_eq!(mutation.name, "Runner");
        assert_eq!(mutation.gender.as_deref(), Some("female"));
        assert_eq!(mutation.age_range.as_deref(), Some("adult"));
        assert_eq!(mutation.creation_mode.as_deref(), Some("manual"));
        assert_eq!(mutation.source.as_deref(), Some("web"));
        assert!(mutation.quick_mode);
        assert_eq!(mutation.created_by_session.as_deref(), Some("session-xyz"));

        let settings = mutation.quick_mode_settings.unwrap();
        assert_eq!(settings.body_shape.as_deref(), Some("hourglass"));
        assert_eq!(settings.athletic_level.as_deref(), Some("high"));
        assert_eq!(settings.measurements["waistCircumference"], json!(70.5));
    }

    #[test]
    fn settings_labels_replace_spaces() {
        let mutation = normalize_mutation(&json!({
            "quickModeSettings": {"bodyShape": " Inverted Triangle "}
        }))
        .unwrap();
        let settings = mutation.quick_mode_settings.unwrap();
        assert_eq!(settings.body_shape.as_deref(), Some("inverted_triangle"));
    }

    #[test]
    fn creation_mode_extracted_from_measurements() {
        let mutation = normalize_mutation(&json!({
            "name": "Walker",
            "basicMeasurements": {"height": 172.4, "creationMode": "Preset"},
            "bodyMeasurements": {"chest": 95.2}
        }))
        .unwrap();

        assert_eq!(mutation.creation_mode.as_deref(), Some("preset"));
        assert_eq!(mutation.basic_measurements.len(), 1);
        assert_eq!(mutation.basic_measurements["height"], 172.4);
        assert_eq!(mutation.body_measurements["chest"], 95.2);
    }

    #[test]
    fn conflicting_creation_modes_rejected() {
        let err = normalize_mutation(&json!({
            "creationMode": "Manual",
            "basicMeasurements": {"creationMode": "Scan"}
        }))
        .unwrap_err();
        assert_eq!(field_of(err), "creationMode");
    }

    #[test]
    fn matching_creation_modes_accepted() {
        let mutation = normalize_mutation(&json!({
            "creationMode": "Scan",
            "bodyMeasurements": {"creationMode": "scan", "chest": 95.0}
        }))
        .unwrap();
        assert_eq!(mutation.creation_mode.as_deref(), Some("scan"));
    }

    #[test]
    fn quick_mode_settings_enable_flag() {
        let mutation = normalize_mutation(&json!({
            "name": "Sprinter",
            "quickModeSettings": {
                "bodyShape": "Pear",
                "measurements": {"hipCircumference": 102.3}
            }
        }))
        .unwrap();
        assert!(mutation.quick_mode);
    }

    #[test]
    fn explicit_false_flag_is_overridden_by_settings() {
        let mutation = normalize_mutation(&json!({
            "quickMode": false,
            "quickModeSettings": {"bodyShape": "pear"}
        }))
        .unwrap();
        assert!(mutation.quick_mode);
    }

    #[test]
    fn null_settings_clear_and_leave_flag_false() {
        let mutation = normalize_mutation(&json!({"quickModeSettings": null})).unwrap();
        assert!(mutation.quick_mode_settings.is_none());
        assert!(!mutation.quick_mode);
    }

    #[test]
    fn empty_settings_collapse_to_none() {
        let mutation = normalize_mutation(&json!({
            "quickModeSettings": {"bodyShape": "  ", "measurements": {}}
        }))
        .unwrap();
        assert!(mutation.quick_mode_settings.is_none());
        assert!(!mutation.quick_mode);
    }

    #[test]
    fn ui_age_range_label_accepted() {
        let mutation = normalize_mutation(&json!({"ageRange": "20-29"})).unwrap();
        assert_eq!(mutation.age_range.as_deref(), Some("20-29"));
    }

    #[test]
    fn name_is_trimmed() {
        let mutation = normalize_mutation(&json!({"name": "  Explorer  "})).unwrap();
        assert_eq!(mutation.name, "Explorer");
    }

    #[test]
    fn blank_enum_treated_as_absent() {
        let mutation = normalize_mutation(&json!({"gender": "   "})).unwrap();
        assert!(mutation.gender.is_none());
    }

    #[test]
    fn invalid_gender_rejected() {
        let err = normalize_mutation(&json!({"gender": "unknown"})).unwrap_err();
        assert_eq!(field_of(err), "gender");
    }

    #[test]
    fn invalid_quick_mode_type_rejected() {
        let err = normalize_mutation(&json!({"quickMode": "yes"})).unwrap_err();
        assert_eq!(field_of(err), "quickMode");
    }

    #[test]
    fn non_numeric_measurement_names_key() {
        let err = normalize_mutation(&json!({
            "bodyMeasurements": {"waist": "wide"}
        }))
        .unwrap_err();
        assert_eq!(field_of(err), "bodyMeasurements.waist");
    }

    #[test]
    fn non_numeric_quick_measurement_names_path() {
        let err = normalize_mutation(&json!({
            "quickModeSettings": {"measurements": {"waist": "n/a"}}
        }))
        .unwrap_err();
        assert_eq!(field_of(err), "quickModeSettings.measurements['waist']");
    }

    #[test]
    fn unexpected_settings_keys_all_named() {
        let err = normalize_mutation(&json!({
            "quickModeSettings": {"updatedAt": "2025-10-06T19:34:42Z", "extra": 1}
        }))
        .unwrap_err();
        match err {
            AvatarError::Validation { field, reason } => {
                assert_eq!(field, "quickModeSettings");
                assert!(reason.contains("extra"));
                assert!(reason.contains("updatedAt"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn morph_mapping_sorts_by_id() {
        let mutation = normalize_mutation(&json!({
            "morphTargets": {"b": 1, "a": 2}
        }))
        .unwrap();
        let ids: Vec<&str> = mutation.morph_targets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(mutation.morph_targets[0].slider_value, Some(2.0));
        assert_eq!(mutation.morph_targets[1].slider_value, Some(1.0));
    }

    #[test]
    fn morph_shapes_normalize_identically() {
        let from_map = normalize_mutation(&json!({
            "morphTargets": {"b": 1, "a": 2}
        }))
        .unwrap();
        let from_list = normalize_mutation(&json!({
            "morphTargets": [
                {"id": "a", "sliderValue": 2},
                {"id": "b", "value": 1}
            ]
        }))
        .unwrap();
        let from_pairs = normalize_mutation(&json!({
            "morphTargets": [["a", 2], ["b", 1]]
        }))
        .unwrap();

        assert_eq!(from_map.morph_targets, from_list.morph_targets);
        assert_eq!(from_map.morph_targets, from_pairs.morph_targets);
    }

    #[test]
    fn duplicate_morph_ids_last_wins() {
        let mutation = normalize_mutation(&json!({
            "morphTargets": [["jaw", 0.2], ["jaw", 0.8]]
        }))
        .unwrap();
        assert_eq!(mutation.morph_targets.len(), 1);
        assert_eq!(mutation.morph_targets[0].slider_value, Some(0.8));
    }

    #[test]
    fn morph_object_fields_parsed() {
        let mutation = normalize_mutation(&json!({
            "morphTargets": [{
                "id": " jawWidth ",
                "backendKey": " jaw_width ",
                "sliderValue": 0.4,
                "unrealValue": 0.62
            }]
        }))
        .unwrap();
        let target = &mutation.morph_targets[0];
        assert_eq!(target.id, "jawWidth");
        assert_eq!(target.backend_key.as_deref(), Some("jaw_width"));
        assert_eq!(target.slider_value, Some(0.4));
        assert_eq!(target.unreal_value, Some(0.62));
    }

    #[test]
    fn slider_value_takes_precedence_over_value() {
        let mutation = normalize_mutation(&json!({
            "morphTargets": [{"id": "chin", "sliderValue": 0.7, "value": 0.1}]
        }))
        .unwrap();
        assert_eq!(mutation.morph_targets[0].slider_value, Some(0.7));
    }

    #[test]
    fn non_numeric_slider_names_path() {
        let err = normalize_mutation(&json!({
            "morphTargets": [{"id": "chin", "sliderValue": "big"}]
        }))
        .unwrap_err();
        assert_eq!(field_of(err), "morphTargets[chin].sliderValue");
    }

    #[test]
    fn blank_morph_id_rejected() {
        let err = normalize_mutation(&json!({
            "morphTargets": [{"id": "  "}]
        }))
        .unwrap_err();
        assert_eq!(field_of(err), "morphTargets");
    }

    #[test]
    fn scalar_morph_payload_rejected() {
        let err = normalize_mutation(&json!({"morphTargets": 3})).unwrap_err();
        assert_eq!(field_of(err), "morphTargets");
    }

    #[test]
    fn non_object_payload_rejected() {
        let err = normalize_mutation(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(field_of(err), "payload");
    }

    #[test]
    fn empty_payload_yields_defaults() {
        let mutation = normalize_mutation(&json!({})).unwrap();
        assert_eq!(mutation, ProfileMutation::default());
    }

    #[test]
    fn renormalization_is_idempotent() {
        let first = normalize_mutation(&json!({
            "name": " Runner ",
            "gender": "FEMALE",
            "morphTargets": {"b": 1, "a": 2}
        }))
        .unwrap();

        // Feed the normalized fields back through as a payload.
        let echoed = normalize_mutation(&json!({
            "name": first.name,
            "gender": first.gender,
            "morphTargets": first
                .morph_targets
                .iter()
                .map(|t| json!({"id": t.id, "sliderValue": t.slider_value}))
                .collect::<Vec<_>>()
        }))
        .unwrap();

        assert_eq!(first, echoed);
    }
}
