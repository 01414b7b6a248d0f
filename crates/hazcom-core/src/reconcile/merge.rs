use super::shape::fits_profile_field;
use super::trace::{FieldProvenance, FieldSource, MergeTrace};
use crate::model::HazardProfile;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Result of blending an extraction into a reference profile.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub merged: Map<String, Value>,
    pub trace: MergeTrace,
    /// Extraction fields (or `parent.child` sub-fields) whose shape did not
    /// fit and which therefore left the baseline untouched.
    pub rejected: Vec<String>,
}

/// True for values that carry no information: null, `[]`, or a string of
/// only whitespace.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Merge extracted label fields over a trusted reference profile.
///
/// The reference is the baseline. Each populated extraction field replaces
/// the baseline value; blank fields are ignored. When both sides hold an
/// object the merge goes exactly one level deep, so a single sub-field from
/// the label (say `physical_properties.flash_point`) overrides without
/// discarding the rest of the curated block.
///
/// A populated value of the wrong shape is treated like a blank one: the
/// baseline stays and the field is reported in [`MergeOutcome::rejected`].
pub fn merge_canonical(reference: &HazardProfile, extraction: &Map<String, Value>) -> MergeOutcome {
    let baseline = match serde_json::to_value(reference) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            log::error!("reference profile serialized to non-object {other}; merging onto empty baseline");
            Map::new()
        }
        Err(e) => {
            log::error!("failed to serialize reference profile: {e}; merging onto empty baseline");
            Map::new()
        }
    };
    merge_objects(baseline, extraction, fits_profile_field)
}

/// Merge on plain JSON objects. See [`merge_canonical`]. `fits` decides
/// whether a candidate value is acceptable for a top-level key.
pub fn merge_objects<F>(
    mut merged: Map<String, Value>,
    extraction: &Map<String, Value>,
    fits: F,
) -> MergeOutcome
where
    F: Fn(&str, &Value) -> bool,
{
    let mut sources: BTreeMap<String, FieldSource> = BTreeMap::new();
    for (key, value) in &merged {
        record_all(&mut sources, key, value, FieldSource::Reference);
    }
    let mut skipped = Vec::new();
    let mut rejected = Vec::new();

    for (key, value) in extraction {
        if is_blank(value) {
            skipped.push(key.clone());
            continue;
        }

        match (merged.get_mut(key), value) {
            (Some(Value::Object(base)), Value::Object(incoming)) => {
                for (sub_key, sub_value) in incoming {
                    let path = format!("{key}.{sub_key}");
                    if is_blank(sub_value) {
                        skipped.push(path);
                        continue;
                    }
                    let mut trial = base.clone();
                    trial.insert(sub_key.clone(), sub_value.clone());
                    if !fits(key, &Value::Object(trial)) {
                        log::warn!("ignoring ill-shaped extraction field '{path}'");
                        rejected.push(path);
                        continue;
                    }
                    base.insert(sub_key.clone(), sub_value.clone());
                    sources.remove(key.as_str());
                    sources.insert(path, FieldSource::Extraction);
                }
            }
            _ => {
                if !fits(key, value) {
                    log::warn!("ignoring ill-shaped extraction field '{key}'");
                    rejected.push(key.clone());
                    continue;
                }
                let prefix = format!("{key}.");
                sources.retain(|field, _| !field.starts_with(&prefix));
                record_all(&mut sources, key, value, FieldSource::Extraction);
                merged.insert(key.clone(), value.clone());
            }
        }
    }

    MergeOutcome {
        merged,
        trace: MergeTrace {
            fields: sources
                .into_iter()
                .map(|(field, source)| FieldProvenance { field, source })
                .collect(),
            skipped,
        },
        rejected,
    }
}

/// Trace for an extraction used as-is, without a reference.
pub fn passthrough_trace(extraction: &Map<String, Value>) -> MergeTrace {
    let mut sources = BTreeMap::new();
    for (key, value) in extraction {
        record_all(&mut sources, key, value, FieldSource::Extraction);
    }
    MergeTrace {
        fields: sources
            .into_iter()
            .map(|(field, source)| FieldProvenance { field, source })
            .collect(),
        skipped: Vec::new(),
    }
}

fn record_all(
    sources: &mut BTreeMap<String, FieldSource>,
    key: &str,
    value: &Value,
    source: FieldSource,
) {
    match value {
        Value::Object(fields) if !fields.is_empty() => {
            sources.remove(key);
            for sub_key in fields.keys() {
                sources.insert(format!("{key}.{sub_key}"), source);
            }
        }
        _ => {
            sources.insert(key.to_string(), source);
        }
    }
}
