pub mod matching;
pub mod merge;
pub mod shape;
pub mod trace;

pub use matching::{match_reference_entry, CatalogMatch, MatchRule};
pub use merge::{merge_canonical, MergeOutcome};
pub use trace::{FieldSource, MergeTrace};

use crate::catalog::ReferenceCatalog;
use crate::model::HazardProfile;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Extraction keys that describe the extraction itself rather than the
/// product. They are carried through to the canonical record untouched.
const PASSTHROUGH_KEYS: &[&str] = &["confidence", "fields_uncertain"];

/// The single record produced from one scanned label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    #[serde(flatten)]
    pub profile: HazardProfile,
    /// Extraction confidence in [0, 1], as reported by the extractor.
    pub confidence: Option<f64>,
    pub fields_uncertain: Vec<String>,
    /// Catalog entry the label was matched to, if any.
    pub matched_entry: Option<String>,
    pub match_rule: Option<MatchRule>,
    /// Extraction fields discarded because their shape was unusable.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped_fields: Vec<String>,
    pub trace: MergeTrace,
}

impl CanonicalRecord {
    pub fn is_matched(&self) -> bool {
        self.matched_entry.is_some()
    }
}

/// Reconcile an AI label extraction against the reference catalog.
///
/// Never fails: a non-object extraction is treated as empty, unusable
/// fields are dropped, and an unmatched label is returned as extracted
/// with no safety data filled in.
pub fn reconcile_label(extraction: &Value, catalog: &ReferenceCatalog) -> CanonicalRecord {
    let mut fields = match extraction {
        Value::Object(map) => map.clone(),
        other => {
            log::warn!("extraction is not a JSON object ({}); treating as empty", type_name(other));
            Map::new()
        }
    };

    let confidence = fields.get("confidence").and_then(Value::as_f64);
    let fields_uncertain = fields
        .get("fields_uncertain")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    for key in PASSTHROUGH_KEYS {
        fields.remove(*key);
    }

    let name = fields
        .get("product_name")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let (merged, trace, rejected, matched_entry, match_rule) =
        match match_reference_entry(name, catalog) {
            Some(found) => {
                let outcome = merge_canonical(found.entry, &fields);
                (
                    outcome.merged,
                    outcome.trace,
                    outcome.rejected,
                    Some(found.entry.product_name.clone()),
                    Some(found.rule),
                )
            }
            None => {
                let trace = merge::passthrough_trace(&fields);
                (fields, trace, Vec::new(), None, None)
            }
        };

    let (profile, dropped) = profile_from_object(merged);
    let mut dropped_fields = rejected;
    dropped_fields.extend(dropped);

    CanonicalRecord {
        profile,
        confidence,
        fields_uncertain,
        matched_entry,
        match_rule,
        dropped_fields,
        trace,
    }
}

/// Convert a merged JSON object into a typed profile, dropping (and
/// reporting) whatever does not fit.
///
/// An object field with some ill-shaped sub-fields keeps the sub-fields
/// that fit; dropped sub-fields are reported as `parent.child`.
pub fn profile_from_object(mut fields: Map<String, Value>) -> (HazardProfile, Vec<String>) {
    fields.retain(|_, v| !v.is_null());
    if fields.get("signal_word").is_some_and(shape::is_no_signal_word) {
        fields.remove("signal_word");
    }

    let mut dropped = Vec::new();
    let keys: Vec<String> = fields.keys().cloned().collect();
    for key in keys {
        let Some(value) = fields.get(&key) else {
            continue;
        };
        if shape::fits_profile_field(&key, value) {
            continue;
        }
        let salvaged = value
            .as_object()
            .and_then(|sub_fields| shape::salvage_object(&key, sub_fields));
        match salvaged {
            Some((kept, rejected)) => {
                for path in &rejected {
                    log::warn!("dropping malformed extraction field '{path}'");
                }
                fields.insert(key, Value::Object(kept));
                dropped.extend(rejected);
            }
            None => {
                log::warn!("dropping malformed extraction field '{key}'");
                fields.remove(&key);
                dropped.push(key);
            }
        }
    }

    let profile = serde_json::from_value(Value::Object(fields)).unwrap_or_else(|e| {
        log::warn!("could not build profile from extraction: {e}");
        HazardProfile::default()
    });
    (profile, dropped)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin::builtin_catalog;
    use crate::model::SignalWord;
    use serde_json::json;

    #[test]
    fn test_simple_green_scan() {
        let extraction = json!({
            "product_name": "simple green cleaner",
            "signal_word": "WARNING",
            "ppe_required": { "hands": "Nitrile gloves (new lot)" },
            "confidence": 0.91
        });
        let record = reconcile_label(&extraction, builtin_catalog());

        assert_eq!(
            record.matched_entry.as_deref(),
            Some("Simple Green All-Purpose Cleaner")
        );
        assert_eq!(record.match_rule, Some(MatchRule::SharedWords { shared: 3 }));
        assert_eq!(record.profile.ppe_required.eyes.as_deref(), Some("Safety glasses"));
        assert_eq!(
            record.profile.ppe_required.hands.as_deref(),
            Some("Nitrile gloves (new lot)")
        );
        assert_eq!(record.profile.signal_word, Some(SignalWord::Warning));
        assert_eq!(record.confidence, Some(0.91));
        assert!(record.fields_uncertain.is_empty());
        assert_eq!(
            record.trace.source_of("ppe_required.hands"),
            Some(FieldSource::Extraction)
        );
        assert_eq!(
            record.trace.source_of("ppe_required.eyes"),
            Some(FieldSource::Reference)
        );
    }

    #[test]
    fn test_unmatched_label_is_passed_through() {
        let extraction = json!({
            "product_name": "Mystery Solvent 9000",
            "signal_word": "DANGER",
            "pictogram_codes": ["GHS02"],
            "fields_uncertain": ["hazard_statements"],
            "confidence": 0.4
        });
        let record = reconcile_label(&extraction, builtin_catalog());

        assert!(!record.is_matched());
        assert_eq!(record.profile.product_name, "Mystery Solvent 9000");
        assert_eq!(record.profile.pictogram_codes, vec!["GHS02"]);
        // No safety data is invented for an unmatched product.
        assert!(!record.profile.first_aid.is_documented());
        assert!(!record.profile.ppe_required.is_documented());
        assert_eq!(record.fields_uncertain, vec!["hazard_statements"]);
        assert_eq!(record.confidence, Some(0.4));
    }

    #[test]
    fn test_passthrough_keys_not_merged() {
        let extraction = json!({
            "product_name": "Acetone",
            "confidence": 0.8,
            "fields_uncertain": ["un_number"]
        });
        let record = reconcile_label(&extraction, builtin_catalog());
        assert!(record.trace.source_of("confidence").is_none());
        assert!(record.trace.source_of("fields_uncertain").is_none());
        assert_eq!(record.fields_uncertain, vec!["un_number"]);
    }

    #[test]
    fn test_malformed_fields_dropped_not_fatal() {
        let extraction = json!({
            "product_name": "Mystery Solvent",
            "pictogram_codes": "GHS02",
            "nfpa_diamond": { "health": "high" },
            "cas_numbers": ["64-17-5"]
        });
        let record = reconcile_label(&extraction, builtin_catalog());
        assert_eq!(record.profile.cas_numbers, vec!["64-17-5"]);
        assert!(record.profile.pictogram_codes.is_empty());
        assert!(record.profile.nfpa_diamond.is_none());
        let mut dropped = record.dropped_fields.clone();
        dropped.sort();
        assert_eq!(dropped, vec!["nfpa_diamond", "pictogram_codes"]);
    }

    #[test]
    fn test_non_object_extraction_is_empty() {
        let record = reconcile_label(&json!("not a label"), builtin_catalog());
        assert!(!record.is_matched());
        assert_eq!(record.profile, HazardProfile::default());
    }

    #[test]
    fn test_signal_word_none_means_absent() {
        let extraction = json!({ "product_name": "Mystery", "signal_word": "None" });
        let record = reconcile_label(&extraction, builtin_catalog());
        assert_eq!(record.profile.signal_word, None);
        assert!(record.dropped_fields.is_empty());
    }

    #[test]
    fn test_flash_point_override_keeps_other_properties() {
        let extraction = json!({
            "product_name": "Acetone",
            "physical_properties": { "flash_point": "-4 F" }
        });
        let record = reconcile_label(&extraction, builtin_catalog());
        assert_eq!(record.matched_entry.as_deref(), Some("Acetone Technical Grade"));
        let props = &record.profile.physical_properties;
        assert_eq!(props.flash_point.as_deref(), Some("-4 F"));
        assert_eq!(props.odor.as_deref(), Some("Sweet, pungent"));
    }

    #[test]
    fn test_canonical_record_serializes_flat() {
        let extraction = json!({ "product_name": "Acetone", "confidence": 0.7 });
        let record = reconcile_label(&extraction, builtin_catalog());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["product_name"], json!("Acetone"));
        assert_eq!(value["confidence"], json!(0.7));
        assert_eq!(value["match_rule"]["rule"], json!("containment"));
    }

    #[test]
    fn test_ill_shaped_fields_keep_catalog_data() {
        let extraction = json!({
            "product_name": "simple green cleaner",
            "ppe_required": { "hands": 5 },
            "signal_word": "Caution"
        });
        let record = reconcile_label(&extraction, builtin_catalog());

        assert!(record.is_matched());
        assert_eq!(record.profile.ppe_required.eyes.as_deref(), Some("Safety glasses"));
        assert_eq!(record.profile.ppe_required.hands.as_deref(), Some("Rubber gloves"));
        assert_eq!(record.profile.signal_word, Some(SignalWord::Warning));
        let mut dropped = record.dropped_fields.clone();
        dropped.sort();
        assert_eq!(dropped, vec!["ppe_required.hands", "signal_word"]);
    }

    #[test]
    fn test_empty_nfpa_diamond_is_not_invented() {
        let unmatched = reconcile_label(
            &json!({ "product_name": "Mystery Solvent 9000", "nfpa_diamond": {} }),
            builtin_catalog(),
        );
        assert!(!unmatched.is_matched());
        assert_eq!(unmatched.profile.nfpa_diamond, None);
        assert_eq!(unmatched.dropped_fields, vec!["nfpa_diamond"]);

        let catalog = crate::catalog::parse_catalog_str(
            r#"{"name": "t", "version": "1", "entries": [{"product_name": "Floor Wax"}]}"#,
        )
        .unwrap();
        let matched = reconcile_label(
            &json!({ "product_name": "Floor Wax", "nfpa_diamond": {} }),
            &catalog,
        );
        assert!(matched.is_matched());
        assert_eq!(matched.profile.nfpa_diamond, None);
        assert_eq!(matched.dropped_fields, vec!["nfpa_diamond"]);
    }

    #[test]
    fn test_unmatched_partial_object_is_salvaged() {
        let extraction = json!({
            "product_name": "Mystery Solvent 9000",
            "first_aid": { "eyes": ["rinse"], "skin": "Wash with soap" }
        });
        let record = reconcile_label(&extraction, builtin_catalog());
        assert_eq!(record.profile.first_aid.skin.as_deref(), Some("Wash with soap"));
        assert_eq!(record.profile.first_aid.eyes, None);
        assert_eq!(record.dropped_fields, vec!["first_aid.eyes"]);
    }
}
