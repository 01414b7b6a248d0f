use crate::model::HazardProfile;
use serde_json::{Map, Value};

/// Signal-word readings that mean the label carries none.
pub fn is_no_signal_word(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|w| matches!(w.trim().to_lowercase().as_str(), "" | "none" | "n/a"))
}

/// Whether `value` is usable as the profile field `key`.
///
/// Keys the profile does not know are accepted; they are ignored when the
/// record is typed.
pub fn fits_profile_field(key: &str, value: &Value) -> bool {
    if key == "signal_word" && is_no_signal_word(value) {
        return true;
    }
    let mut single = Map::new();
    single.insert(key.to_string(), value.clone());
    serde_json::from_value::<HazardProfile>(Value::Object(single)).is_ok()
}

/// Keep the sub-fields of an ill-shaped object field that fit on their own.
///
/// Returns the salvaged object and the `key.sub` paths that were left out,
/// or `None` when nothing usable remains (for instance an NFPA diamond
/// missing a rating).
pub fn salvage_object(
    key: &str,
    fields: &Map<String, Value>,
) -> Option<(Map<String, Value>, Vec<String>)> {
    let mut kept = Map::new();
    let mut rejected = Vec::new();
    for (sub_key, sub_value) in fields {
        let mut trial = kept.clone();
        trial.insert(sub_key.clone(), sub_value.clone());
        if fits_profile_field(key, &Value::Object(trial.clone())) {
            kept = trial;
        } else {
            rejected.push(format!("{key}.{sub_key}"));
        }
    }

    if kept.is_empty() || !fits_profile_field(key, &Value::Object(kept.clone())) {
        return None;
    }
    Some((kept, rejected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_shapes() {
        assert!(fits_profile_field("signal_word", &json!("WARNING")));
        assert!(fits_profile_field("signal_word", &json!("None")));
        assert!(!fits_profile_field("signal_word", &json!("Caution")));
        assert!(fits_profile_field("ppe_required", &json!({ "hands": "Gloves" })));
        assert!(!fits_profile_field("ppe_required", &json!({ "hands": 5 })));
        assert!(!fits_profile_field("pictogram_codes", &json!("GHS02")));
        assert!(!fits_profile_field("nfpa_diamond", &json!({})));
        assert!(fits_profile_field("some_future_field", &json!(42)));
    }

    #[test]
    fn test_salvage_keeps_good_sub_fields() {
        let fields = json!({ "eyes": 5, "skin": "Wash with soap" });
        let (kept, rejected) = salvage_object("first_aid", fields.as_object().unwrap()).unwrap();
        assert_eq!(Value::Object(kept), json!({ "skin": "Wash with soap" }));
        assert_eq!(rejected, vec!["first_aid.eyes"]);
    }

    #[test]
    fn test_partial_diamond_is_not_salvaged() {
        let fields = json!({ "health": "high", "flammability": 3, "instability": 0 });
        assert!(salvage_object("nfpa_diamond", fields.as_object().unwrap()).is_none());
    }
}
