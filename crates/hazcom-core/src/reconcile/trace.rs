use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    Reference,
    Extraction,
}

/// Where one field of a canonical record came from. Nested fields are
/// written as `parent.child`, e.g. `ppe_required.hands`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldProvenance {
    pub field: String,
    pub source: FieldSource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeTrace {
    /// Provenance of every field in the canonical record, sorted by name.
    pub fields: Vec<FieldProvenance>,
    /// Extraction fields that were present but blank and therefore ignored.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

impl MergeTrace {
    pub fn source_of(&self, field: &str) -> Option<FieldSource> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.source)
    }

    /// Fields whose final value was read off the label.
    pub fn from_extraction(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.source == FieldSource::Extraction)
            .map(|f| f.field.as_str())
    }
}
