use super::ReferenceCatalog;
use std::sync::LazyLock;

const REFERENCE_CATALOG_JSON: &str = include_str!("../../data/reference-catalog.json");

static BUILTIN_CATALOG: LazyLock<ReferenceCatalog> = LazyLock::new(|| {
    serde_json::from_str(REFERENCE_CATALOG_JSON).expect("embedded reference-catalog.json is valid")
});

/// Get the embedded reference catalog.
pub fn builtin_catalog() -> &'static ReferenceCatalog {
    &BUILTIN_CATALOG
}
