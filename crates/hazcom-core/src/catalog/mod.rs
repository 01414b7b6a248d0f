pub mod builtin;

use crate::error::HazcomError;
use crate::label::GhsPictogram;
use crate::model::HazardProfile;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A curated list of known-good product profiles.
///
/// Entry order matters: reconciliation returns the first entry that matches,
/// so more specific products should be listed before generic ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceCatalog {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    pub entries: Vec<HazardProfile>,
}

impl ReferenceCatalog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive exact lookup by product name.
    pub fn find_exact(&self, name: &str) -> Option<&HazardProfile> {
        let wanted = name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|e| e.product_name.trim().to_lowercase() == wanted)
    }
}

/// Load a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<ReferenceCatalog, HazcomError> {
    let content = std::fs::read_to_string(path).map_err(|e| HazcomError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let catalog: ReferenceCatalog =
        serde_json::from_str(&content).map_err(|e| HazcomError::CatalogLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_catalog(&catalog)?;
    log::debug!(
        "loaded catalog '{}' v{} ({} entries) from {}",
        catalog.name,
        catalog.version,
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

/// Parse a catalog from a JSON string (no file path context).
pub fn parse_catalog_str(json: &str) -> Result<ReferenceCatalog, HazcomError> {
    let catalog: ReferenceCatalog = serde_json::from_str(json)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Validate that a catalog is well-formed.
pub fn validate_catalog(catalog: &ReferenceCatalog) -> Result<(), HazcomError> {
    if catalog.entries.is_empty() {
        return Err(HazcomError::CatalogInvalid(
            "entries must not be empty".into(),
        ));
    }

    for (idx, entry) in catalog.entries.iter().enumerate() {
        if entry.product_name.trim().is_empty() {
            return Err(HazcomError::CatalogInvalid(format!(
                "entry {} has an empty product_name",
                idx
            )));
        }

        for code in &entry.pictogram_codes {
            if GhsPictogram::from_code(code).is_none() {
                return Err(HazcomError::CatalogInvalid(format!(
                    "'{}' has unknown pictogram code '{}' (expected GHS01..GHS09)",
                    entry.product_name, code
                )));
            }
        }

        if let Some(ref nfpa) = entry.nfpa_diamond {
            if nfpa.health > 4 || nfpa.flammability > 4 || nfpa.instability > 4 {
                return Err(HazcomError::CatalogInvalid(format!(
                    "'{}' has an NFPA rating above 4",
                    entry.product_name
                )));
            }
        }
    }

    Ok(())
}
