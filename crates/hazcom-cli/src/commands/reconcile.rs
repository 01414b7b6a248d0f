use chrono::Utc;
use hazcom_core::catalog::{builtin::builtin_catalog, load_catalog, ReferenceCatalog};
use hazcom_core::error::HazcomError;
use hazcom_core::store::{ChemicalRepository, JsonFileStore};
use serde_json::Value;
use std::path::Path;

use crate::output;

pub fn run(
    extraction_file: &Path,
    catalog_file: Option<&Path>,
    save_to: Option<&Path>,
    location: &str,
    added_by: &str,
    output_format: &str,
) -> Result<(), HazcomError> {
    let custom: ReferenceCatalog;
    let catalog = match catalog_file {
        Some(path) => {
            custom = load_catalog(path)?;
            &custom
        }
        None => builtin_catalog(),
    };

    let bytes = std::fs::read(extraction_file)?;
    let extraction: Value = serde_json::from_slice(&bytes)?;

    let now = Utc::now();
    let (record, chemical) =
        hazcom_core::chemical_from_scan(&extraction, catalog, added_by, location, now);

    match output_format {
        "json" => output::json::print(&record)?,
        _ => output::table::print_record(&record),
    }

    if let Some(store_path) = save_to {
        let mut store = JsonFileStore::open(store_path)?;
        let saved = store.upsert_chemical(chemical, now)?;
        eprintln!(
            "Added '{}' ({}) to {}",
            saved.name(),
            saved.id,
            store_path.display()
        );
    }

    Ok(())
}
