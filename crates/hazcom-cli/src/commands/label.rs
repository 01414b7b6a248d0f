use chrono::Utc;
use hazcom_core::error::HazcomError;
use hazcom_core::label::{build_label, mark_label_printed};
use hazcom_core::store::{ChemicalRepository, JsonFileStore};
use std::path::Path;

use crate::output;

pub fn run(
    store_path: &Path,
    name: &str,
    mark_printed: bool,
    output_format: &str,
) -> Result<(), HazcomError> {
    let mut store = JsonFileStore::open(store_path)?;
    let mut chemical =
        store
            .find_chemical_by_name(name)?
            .ok_or_else(|| HazcomError::UnknownRecord {
                kind: "chemical",
                id: name.to_string(),
            })?;

    let label = build_label(&chemical);
    match output_format {
        "json" => output::json::print(&label)?,
        _ => output::table::print_label(&label),
    }

    if mark_printed {
        let now = Utc::now();
        mark_label_printed(&mut chemical, now);
        store.upsert_chemical(chemical, now)?;
        eprintln!("Marked label for '{name}' as printed");
    }
    Ok(())
}
