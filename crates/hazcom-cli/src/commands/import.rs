use chrono::Utc;
use hazcom_core::error::HazcomError;
use hazcom_core::import::import_inventory_xlsx;
use hazcom_core::store::{ChemicalRepository, JsonFileStore};
use std::path::Path;

pub fn run(store_path: &Path, input_file: &Path, added_by: &str) -> Result<(), HazcomError> {
    let bytes = std::fs::read(input_file)?;
    let now = Utc::now();
    let imported = import_inventory_xlsx(&bytes, added_by, now)?;

    let mut store = JsonFileStore::open(store_path)?;
    let mut added = 0;
    let mut skipped = Vec::new();
    for chemical in imported.chemicals {
        if store.find_chemical_by_name(chemical.name())?.is_some() {
            skipped.push(chemical.name().to_string());
            continue;
        }
        store.upsert_chemical(chemical, now)?;
        added += 1;
    }

    eprintln!(
        "Imported {} chemical(s) from {} into {}",
        added,
        input_file.display(),
        store_path.display()
    );
    for name in &skipped {
        eprintln!("  skipped '{name}': already in inventory");
    }
    for note in &imported.notes {
        eprintln!("  row {}: {}", note.row, note.reason);
    }
    Ok(())
}
