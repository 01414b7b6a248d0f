use hazcom_core::catalog::builtin::builtin_catalog;
use hazcom_core::catalog::load_catalog;
use hazcom_core::error::HazcomError;
use std::path::Path;

use crate::output;

pub fn list() -> Result<(), HazcomError> {
    let catalog = builtin_catalog();
    println!("{} (v{})\n", catalog.name, catalog.version);
    if let Some(ref desc) = catalog.description {
        println!("{desc}\n");
    }

    let width = catalog
        .entries
        .iter()
        .map(|e| e.product_name.len())
        .max()
        .unwrap_or(20);
    for entry in &catalog.entries {
        let signal = entry
            .signal_word
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "  {:<width$}  {:<8} {}",
            entry.product_name,
            signal,
            entry.manufacturer,
            width = width
        );
    }
    Ok(())
}

pub fn show(name: &str) -> Result<(), HazcomError> {
    let entry = builtin_catalog()
        .find_exact(name)
        .ok_or_else(|| HazcomError::UnknownRecord {
            kind: "catalog entry",
            id: name.to_string(),
        })?;
    output::table::print_profile(entry);
    Ok(())
}

pub fn validate(path: &Path) -> Result<(), HazcomError> {
    let catalog = load_catalog(path)?;
    println!(
        "Valid catalog: {} (v{})",
        catalog.name, catalog.version
    );
    println!("  {} entries", catalog.len());
    Ok(())
}
