use chrono::{DateTime, Utc};
use hazcom_core::error::HazcomError;
use hazcom_core::store::JsonFileStore;
use std::path::Path;

use crate::output;

pub fn run(store_path: &Path, now: DateTime<Utc>, output_format: &str) -> Result<(), HazcomError> {
    let store = JsonFileStore::open(store_path)?;
    let score = hazcom_core::assess_store(&store, now)?;

    match output_format {
        "json" => output::json::print(&score)?,
        _ => output::table::print_score(&score),
    }
    Ok(())
}
