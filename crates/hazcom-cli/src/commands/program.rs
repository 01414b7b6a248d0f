use chrono::{DateTime, Utc};
use hazcom_core::error::HazcomError;
use hazcom_core::program::{build_contractor_packet, build_written_program};
use hazcom_core::store::{ChemicalRepository, EmployeeRepository, JsonFileStore};
use std::path::Path;

use crate::output;

pub fn written(
    store_path: &Path,
    site: &str,
    now: DateTime<Utc>,
    output_format: &str,
    out: Option<&Path>,
) -> Result<(), HazcomError> {
    let store = JsonFileStore::open(store_path)?;
    let program = build_written_program(site, &store.chemicals()?, &store.employees()?, now);
    match output_format {
        "json" => output::document::emit(&output::json::render(&program)?, out),
        _ => output::document::emit(&program.to_markdown(), out),
    }
}

pub fn packet(
    store_path: &Path,
    site: &str,
    area: Option<&str>,
    now: DateTime<Utc>,
    output_format: &str,
    out: Option<&Path>,
) -> Result<(), HazcomError> {
    let store = JsonFileStore::open(store_path)?;
    let packet = build_contractor_packet(site, area, &store.chemicals()?, &store.employees()?, now);
    match output_format {
        "json" => output::document::emit(&output::json::render(&packet)?, out),
        _ => output::document::emit(&packet.to_markdown(), out),
    }
}
