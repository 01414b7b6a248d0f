pub mod catalog;
pub mod compliance;
pub mod error;
pub mod import;
pub mod label;
pub mod model;
pub mod program;
pub mod reconcile;
pub mod store;

use catalog::ReferenceCatalog;
use chrono::{DateTime, Utc};
use compliance::ComplianceScore;
use error::HazcomError;
use model::{AddedMethod, Chemical};
use reconcile::CanonicalRecord;
use serde_json::Value;
use store::{ChemicalRepository, EmployeeRepository};

/// Turn one scanned label into a new inventory record.
///
/// The extraction is reconciled against `catalog`; the canonical record is
/// returned alongside the chemical so callers can show what was filled in
/// from the catalog.
pub fn chemical_from_scan(
    extraction: &Value,
    catalog: &ReferenceCatalog,
    added_by: &str,
    location: &str,
    now: DateTime<Utc>,
) -> (CanonicalRecord, Chemical) {
    let record = reconcile::reconcile_label(extraction, catalog);
    let chemical = Chemical::new_from_profile(
        record.profile.clone(),
        AddedMethod::Scan,
        added_by,
        location,
        now,
    );
    (record, chemical)
}

/// Score everything a store holds.
pub fn assess_store<S>(store: &S, now: DateTime<Utc>) -> Result<ComplianceScore, HazcomError>
where
    S: ChemicalRepository + EmployeeRepository,
{
    let chemicals = store.chemicals()?;
    let employees = store.employees()?;
    Ok(compliance::calculate_compliance_score(
        &chemicals, &employees, now,
    ))
}
