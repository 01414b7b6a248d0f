use hazcom_core::error::HazcomError;
use std::path::Path;

/// Write a rendered document to `out`, or to stdout.
pub fn emit(document: &str, out: Option<&Path>) -> Result<(), HazcomError> {
    match out {
        Some(path) => {
            std::fs::write(path, document)?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{document}"),
    }
    Ok(())
}
