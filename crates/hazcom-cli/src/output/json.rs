use hazcom_core::error::HazcomError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), HazcomError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Pretty JSON with a trailing newline, for writing to a file.
pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<String, HazcomError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
