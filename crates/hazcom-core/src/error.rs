use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum HazcomError {
    #[error("failed to load catalog from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    #[error("invalid catalog: {0}")]
    CatalogInvalid(String),

    #[error("no {kind} with id {id}")]
    UnknownRecord { kind: &'static str, id: String },

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("failed to import inventory: {0}")]
    Import(String),

    #[error("store error at {path}: {reason}")]
    Store { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
