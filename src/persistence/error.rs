//! Error types for block import/export.

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level value is neither a block array nor a page-keyed object
    #[error("Not a block collection: {0}")]
    UnrecognizedShape(String),

    #[error("Invalid block {uid}: {reason}")]
    InvalidBlock { uid: Uuid, reason: String },

    #[error("Duplicate block uid {0}")]
    DuplicateUid(Uuid),

    #[error("Failed to replace file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;
