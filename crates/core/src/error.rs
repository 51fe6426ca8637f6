use crate::types::DbId;

/// Domain-level errors shared by the read-side handlers.
///
/// The import pipeline has its own richer error type,
/// [`ImportError`](crate::pressure::importer::ImportError).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}
