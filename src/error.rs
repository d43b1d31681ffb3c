//! Error handling

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the record store and the generator dispatch.
///
/// Storage trouble below the store (missing data dir, unreadable blob) is
/// deliberately NOT in this list for reads: the store degrades to in-memory
/// operation instead of failing hard. `Storage` only appears when a backend
/// is asked to do something it cannot (see `store::backend`).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Update or lookup of a record id that does not exist in the table.
    #[error("record '{id}' not found in table '{table}'")]
    NotFound { table: String, id: String },

    /// Generator dispatch with an unrecognized function name.
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// The durable key-value backing failed a read or write.
    #[error("storage unavailable: {0}")]
    Storage(String),

    /// JSON (de)serialization failure crossing the store boundary.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Dispatch payload missing a required field.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl StoreError {
    pub fn not_found(table: &str, id: &str) -> Self {
        Self::NotFound {
            table: table.to_string(),
            id: id.to_string(),
        }
    }
}
