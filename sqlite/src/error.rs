//! Error types for the SQLite mapping engine.
//!
//! Write-path failures are always explicit values of this type so callers
//! can choose to propagate or ignore them; read paths soften missing
//! tables/columns into empty results instead (see
//! [`RecordStore`](crate::RecordStore)).

use record_store_core::RecordError;
use thiserror::Error;

/// Errors that can occur while mapping records to and from SQLite.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The table name collides with a name the engine reserves.
    #[error("table name `{0}` is reserved")]
    ReservedTableName(String),

    /// A table or column name is not a valid SQL identifier.
    #[error(
        "invalid identifier `{0}`: must start with a letter or underscore \
         and contain only alphanumerics and underscores"
    )]
    InvalidIdentifier(String),

    /// DDL derivation or execution failure (e.g. the table already exists).
    #[error("schema error: {0}")]
    Schema(String),

    /// A record field could not be read or written.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Malformed query shape or missing table/column at query time.
    #[error("query error: {0}")]
    Query(String),

    /// Generic execution failure from the underlying engine.
    #[error("engine error: {0}")]
    Engine(#[from] rusqlite::Error),
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
