//! # Storage Error Types
//!
//! Error types for local ledger operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Error Propagation                               │
//! │                                                                     │
//! │  SQLite Error (sqlx::Error)                                         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StorageError (this module) ← categorized, with context             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  CheckoutError / SyncError in the layers above                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Local ledger operation errors.
///
/// A storage error during a sale commit means the whole transaction rolled
/// back; callers keep the draft and may retry.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: i64 },

    /// Unique constraint violation (e.g. duplicate barcode).
    #[error("Duplicate value for {field}")]
    UniqueViolation { field: String },

    /// Foreign key constraint violation (e.g. item referencing a missing
    /// product).
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database file could not be opened or the pool could not connect.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// All pool connections are in use.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Anything else.
    #[error("Internal storage error: {0}")]
    Internal(String),
}

impl StorageError {
    /// Creates a NotFound error for a given entity type and row id.
    pub fn not_found(entity: impl Into<String>, id: i64) -> Self {
        StorageError::NotFound {
            entity: entity.into(),
            id,
        }
    }
}

/// Convert sqlx errors to StorageError.
///
/// SQLite reports constraint failures as database errors with well-known
/// message prefixes; those are split out so callers can react to them.
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StorageError::NotFound {
                entity: "Record".to_string(),
                id: 0,
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    StorageError::UniqueViolation { field }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    StorageError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    StorageError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => StorageError::PoolExhausted,

            sqlx::Error::PoolClosed => StorageError::ConnectionFailed("Pool is closed".to_string()),

            _ => StorageError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StorageError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StorageError::MigrationFailed(err.to_string())
    }
}

/// Result type for ledger operations.
pub type StorageResult<T> = Result<T, StorageError>;
