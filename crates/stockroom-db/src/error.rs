//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ├── ConnectionFailed / SchemaCreationFailed → fatal at startup   │
//! │       │                                                                 │
//! │       └── QueryFailed / PoolExhausted / Internal  → menu prints it,    │
//! │                                                    loop continues      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database file could not be opened or created.
    ///
    /// ## When This Occurs
    /// - Parent directory doesn't exist
    /// - File permissions issue
    /// - File is not a SQLite database
    #[error("Cannot open storage: {0}")]
    ConnectionFailed(String),

    /// The products table could not be created.
    #[error("Schema creation failed: {0}")]
    SchemaCreationFailed(String),

    /// Statement preparation or execution failed.
    ///
    /// Carries the engine's own message.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The single connection is still held by another operation.
    ///
    /// ## When This Occurs
    /// - A row stream is kept alive while a second statement is issued
    #[error("Storage handle is busy")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Whether the error should abort startup.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DbError::ConnectionFailed(_) | DbError::SchemaCreationFailed(_)
        )
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → DbError::QueryFailed (engine message)
/// sqlx::Error::ColumnDecode   → DbError::QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),

            sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) => {
                DbError::QueryFailed(err.to_string())
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map_to_handle_errors() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_only_startup_errors_are_fatal() {
        assert!(DbError::ConnectionFailed("x".into()).is_fatal());
        assert!(DbError::SchemaCreationFailed("x".into()).is_fatal());
        assert!(!DbError::QueryFailed("x".into()).is_fatal());
        assert!(!DbError::PoolExhausted.is_fatal());
    }

    #[test]
    fn test_error_messages() {
        let err = DbError::QueryFailed("no such table: products".to_string());
        assert_eq!(err.to_string(), "Query failed: no such table: products");
    }
}
